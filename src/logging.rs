//! Logger setup
//!
//! Dependencies log at `warn` unless `RUST_LOG` says otherwise; this crate
//! logs at `info`, or `debug` with `--debug`. With `--log-file` every record
//! is also appended to that file as an audit trail of the run.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

use crate::error::Result;

/// Writes each record to stderr and to the audit file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global logger.
///
/// # Errors
/// Returns an I/O error if the log file cannot be opened.
pub fn init(debug: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder
        .filter_module(env!("CARGO_CRATE_NAME"), level)
        .format_timestamp_millis();

    if let Some(path) = log_file {
        let file = open_log_file(path)?;
        builder.target(Target::Pipe(Box::new(Tee { file })));
    }

    builder.init();
    Ok(())
}
