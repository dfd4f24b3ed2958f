//! snyk-broker-sync - copy a broker connection configuration across a Snyk group

use clap::Parser;
use colored::Colorize;

mod cli;
mod client;
mod config;
mod error;
mod logging;
mod orchestrator;
mod output;

use cli::Cli;
use error::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli).await {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(err.exit_code());
    }
}

async fn run(cli: &Cli) -> Result<()> {
    logging::init(cli.debug, cli.log_file.as_deref())?;

    match cli.remove_connection.as_deref() {
        Some(connection_id) => cli::remove::run(cli, connection_id).await,
        None => cli::apply::run(cli).await,
    }
}
