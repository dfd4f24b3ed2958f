//! Run context
//!
//! Resolves configuration from flags, environment and the optional config
//! file, then builds the API client shared by both run modes.

use log::debug;

use crate::cli::{Cli, OutputFormat};
use crate::client::SnykClient;
use crate::config::{Config, Overrides, ResolvedConfig};
use crate::error::Result;

/// Everything a run handler needs
pub struct RunContext {
    /// Validated settings
    pub config: ResolvedConfig,
    /// API client, constructed once per run
    pub client: SnykClient,
    /// Summary format
    pub format: OutputFormat,
}

impl RunContext {
    /// Load config, apply CLI overrides and construct the client.
    ///
    /// # Errors
    /// Returns a config error if a required value is missing or invalid.
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = Config::load_at(cli.config.as_deref())?.resolve(overrides(cli))?;
        debug!(
            "Using API host {} (region {}) for group {}",
            config.api_host, config.region, config.group_id
        );

        let client = SnykClient::new(&config)?;

        Ok(Self {
            config,
            client,
            format: cli.format,
        })
    }
}

fn overrides(cli: &Cli) -> Overrides {
    Overrides {
        snyk_token: cli.snyk_token.clone(),
        tenant_id: cli.tenant_id.clone(),
        group_id: cli.group_id.clone(),
        region: cli.region.clone(),
        api_host: cli.api_host.clone(),
    }
}
