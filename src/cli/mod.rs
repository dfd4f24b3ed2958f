//! CLI definition and run handlers

use std::path::PathBuf;

use clap::Parser;

pub mod apply;
pub mod args;
pub mod context;
pub mod remove;

pub use args::OutputFormat;

/// Copy one organization's broker connection configuration to every other
/// organization in a Snyk group, or remove a connection from all of them.
#[derive(Parser, Debug)]
#[command(name = "snyk-broker-sync")]
#[command(
    version,
    about,
    long_about = None,
    after_help = "EXAMPLES:\n  \
        snyk-broker-sync --source-org-id <ORG>                       # Copy source config to the group\n  \
        snyk-broker-sync --source-org-id <ORG> --dry-run             # Preview only\n  \
        snyk-broker-sync --source-org-id <ORG> --broker-connection-id <ID>\n  \
        snyk-broker-sync --remove-connection <ID>                    # Remove a connection everywhere\n  \
        snyk-broker-sync --remove-connection <ID> --format json"
)]
pub struct Cli {
    /// Snyk API token
    #[arg(long, env = "SNYK_TOKEN", hide_env_values = true)]
    pub snyk_token: Option<String>,

    /// Group whose organizations are synchronized
    #[arg(long, env = "SNYK_GROUP_ID", hide_env = true)]
    pub group_id: Option<String>,

    /// Tenant that owns the broker connections
    #[arg(long, env = "SNYK_TENANT_ID", hide_env = true)]
    pub tenant_id: Option<String>,

    /// Organization whose broker configuration is copied
    #[arg(long, required_unless_present = "remove_connection")]
    pub source_org_id: Option<String>,

    /// Use this connection instead of the source organization's first one
    #[arg(long, conflicts_with = "remove_connection")]
    pub broker_connection_id: Option<String>,

    /// Remove this connection from every organization in the group
    #[arg(long, value_name = "CONNECTION_ID")]
    pub remove_connection: Option<String>,

    /// Log intended changes without making them
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        env = "BROKER_SYNC_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Snyk region (SNYK-US-01, SNYK-US-02, SNYK-EU-01, SNYK-AU-01)
    #[arg(long, env = "SNYK_REGION", hide_env = true)]
    pub region: Option<String>,

    /// Override the API host (e.g. for a proxy)
    #[arg(long, env = "BROKER_SYNC_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Override config file location
    #[arg(long, env = "BROKER_SYNC_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, env = "BROKER_SYNC_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Also append log records to this file
    #[arg(long, env = "BROKER_SYNC_LOG_FILE", hide_env = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
