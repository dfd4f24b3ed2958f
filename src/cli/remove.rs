//! Remove-mode handler

use colored::Colorize;

use crate::cli::Cli;
use crate::cli::context::RunContext;
use crate::error::Result;
use crate::orchestrator::{self, RemoveRequest};
use crate::output;

/// Remove `connection_id` from every org in the group
pub async fn run(cli: &Cli, connection_id: &str) -> Result<()> {
    let ctx = RunContext::new(cli)?;

    if cli.dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
    }
    eprintln!(
        "Removing {} from every organization in group {}",
        connection_id.bold(),
        ctx.config.group_id
    );

    let request = RemoveRequest {
        group_id: ctx.config.group_id.clone(),
        connection_id: connection_id.to_string(),
        dry_run: cli.dry_run,
    };

    let summary = orchestrator::remove(&ctx.client, &request).await?;
    output::print(&summary, ctx.format)
}
