//! Apply-mode handler

use colored::Colorize;

use crate::cli::Cli;
use crate::cli::context::RunContext;
use crate::error::{ConfigError, Result};
use crate::orchestrator::{self, ApplyRequest};
use crate::output;

/// Copy the source org's broker configuration across the group
pub async fn run(cli: &Cli) -> Result<()> {
    let source_org_id = cli
        .source_org_id
        .clone()
        .ok_or(ConfigError::MissingValue("--source-org-id"))?;
    let ctx = RunContext::new(cli)?;

    if cli.dry_run {
        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
    }

    let request = ApplyRequest {
        group_id: ctx.config.group_id.clone(),
        source_org_id,
        connection_id: cli.broker_connection_id.clone(),
        dry_run: cli.dry_run,
    };

    let summary = orchestrator::apply(&ctx.client, &request).await?;
    output::print(&summary, ctx.format)
}
