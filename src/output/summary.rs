//! Rendering of the end-of-run summary

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::Formattable;
use super::json::format_json;
use super::table::format_table;
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::orchestrator::{Mode, OrgOutcome, OrgStatus, RunSummary, StatusCounts};

/// One table row per processed organization
#[derive(Debug, Tabled)]
pub struct OutcomeRow {
    #[tabled(rename = "ORG ID")]
    pub org_id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "DETAIL")]
    pub detail: String,
}

impl From<&OrgOutcome> for OutcomeRow {
    fn from(outcome: &OrgOutcome) -> Self {
        Self {
            org_id: outcome.org_id.clone(),
            name: outcome.org_name.clone(),
            status: status_label(outcome.status).to_string(),
            detail: outcome.detail.clone(),
        }
    }
}

/// JSON body: the summary plus its counts
#[derive(Debug, Serialize)]
struct SummaryReport<'a> {
    #[serde(flatten)]
    summary: &'a RunSummary,
    counts: StatusCounts,
}

impl Formattable for RunSummary {
    fn format(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Pretty => Ok(format_pretty(self)),
            OutputFormat::Table => {
                let rows: Vec<OutcomeRow> = self.outcomes.iter().map(OutcomeRow::from).collect();
                Ok(format_table(&rows))
            }
            OutputFormat::Json => Ok(format_json(&SummaryReport {
                summary: self,
                counts: self.counts(),
            })?),
        }
    }
}

fn status_label(status: OrgStatus) -> &'static str {
    match status {
        OrgStatus::Success => "success",
        OrgStatus::Skipped => "skipped",
        OrgStatus::Failed => "failed",
    }
}

fn format_pretty(summary: &RunSummary) -> String {
    let counts = summary.counts();
    let verb = match summary.mode {
        Mode::Apply => "Applied",
        Mode::Remove => "Removed",
    };

    let mut lines = Vec::new();
    if summary.dry_run {
        lines.push(
            format!(
                "Dry run summary for {} in group {}",
                summary.connection_id, summary.group_id
            )
            .bold()
            .to_string(),
        );
    } else {
        lines.push(
            format!(
                "{} {} across group {}",
                verb, summary.connection_id, summary.group_id
            )
            .bold()
            .to_string(),
        );
    }

    lines.push(format!("  {} Success: {}", "✓".green(), counts.success));
    lines.push(format!("  {} Skipped: {}", "-".yellow(), counts.skipped));
    lines.push(format!("  {} Failed: {}", "✗".red(), counts.failed));

    if summary.dry_run {
        let planned: Vec<&OrgOutcome> = summary
            .outcomes
            .iter()
            .filter(|o| !o.actions.is_empty())
            .collect();
        if !planned.is_empty() {
            lines.push(String::new());
            lines.push(
                format!("Would change ({} actions):", summary.action_count())
                    .bold()
                    .to_string(),
            );
            for outcome in planned {
                let actions: Vec<String> = outcome.actions.iter().map(|a| a.to_string()).collect();
                lines.push(format!(
                    "  {} ({}): {}",
                    outcome.org_name,
                    outcome.org_id,
                    actions.join(", ")
                ));
            }
        }
    }

    for (status, heading) in [
        (OrgStatus::Failed, "Failed:".red()),
        (OrgStatus::Skipped, "Skipped:".yellow()),
    ] {
        let group: Vec<&OrgOutcome> = summary
            .with_status(status)
            .filter(|o| !(summary.dry_run && !o.actions.is_empty()))
            .collect();
        if group.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(heading.bold().to_string());
        for outcome in group {
            lines.push(format!(
                "  {} ({}): {}",
                outcome.org_name, outcome.org_id, outcome.detail
            ));
        }
    }

    lines.join("\n")
}
