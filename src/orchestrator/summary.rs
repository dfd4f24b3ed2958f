//! Per-org outcomes and the end-of-run summary

use std::fmt;

use serde::Serialize;

use crate::client::models::Organization;

/// Which kind of run produced a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Apply,
    Remove,
}

/// Final status of one organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgStatus {
    Success,
    Skipped,
    Failed,
}

/// A mutating call, performed or (in a dry run) intended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "connection_id", rename_all = "lowercase")]
pub enum Action {
    /// Clear the org's existing configuration before re-creating it
    Delete(String),
    /// Bind the org to the source configuration
    Create(String),
    /// Remove a connection from the org
    Remove(String),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Delete(id) => write!(f, "delete {}", id),
            Action::Create(id) => write!(f, "create {}", id),
            Action::Remove(id) => write!(f, "remove {}", id),
        }
    }
}

/// Outcome for one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgOutcome {
    pub org_id: String,
    pub org_name: String,
    pub status: OrgStatus,
    pub detail: String,
    pub actions: Vec<Action>,
}

impl OrgOutcome {
    fn new(org: &Organization, status: OrgStatus, detail: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            org_id: org.id.clone(),
            org_name: org.name.clone(),
            status,
            detail: detail.into(),
            actions,
        }
    }

    pub fn success(org: &Organization, detail: impl Into<String>, actions: Vec<Action>) -> Self {
        Self::new(org, OrgStatus::Success, detail, actions)
    }

    pub fn skipped(org: &Organization, detail: impl Into<String>, actions: Vec<Action>) -> Self {
        Self::new(org, OrgStatus::Skipped, detail, actions)
    }

    pub fn failed(org: &Organization, detail: impl Into<String>, actions: Vec<Action>) -> Self {
        Self::new(org, OrgStatus::Failed, detail, actions)
    }
}

/// Counts by status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub success: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Everything a run did, in processing order
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub mode: Mode,
    pub group_id: String,
    /// Connection applied or removed
    pub connection_id: String,
    pub dry_run: bool,
    pub outcomes: Vec<OrgOutcome>,
}

impl RunSummary {
    pub fn new(mode: Mode, group_id: &str, connection_id: &str, dry_run: bool) -> Self {
        Self {
            mode,
            group_id: group_id.to_string(),
            connection_id: connection_id.to_string(),
            dry_run,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: OrgOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn counts(&self) -> StatusCounts {
        self.outcomes
            .iter()
            .fold(StatusCounts::default(), |mut counts, outcome| {
                match outcome.status {
                    OrgStatus::Success => counts.success += 1,
                    OrgStatus::Skipped => counts.skipped += 1,
                    OrgStatus::Failed => counts.failed += 1,
                }
                counts
            })
    }

    /// Outcomes with the given status, in processing order.
    pub fn with_status(&self, status: OrgStatus) -> impl Iterator<Item = &OrgOutcome> {
        self.outcomes.iter().filter(move |o| o.status == status)
    }

    /// Total actions across all orgs (intended ones in a dry run).
    pub fn action_count(&self) -> usize {
        self.outcomes.iter().map(|o| o.actions.len()).sum()
    }

    #[cfg(test)]
    pub fn outcome_for(&self, org_id: &str) -> Option<&OrgOutcome> {
        self.outcomes.iter().find(|o| o.org_id == org_id)
    }
}
