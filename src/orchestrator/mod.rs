//! Run orchestration
//!
//! Both modes follow the same shape: list the group's orgs (fatal on
//! failure), optionally read the source configuration (apply only, fatal on
//! failure), then walk the orgs one at a time. Per-org failures are folded
//! into the [`RunSummary`] and never stop the walk.

mod apply;
mod remove;
mod summary;

pub use apply::{ApplyRequest, apply};
pub use remove::{RemoveRequest, remove};
#[cfg(test)]
pub use summary::Action;
pub use summary::{Mode, OrgOutcome, OrgStatus, RunSummary, StatusCounts};

use log::info;

use crate::client::SnykApi;
use crate::client::models::Organization;
use crate::error::{Result, SetupError};

/// List the group's orgs, turning any failure into a setup error.
async fn list_group<A: SnykApi + ?Sized>(api: &A, group_id: &str) -> Result<Vec<Organization>> {
    info!("Fetching organizations for group {}", group_id);

    let orgs = api
        .list_group_orgs(group_id)
        .await
        .map_err(|source| SetupError::GroupUnavailable {
            group_id: group_id.to_string(),
            source: Box::new(source),
        })?;

    info!("Found {} organizations in group", orgs.len());
    Ok(orgs)
}
