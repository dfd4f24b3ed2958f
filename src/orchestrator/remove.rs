//! Remove mode: delete one connection from every org in the group

use log::{debug, info, warn};

use super::list_group;
use super::summary::{Action, Mode, OrgOutcome, RunSummary};
use crate::client::models::Organization;
use crate::client::{DeleteOutcome, SnykApi};
use crate::error::{OrgError, Result};

/// Inputs for a remove run
#[derive(Debug, Clone)]
pub struct RemoveRequest {
    pub group_id: String,
    pub connection_id: String,
    pub dry_run: bool,
}

/// Remove `connection_id` from every org in the group.
///
/// Orgs without the connection count as success. Only a failed group listing
/// aborts the run.
pub async fn remove<A: SnykApi + ?Sized>(api: &A, request: &RemoveRequest) -> Result<RunSummary> {
    let orgs = list_group(api, &request.group_id).await?;
    let conn = &request.connection_id;

    let mut summary = RunSummary::new(Mode::Remove, &request.group_id, conn, request.dry_run);

    for (i, org) in orgs.iter().enumerate() {
        debug!(
            "Processing organization {}/{}: {} ({})",
            i + 1,
            orgs.len(),
            org.name,
            org.id
        );

        let outcome = if request.dry_run {
            info!("[dry run] would remove {} from {} ({})", conn, org.name, org.id);
            OrgOutcome::skipped(
                org,
                format!("dry run: would remove {}", conn),
                vec![Action::Remove(conn.clone())],
            )
        } else {
            remove_from_org(api, org, conn).await
        };
        summary.push(outcome);
    }

    Ok(summary)
}

async fn remove_from_org<A: SnykApi + ?Sized>(api: &A, org: &Organization, conn: &str) -> OrgOutcome {
    let actions = vec![Action::Remove(conn.to_string())];

    match api.delete_broker_config(&org.id, conn).await {
        Ok(DeleteOutcome::Deleted(n)) => {
            info!("Removed {} from {} ({})", conn, org.name, org.id);
            OrgOutcome::success(org, format!("removed {} integration(s)", n), actions)
        }
        Ok(DeleteOutcome::NotFound) => {
            debug!("Connection {} not present on {}", conn, org.id);
            OrgOutcome::success(org, "connection not present", actions)
        }
        Err(err) => {
            let err = OrgError::DeleteFailed(err);
            warn!("Failed to remove {} from {} ({}): {}", conn, org.name, org.id, err);
            OrgOutcome::failed(org, err.to_string(), actions)
        }
    }
}
