//! Apply mode: copy the source org's broker configuration to every other org

use log::{debug, info, warn};

use super::list_group;
use super::summary::{Action, Mode, OrgOutcome, RunSummary};
use crate::client::models::{BrokerConnectionConfig, Organization};
use crate::client::{DeleteOutcome, SnykApi};
use crate::error::{OrgError, Result, SetupError};

/// Inputs for an apply run
#[derive(Debug, Clone)]
pub struct ApplyRequest {
    pub group_id: String,
    pub source_org_id: String,
    /// Restrict to this connection instead of the source org's first one
    pub connection_id: Option<String>,
    pub dry_run: bool,
}

/// Copy the source configuration to every org in the group except the source.
///
/// Fails only when the group cannot be listed, the source org is not in the
/// group, or the source configuration cannot be read. Everything after that
/// is recorded per org.
pub async fn apply<A: SnykApi + ?Sized>(api: &A, request: &ApplyRequest) -> Result<RunSummary> {
    let orgs = list_group(api, &request.group_id).await?;

    if !orgs.iter().any(|o| o.id == request.source_org_id) {
        return Err(SetupError::SourceOrgNotInGroup {
            org_id: request.source_org_id.clone(),
            group_id: request.group_id.clone(),
        }
        .into());
    }

    let config = fetch_source_config(api, request).await?;
    info!(
        "Using broker connection {} ({})",
        config.connection_name, config.connection_id
    );

    let target_count = orgs.len() - 1;
    if target_count == 0 {
        info!("No target organizations found besides the source");
    }

    let mut summary = RunSummary::new(
        Mode::Apply,
        &request.group_id,
        &config.connection_id,
        request.dry_run,
    );

    let mut position = 0;
    for org in &orgs {
        if org.id == request.source_org_id {
            summary.push(OrgOutcome::skipped(org, "source organization", Vec::new()));
            continue;
        }

        position += 1;
        debug!(
            "Processing organization {}/{}: {} ({})",
            position, target_count, org.name, org.id
        );

        let outcome = if request.dry_run {
            plan_org(org, &config)
        } else {
            apply_to_org(api, org, &config).await
        };
        summary.push(outcome);
    }

    Ok(summary)
}

/// Read the source configuration, failing the run if it is absent.
async fn fetch_source_config<A: SnykApi + ?Sized>(
    api: &A,
    request: &ApplyRequest,
) -> Result<BrokerConnectionConfig> {
    info!(
        "Fetching broker configuration from source organization {}",
        request.source_org_id
    );

    let config = api
        .get_broker_config(&request.source_org_id, request.connection_id.as_deref())
        .await
        .map_err(|source| SetupError::SourceConfigUnavailable {
            org_id: request.source_org_id.clone(),
            source: Box::new(source),
        })?;

    config.ok_or_else(|| {
        SetupError::ConfigNotFound {
            org_id: request.source_org_id.clone(),
            connection_id: request.connection_id.clone(),
        }
        .into()
    })
}

fn plan_org(org: &Organization, config: &BrokerConnectionConfig) -> OrgOutcome {
    let conn = &config.connection_id;
    info!("[dry run] would delete broker connection {} from {} ({})", conn, org.name, org.id);
    info!("[dry run] would create broker connection {} on {} ({})", conn, org.name, org.id);

    OrgOutcome::skipped(
        org,
        format!("dry run: would replace configuration with {}", config.connection_name),
        vec![Action::Delete(conn.clone()), Action::Create(conn.clone())],
    )
}

/// Delete whatever the org has on the connection, then create the source's document.
async fn apply_to_org<A: SnykApi + ?Sized>(
    api: &A,
    org: &Organization,
    config: &BrokerConnectionConfig,
) -> OrgOutcome {
    let conn = &config.connection_id;
    let mut actions = vec![Action::Delete(conn.clone())];

    match api.delete_broker_config(&org.id, conn).await {
        Ok(DeleteOutcome::Deleted(n)) => {
            debug!("Removed {} existing integration(s) from {}", n, org.id)
        }
        Ok(DeleteOutcome::NotFound) => debug!("No existing integration on {}", org.id),
        Err(err) => return record_failure(org, OrgError::DeleteFailed(err), actions),
    }

    actions.push(Action::Create(conn.clone()));
    match api.create_broker_config(&org.id, config).await {
        Ok(()) => {
            info!("Configured {} ({}) with {}", org.name, org.id, config.connection_name);
            OrgOutcome::success(org, "configured", actions)
        }
        Err(err) => record_failure(org, OrgError::CreateFailed(err), actions),
    }
}

fn record_failure(org: &Organization, err: OrgError, actions: Vec<Action>) -> OrgOutcome {
    warn!("Failed to configure {} ({}): {}", org.name, org.id, err);
    OrgOutcome::failed(org, err.to_string(), actions)
}
