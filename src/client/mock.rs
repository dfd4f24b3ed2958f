//! Mock Snyk API client for testing
//!
//! Provides an in-memory implementation of the API traits for unit testing
//! without making real API calls. Broker configurations are kept per org, so
//! deletes and creates change what later reads return.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{BrokerApi, DeleteOutcome, OrgApi};
use super::models::{BrokerConnectionConfig, Organization};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure state via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockSnykClient::new()
///     .with_orgs(vec![Organization::new("org-s", "Source")])
///     .await
///     .with_config("org-s", github_config())
///     .await;
///
/// let summary = orchestrator::apply(&mock, &request).await?;
/// ```
#[derive(Default)]
pub struct MockSnykClient {
    /// Organizations to return from list_group_orgs
    orgs: Arc<Mutex<Vec<Organization>>>,
    /// Broker configuration per org ID
    configs: Arc<Mutex<HashMap<String, BrokerConnectionConfig>>>,
    /// Orgs whose delete call fails
    failing_deletes: Arc<Mutex<HashSet<String>>>,
    /// Orgs whose create call fails
    failing_creates: Arc<Mutex<HashSet<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_group_orgs: usize,
    pub get_broker_config: usize,
    pub delete_broker_config: usize,
    pub create_broker_config: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_group_orgs + self.get_broker_config + self.mutating()
    }

    /// Calls that would change remote state.
    pub fn mutating(&self) -> usize {
        self.delete_broker_config + self.create_broker_config
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    /// The API method called (e.g., "delete_broker_config")
    pub method: String,
    /// Organization or group ID the call targeted
    pub target: String,
    /// Connection ID if the call named one
    pub connection_id: Option<String>,
}

impl MockSnykClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure organizations to return from list_group_orgs.
    pub async fn with_orgs(self, orgs: Vec<Organization>) -> Self {
        *self.orgs.lock().await = orgs;
        self
    }

    /// Give an org an existing broker configuration.
    pub async fn with_config(self, org_id: &str, config: BrokerConnectionConfig) -> Self {
        self.configs
            .lock()
            .await
            .insert(org_id.to_string(), config);
        self
    }

    /// Make delete calls for this org fail with a server error.
    pub async fn fail_delete_for(self, org_id: &str) -> Self {
        self.failing_deletes.lock().await.insert(org_id.to_string());
        self
    }

    /// Make create calls for this org fail with a bad request.
    pub async fn fail_create_for(self, org_id: &str) -> Self {
        self.failing_creates.lock().await.insert(org_id.to_string());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Current configuration held by an org.
    pub async fn config_of(&self, org_id: &str) -> Option<BrokerConnectionConfig> {
        self.configs.lock().await.get(org_id).cloned()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    /// Record a captured request for test assertions.
    async fn capture_request(&self, method: &str, target: &str, connection_id: Option<&str>) {
        let mut requests = self.captured_requests.lock().await;
        requests.push(CapturedRequest {
            method: method.to_string(),
            target: target.to_string(),
            connection_id: connection_id.map(|s| s.to_string()),
        });
    }
}

// ============================================================================
// OrgApi Implementation
// ============================================================================

#[async_trait]
impl OrgApi for MockSnykClient {
    async fn list_group_orgs(&self, group_id: &str) -> Result<Vec<Organization>> {
        self.capture_request("list_group_orgs", group_id, None).await;
        self.call_count.lock().await.list_group_orgs += 1;
        self.check_error().await?;

        Ok(self.orgs.lock().await.clone())
    }
}

// ============================================================================
// BrokerApi Implementation
// ============================================================================

#[async_trait]
impl BrokerApi for MockSnykClient {
    async fn get_broker_config(
        &self,
        org_id: &str,
        connection_id: Option<&str>,
    ) -> Result<Option<BrokerConnectionConfig>> {
        self.capture_request("get_broker_config", org_id, connection_id)
            .await;
        self.call_count.lock().await.get_broker_config += 1;
        self.check_error().await?;

        let configs = self.configs.lock().await;
        Ok(configs
            .get(org_id)
            .filter(|c| connection_id.is_none_or(|id| c.connection_id == id))
            .cloned())
    }

    async fn delete_broker_config(
        &self,
        org_id: &str,
        connection_id: &str,
    ) -> Result<DeleteOutcome> {
        self.capture_request("delete_broker_config", org_id, Some(connection_id))
            .await;
        self.call_count.lock().await.delete_broker_config += 1;
        self.check_error().await?;

        if self.failing_deletes.lock().await.contains(org_id) {
            return Err(ApiError::Server {
                status: 500,
                body: format!("delete exploded for {}", org_id),
            }
            .into());
        }

        let mut configs = self.configs.lock().await;
        let bound = configs
            .get(org_id)
            .is_some_and(|c| c.connection_id == connection_id);
        if bound {
            configs.remove(org_id);
            Ok(DeleteOutcome::Deleted(1))
        } else {
            Ok(DeleteOutcome::NotFound)
        }
    }

    async fn create_broker_config(
        &self,
        org_id: &str,
        config: &BrokerConnectionConfig,
    ) -> Result<()> {
        self.capture_request("create_broker_config", org_id, Some(&config.connection_id))
            .await;
        self.call_count.lock().await.create_broker_config += 1;
        self.check_error().await?;

        if self.failing_creates.lock().await.contains(org_id) {
            return Err(ApiError::BadRequest {
                status: 422,
                body: format!("create rejected for {}", org_id),
            }
            .into());
        }

        self.configs
            .lock()
            .await
            .insert(org_id.to_string(), config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::ConfigDocument;

    fn config(connection_id: &str) -> BrokerConnectionConfig {
        BrokerConnectionConfig::new(connection_id, "conn", ConfigDocument::new())
    }

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockSnykClient::new();
        assert!(mock.list_group_orgs("g").await.unwrap().is_empty());
        assert!(mock.get_broker_config("o", None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_client_with_error_is_consumed() {
        let mock = MockSnykClient::new()
            .with_error(ApiError::Unauthorized("nope".to_string()))
            .await;

        assert!(mock.list_group_orgs("g").await.is_err());
        assert!(mock.list_group_orgs("g").await.is_ok());
        assert_eq!(mock.call_counts().await.list_group_orgs, 2);
    }

    #[tokio::test]
    async fn test_mock_delete_then_create_tracks_state() {
        let mock = MockSnykClient::new().with_config("org-a", config("c1")).await;

        assert_eq!(
            mock.delete_broker_config("org-a", "c1").await.unwrap(),
            DeleteOutcome::Deleted(1)
        );
        assert_eq!(
            mock.delete_broker_config("org-a", "c1").await.unwrap(),
            DeleteOutcome::NotFound
        );

        mock.create_broker_config("org-a", &config("c1")).await.unwrap();
        assert_eq!(mock.config_of("org-a").await, Some(config("c1")));

        let counts = mock.call_counts().await;
        assert_eq!(counts.mutating(), 3);
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn test_mock_get_filters_by_connection() {
        let mock = MockSnykClient::new().with_config("org-a", config("c1")).await;
        assert!(mock.get_broker_config("org-a", Some("c2")).await.unwrap().is_none());
        assert!(mock.get_broker_config("org-a", Some("c1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mock_failures_are_per_org() {
        let mock = MockSnykClient::new()
            .fail_delete_for("org-a")
            .await
            .fail_create_for("org-b")
            .await;

        assert!(mock.delete_broker_config("org-a", "c1").await.is_err());
        assert!(mock.delete_broker_config("org-b", "c1").await.is_ok());
        assert!(mock.create_broker_config("org-b", &config("c1")).await.is_err());
        assert!(mock.create_broker_config("org-a", &config("c1")).await.is_ok());

        let captured = mock.captured_requests().await;
        assert_eq!(captured.len(), 4);
        assert_eq!(captured[0].method, "delete_broker_config");
        assert_eq!(captured[0].target, "org-a");
    }
}
