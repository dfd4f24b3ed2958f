//! Broker configuration API trait
//!
//! Reads are side-effect free; `delete_broker_config` and
//! `create_broker_config` mutate the target organization.

use async_trait::async_trait;

use crate::client::models::BrokerConnectionConfig;
use crate::error::Result;

/// Result of removing a connection's configuration from an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The given number of integrations were removed
    Deleted(usize),
    /// Nothing to remove; treated as success
    NotFound,
}

/// Broker configuration operations for the Snyk REST API
#[async_trait]
pub trait BrokerApi: Send + Sync {
    /// Read an organization's broker configuration.
    ///
    /// With `connection_id` the named connection is used, otherwise the first
    /// connection visible to the org. Returns `None` when the org has no such
    /// connection or no integration bound to it.
    async fn get_broker_config(
        &self,
        org_id: &str,
        connection_id: Option<&str>,
    ) -> Result<Option<BrokerConnectionConfig>>;

    /// Remove the org's integrations on a connection.
    ///
    /// A connection the org is not bound to yields `DeleteOutcome::NotFound`.
    async fn delete_broker_config(&self, org_id: &str, connection_id: &str)
    -> Result<DeleteOutcome>;

    /// Bind the org to the configuration's connection using its document.
    async fn create_broker_config(&self, org_id: &str, config: &BrokerConnectionConfig)
    -> Result<()>;
}
