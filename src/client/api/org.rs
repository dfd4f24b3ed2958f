//! Organization listing API trait

use async_trait::async_trait;

use crate::client::models::Organization;
use crate::error::Result;

/// Group membership operations for the Snyk REST API
#[async_trait]
pub trait OrgApi: Send + Sync {
    /// List every organization in a group, following all pages.
    async fn list_group_orgs(&self, group_id: &str) -> Result<Vec<Organization>>;
}
