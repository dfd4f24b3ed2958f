//! Snyk REST API data models
//!
//! Domain types built from the JSON:API documents returned by the group,
//! organization and broker endpoints.

mod broker;
mod org;

pub use broker::{BrokerConnection, BrokerConnectionConfig, BrokerIntegration, ConnectionResource};
#[cfg(test)]
pub use broker::ConfigDocument;
pub use org::{OrgResource, Organization};
