//! Snyk API client

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod snyk;

pub use api::{BrokerApi, DeleteOutcome, OrgApi};
#[cfg(test)]
pub use mock::MockSnykClient;
pub use snyk::SnykClient;

/// Snyk API client trait combining every operation the tool needs.
///
/// Blanket-implemented for anything that implements the sub-traits, so the
/// orchestrator can take `&impl SnykApi` and tests can pass the mock.
pub trait SnykApi: OrgApi + BrokerApi {}

impl<T: OrgApi + BrokerApi + ?Sized> SnykApi for T {}
