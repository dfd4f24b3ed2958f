//! API trait definitions split by responsibility
//!
//! - [`OrgApi`] - Group membership listing
//! - [`BrokerApi`] - Broker configuration read/delete/create
//!
//! The [`SnykApi`](super::SnykApi) super-trait combines both.

mod broker;
mod org;

pub use broker::{BrokerApi, DeleteOutcome};
pub use org::OrgApi;
