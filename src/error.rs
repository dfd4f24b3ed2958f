//! Error types for snyk-broker-sync

use std::time::Duration;
use thiserror::Error;

/// Result type alias for broker sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Exit code for a run that failed before or while setting up
pub const EXIT_FATAL: i32 = 1;

/// Exit code for invalid configuration (matches clap's usage error code)
pub const EXIT_CONFIG: i32 = 2;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => EXIT_CONFIG,
            _ => EXIT_FATAL,
        }
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed (401). Check --snyk-token: {0}")]
    Unauthorized(String),

    #[error("Access denied (403). The token lacks permission for this resource: {0}")]
    Forbidden(String),

    #[error("Resource not found (404): {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimit(Duration),

    #[error("Bad request ({status}): {body}")]
    BadRequest { status: u16, body: String },

    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected HTTP status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// HTTP status code that produced this error, if it came from a response.
    #[allow(dead_code)]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::RateLimit(_) => Some(429),
            ApiError::BadRequest { status, .. }
            | ApiError::Server { status, .. }
            | ApiError::Http { status, .. } => Some(*status),
            ApiError::Network(_) | ApiError::InvalidResponse(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required value: pass {0} or set it in the config file")]
    MissingValue(&'static str),

    #[error("Unknown region '{0}'. Expected one of SNYK-US-01, SNYK-US-02, SNYK-EU-01, SNYK-AU-01")]
    UnknownRegion(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Failures that abort a run before any target organization is touched
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Could not list organizations for group {group_id}: {source}")]
    GroupUnavailable {
        group_id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Source organization {org_id} is not a member of group {group_id}")]
    SourceOrgNotInGroup { org_id: String, group_id: String },

    #[error("Could not read broker configuration of source organization {org_id}: {source}")]
    SourceConfigUnavailable {
        org_id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("No broker configuration found in source organization {org_id}{}", connection_suffix(.connection_id))]
    ConfigNotFound {
        org_id: String,
        connection_id: Option<String>,
    },
}

fn connection_suffix(connection_id: &Option<String>) -> String {
    connection_id
        .as_deref()
        .map(|id| format!(" for connection {}", id))
        .unwrap_or_default()
}

/// Failure applied to a single target organization; recorded, never fatal
#[derive(Debug, Error)]
pub enum OrgError {
    #[error("delete failed: {0}")]
    DeleteFailed(#[source] Error),

    #[error("create failed: {0}")]
    CreateFailed(#[source] Error),
}
