//! Configuration management for snyk-broker-sync
//!
//! Values come from three layers with precedence flag/env > config file > default.
//! The config file is optional; when no explicit path is given the default
//! location is only read if it exists.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Page size for group org listing (REST API maximum)
const MAX_PAGE_LIMIT: u32 = 100;

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "SNYK-US-01";

/// Snyk regions and their API hosts
const REGIONS: &[(&str, &str)] = &[
    ("SNYK-US-01", "https://api.snyk.io"),
    ("SNYK-US-02", "https://api.us.snyk.io"),
    ("SNYK-EU-01", "https://api.eu.snyk.io"),
    ("SNYK-AU-01", "https://api.au.snyk.io"),
];

/// Resolve a region name (case-insensitive) to its API host.
pub fn region_host(region: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(region))
        .map(|(_, host)| *host)
}

/// Contents of the optional YAML config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Snyk API token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snyk_token: Option<String>,

    /// Tenant owning the broker connections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Group whose organizations are targeted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Snyk region (SNYK-US-01, SNYK-EU-01, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Explicit API host, overrides the region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Page size for organization listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_limit: Option<u32>,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub snyk_token: Option<String>,
    pub tenant_id: Option<String>,
    pub group_id: Option<String>,
    pub region: Option<String>,
    pub api_host: Option<String>,
}

/// Fully validated settings used to build the API client
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub snyk_token: String,
    pub tenant_id: String,
    pub group_id: String,
    pub region: String,
    /// Scheme and host, without the `/rest` suffix
    pub api_host: String,
    pub timeout: Duration,
    pub page_limit: u32,
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".snyk-broker-sync").join("config.yaml"))
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, or from the default path if present.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file yields an empty config.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(Path::new(p)),
            None => match Self::default_path() {
                Ok(default) if default.exists() => Self::load_from(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Merge overrides on top of this file config and validate the result.
    pub fn resolve(self, overrides: Overrides) -> Result<ResolvedConfig> {
        let snyk_token = non_empty(overrides.snyk_token.or(self.snyk_token))
            .ok_or(ConfigError::MissingValue("--snyk-token"))?;
        let tenant_id = non_empty(overrides.tenant_id.or(self.tenant_id))
            .ok_or(ConfigError::MissingValue("--tenant-id"))?;
        let group_id = non_empty(overrides.group_id.or(self.group_id))
            .ok_or(ConfigError::MissingValue("--group-id"))?;

        let region = overrides
            .region
            .or(self.region)
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let region_default = region_host(&region).ok_or_else(|| ConfigError::UnknownRegion(region.clone()))?;

        let api_host = overrides
            .api_host
            .or(self.api_host)
            .unwrap_or_else(|| region_default.to_string())
            .trim_end_matches('/')
            .to_string();

        let page_limit = self.page_limit.unwrap_or(MAX_PAGE_LIMIT);
        if page_limit == 0 || page_limit > MAX_PAGE_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "page_limit must be between 1 and {}, got {}",
                MAX_PAGE_LIMIT, page_limit
            ))
            .into());
        }

        Ok(ResolvedConfig {
            snyk_token,
            tenant_id,
            group_id,
            region,
            api_host,
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            page_limit,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
