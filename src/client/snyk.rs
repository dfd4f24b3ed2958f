//! Snyk REST API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{BrokerApi, DeleteOutcome, OrgApi};
use super::models::{
    BrokerConnection, BrokerConnectionConfig, BrokerIntegration, ConnectionResource, OrgResource,
    Organization,
};
use super::pagination::{JsonApiPage, resolve_next};
use crate::config::ResolvedConfig;
use crate::error::{ApiError, Error, Result};

/// API version for group/org endpoints
const ORGS_API_VERSION: &str = "2024-10-15";

/// API version for broker endpoints
const BROKER_API_VERSION: &str = "2025-09-28";

/// JSON:API media type required by the REST API
const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// Rate limit: 1620 requests per minute (27 per second)
const RATE_LIMIT_PER_SECOND: u32 = 27;

/// Snyk REST API client
pub struct SnykClient {
    http: HttpClient,
    api_host: String,
    token: String,
    tenant_id: String,
    page_limit: u32,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl SnykClient {
    /// Create a client from resolved configuration
    pub fn new(config: &ResolvedConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(concat!("snyk-broker-sync/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(
            NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN),
        );

        Ok(Self {
            http,
            api_host: config.api_host.clone(),
            token: config.snyk_token.clone(),
            tenant_id: config.tenant_id.clone(),
            page_limit: config.page_limit,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Build a `/rest` URL for an API path
    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest{}", self.api_host, path)
    }

    /// Base path for tenant-scoped broker connection endpoints
    fn connection_path(&self, connection_id: &str) -> String {
        format!(
            "/tenants/{}/brokers/connections/{}",
            self.tenant_id, connection_id
        )
    }

    /// Send an authenticated request and fail on any non-2xx status
    async fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<reqwest::Response> {
        self.rate_limiter.until_ready().await;

        debug!("API request: {} {}", method, url);

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(CONTENT_TYPE, JSON_API_MEDIA_TYPE);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("API response: {} {} -> {}", method, url, status.as_u16());

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();
        debug!("API error body: {}", body);

        Err(status_error(status, retry_after, body).into())
    }

    /// GET a JSON document
    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, String)]) -> Result<T> {
        let response = self.send(Method::GET, url, query, None).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", url, e))
        })?;
        Ok(data)
    }

    /// GET every page of a JSON:API collection, following `links.next`.
    ///
    /// Stops on an empty page, a missing next link, or a next link that
    /// repeats the current URL.
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        url: String,
        first_query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let mut url = url;
        let mut items = Vec::new();
        let mut page_number = 1;

        loop {
            // `links.next` already carries version, limit and cursor
            let query: &[(&str, String)] = if page_number == 1 { first_query } else { &[] };
            let page: JsonApiPage<T> = self.get_json(&url, query).await?;

            if page.data.is_empty() {
                break;
            }

            let next = page.next_link().map(|n| resolve_next(&self.api_host, n));
            let fetched = page.data.len();
            items.extend(page.data);
            debug!(
                "Fetched {} items on page {}, total: {}",
                fetched,
                page_number,
                items.len()
            );

            match next {
                Some(next_url) if next_url != url => {
                    url = next_url;
                    page_number += 1;
                }
                _ => break,
            }
        }

        Ok(items)
    }

    /// List broker connections visible to an organization
    pub async fn list_org_connections(&self, org_id: &str) -> Result<Vec<BrokerConnection>> {
        let url = self.rest_url(&format!("/orgs/{}/brokers/connections", org_id));
        let query = [
            ("version", BROKER_API_VERSION.to_string()),
            ("limit", self.page_limit.to_string()),
        ];

        let resources: Vec<ConnectionResource> = self.get_all_pages(url, &query).await?;
        let connections: Vec<BrokerConnection> =
            resources.into_iter().map(BrokerConnection::from).collect();

        debug!(
            "Found {} broker connections for org {}",
            connections.len(),
            org_id
        );
        Ok(connections)
    }

    /// List every integration bound to a broker connection across the tenant
    pub async fn list_connection_integrations(
        &self,
        connection_id: &str,
    ) -> Result<Vec<BrokerIntegration>> {
        let url = self.rest_url(&format!("{}/integrations", self.connection_path(connection_id)));
        let query = [("version", BROKER_API_VERSION.to_string())];

        let integrations: Vec<BrokerIntegration> = self.get_all_pages(url, &query).await?;
        debug!(
            "Found {} integrations for connection {}",
            integrations.len(),
            connection_id
        );
        Ok(integrations)
    }
}

/// Map a non-2xx status to an `ApiError`, keeping the response body
fn status_error(status: StatusCode, retry_after: Option<u64>, body: String) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(body),
        StatusCode::FORBIDDEN => ApiError::Forbidden(body),
        StatusCode::NOT_FOUND => ApiError::NotFound(body),
        StatusCode::TOO_MANY_REQUESTS => {
            ApiError::RateLimit(Duration::from_secs(retry_after.unwrap_or(60)))
        }
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::BadRequest {
            status: status.as_u16(),
            body,
        },
        status if status.is_server_error() => ApiError::Server {
            status: status.as_u16(),
            body,
        },
        status => ApiError::Http {
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl OrgApi for SnykClient {
    async fn list_group_orgs(&self, group_id: &str) -> Result<Vec<Organization>> {
        let url = self.rest_url(&format!("/groups/{}/orgs", group_id));
        let query = [
            ("version", ORGS_API_VERSION.to_string()),
            ("limit", self.page_limit.to_string()),
        ];

        let resources: Vec<OrgResource> = self.get_all_pages(url, &query).await?;
        let orgs: Vec<Organization> = resources.into_iter().map(Organization::from).collect();

        debug!("Fetched {} organizations for group {}", orgs.len(), group_id);
        Ok(orgs)
    }
}

#[async_trait]
impl BrokerApi for SnykClient {
    async fn get_broker_config(
        &self,
        org_id: &str,
        connection_id: Option<&str>,
    ) -> Result<Option<BrokerConnectionConfig>> {
        let connections = self.list_org_connections(org_id).await?;

        let selected = match connection_id {
            Some(id) => connections.iter().find(|c| c.id == id),
            None => connections.first(),
        };
        let Some(connection) = selected else {
            debug!("Org {} has no matching broker connection", org_id);
            return Ok(None);
        };

        let integrations = self.list_connection_integrations(&connection.id).await?;
        let config = integrations
            .iter()
            .find(|i| i.org_id == org_id)
            .map(|integration| BrokerConnectionConfig::from_source(connection, integration));

        if config.is_none() {
            debug!(
                "Org {} has no integration on connection {}",
                org_id, connection.id
            );
        }
        Ok(config)
    }

    async fn delete_broker_config(
        &self,
        org_id: &str,
        connection_id: &str,
    ) -> Result<DeleteOutcome> {
        let integrations = match self.list_connection_integrations(connection_id).await {
            Ok(integrations) => integrations,
            Err(Error::Api(err)) if err.is_not_found() => {
                debug!("Connection {} does not exist in the tenant", connection_id);
                return Ok(DeleteOutcome::NotFound);
            }
            Err(err) => return Err(err),
        };
        let owned: Vec<BrokerIntegration> = integrations
            .into_iter()
            .filter(|i| i.org_id == org_id)
            .collect();

        let mut deleted = 0;
        for integration in &owned {
            let url = self.rest_url(&format!(
                "{}/orgs/{}/integrations/{}",
                self.connection_path(connection_id),
                org_id,
                integration.id
            ));
            let query = [("version", BROKER_API_VERSION.to_string())];

            match self.send(Method::DELETE, &url, &query, None).await {
                Ok(_) => deleted += 1,
                Err(Error::Api(err)) if err.is_not_found() => {
                    debug!("Integration {} already gone", integration.id);
                }
                Err(err) => return Err(err),
            }
        }

        if deleted == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted(deleted))
        }
    }

    async fn create_broker_config(
        &self,
        org_id: &str,
        config: &BrokerConnectionConfig,
    ) -> Result<()> {
        let url = self.rest_url(&format!(
            "{}/orgs/{}/integration",
            self.connection_path(&config.connection_id),
            org_id
        ));
        let query = [("version", BROKER_API_VERSION.to_string())];
        let body = config.request_body();

        self.send(Method::POST, &url, &query, Some(&body)).await?;
        Ok(())
    }
}
