//! Broker connection and integration models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque, order-preserving JSON object copied from the source org to targets.
pub type ConfigDocument = Map<String, Value>;

/// A broker connection visible to an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConnection {
    /// Connection ID
    pub id: String,

    /// Connection name
    pub name: String,

    /// Connection type (github, bitbucket-server, ...)
    pub connection_type: String,

    /// Broker deployment the connection belongs to
    pub deployment_id: String,
}

/// `GET /orgs/{org_id}/brokers/connections` entry in JSON:API form
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionResource {
    pub id: String,

    #[serde(default)]
    pub attributes: ConnectionAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionAttributes {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub connection_type: Option<String>,

    #[serde(default)]
    pub deployment_id: Option<String>,

    /// Newer API versions nest the type under `configuration.type`
    #[serde(default)]
    pub configuration: Option<Value>,
}

impl From<ConnectionResource> for BrokerConnection {
    fn from(resource: ConnectionResource) -> Self {
        let attrs = resource.attributes;
        let connection_type = attrs
            .connection_type
            .or_else(|| {
                attrs
                    .configuration
                    .as_ref()
                    .and_then(|c| c.get("type"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_default();

        Self {
            id: resource.id,
            name: attrs.name,
            connection_type,
            deployment_id: attrs.deployment_id.unwrap_or_default(),
        }
    }
}

/// An integration binding a broker connection to one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokerIntegration {
    /// Integration ID
    pub id: String,

    /// Organization the integration belongs to
    pub org_id: String,

    /// Integration type (github, gitlab, ...)
    pub integration_type: String,
}

/// Accepts both the flat and the `attributes`-nested integration shapes.
#[derive(Debug, Deserialize)]
struct IntegrationResource {
    id: String,
    #[serde(default)]
    org_id: Option<String>,
    #[serde(default)]
    integration_type: Option<String>,
    #[serde(default)]
    attributes: Option<IntegrationAttributes>,
}

#[derive(Debug, Default, Deserialize)]
struct IntegrationAttributes {
    #[serde(default)]
    org_id: Option<String>,
    #[serde(default)]
    integration_type: Option<String>,
}

impl<'de> Deserialize<'de> for BrokerIntegration {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = IntegrationResource::deserialize(deserializer)?;
        let attrs = raw.attributes.unwrap_or_default();

        Ok(Self {
            id: raw.id,
            org_id: raw.org_id.or(attrs.org_id).unwrap_or_default(),
            integration_type: raw
                .integration_type
                .or(attrs.integration_type)
                .unwrap_or_default(),
        })
    }
}

/// Broker configuration read from the source org.
///
/// `document` is posted verbatim as the `data` member when creating the
/// integration on a target org; its fields are never inspected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrokerConnectionConfig {
    /// Connection the configuration belongs to
    pub connection_id: String,

    /// Connection name, for display
    pub connection_name: String,

    /// Payload copied to every target org
    pub document: ConfigDocument,
}

impl BrokerConnectionConfig {
    /// Build the configuration from the source org's connection and integration.
    pub fn from_source(connection: &BrokerConnection, integration: &BrokerIntegration) -> Self {
        let mut document = ConfigDocument::new();
        document.insert(
            "type".to_string(),
            Value::String(integration.integration_type.clone()),
        );

        Self {
            connection_id: connection.id.clone(),
            connection_name: connection.name.clone(),
            document,
        }
    }

    /// Build a configuration around an arbitrary document.
    #[cfg(test)]
    pub fn new(
        connection_id: impl Into<String>,
        connection_name: impl Into<String>,
        document: ConfigDocument,
    ) -> Self {
        Self {
            connection_id: connection_id.into(),
            connection_name: connection_name.into(),
            document,
        }
    }

    /// Request body for the create call.
    pub fn request_body(&self) -> Value {
        serde_json::json!({ "data": self.document })
    }
}
