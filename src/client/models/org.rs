//! Organization models

use serde::{Deserialize, Serialize};

/// Organization resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Organization ID
    pub id: String,

    /// Organization name
    pub name: String,

    /// URL slug (optional, may not be in all responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Owning group ID (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Personal organizations are not attached to a group
    #[serde(default)]
    pub is_personal: bool,
}

impl Organization {
    /// Create an organization with only id and name set.
    #[cfg(test)]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            slug: None,
            group_id: None,
            is_personal: false,
        }
    }
}

/// `GET /groups/{group_id}/orgs` entry in JSON:API form
#[derive(Debug, Clone, Deserialize)]
pub struct OrgResource {
    pub id: String,

    #[serde(default)]
    pub attributes: OrgAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrgAttributes {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub group_id: Option<String>,

    #[serde(default)]
    pub is_personal: bool,
}

impl From<OrgResource> for Organization {
    fn from(resource: OrgResource) -> Self {
        let OrgAttributes {
            name,
            slug,
            group_id,
            is_personal,
        } = resource.attributes;

        Self {
            id: resource.id,
            name,
            slug,
            group_id,
            is_personal,
        }
    }
}
