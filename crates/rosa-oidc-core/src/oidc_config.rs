//! OIDC configuration records held by the cluster-management registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An OIDC configuration as returned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OidcConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub issuer_url: String,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub reusable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installer_role_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_timestamp: Option<DateTime<Utc>>,
}

/// Request body for registering a new OIDC configuration.
///
/// A managed configuration carries only `managed = true`; the registry
/// provisions and owns everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOidcConfig {
    pub managed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_arn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installer_role_arn: Option<String>,
}

impl NewOidcConfig {
    /// A registry-hosted configuration.
    pub fn managed() -> Self {
        Self {
            managed: true,
            secret_arn: None,
            issuer_url: None,
            installer_role_arn: None,
        }
    }

    /// A customer-hosted configuration backed by the given secret and issuer.
    pub fn unmanaged(
        secret_arn: impl Into<String>,
        issuer_url: impl Into<String>,
        installer_role_arn: Option<String>,
    ) -> Self {
        Self {
            managed: false,
            secret_arn: Some(secret_arn.into()),
            issuer_url: Some(issuer_url.into()),
            installer_role_arn: installer_role_arn.filter(|arn| !arn.is_empty()),
        }
    }
}
