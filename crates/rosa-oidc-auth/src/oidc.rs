//! OIDC discovery document generation.

use crate::jwks::{SIGNING_ALGORITHM, to_indented_json};
use rosa_oidc_core::Result;
use serde::{Deserialize, Serialize};

/// Object key of the JWKS relative to the issuer root.
pub const JWKS_KEY: &str = "keys.json";

/// Object key of the discovery document relative to the issuer root.
pub const DISCOVERY_DOCUMENT_KEY: &str = ".well-known/openid-configuration";

/// OIDC discovery document for a service-account token issuer.
///
/// Only the fields the token-issuing workflow needs are populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcDiscoveryDocument {
    pub issuer: String,
    pub jwks_uri: String,
    pub response_types_supported: Vec<String>,
    pub subject_types_supported: Vec<String>,
    pub id_token_signing_alg_values_supported: Vec<String>,
    pub claims_supported: Vec<String>,
}

impl OidcDiscoveryDocument {
    /// Create the discovery document for an issuer URL.
    pub fn new(issuer_url: &str) -> Self {
        Self {
            issuer: issuer_url.to_string(),
            jwks_uri: format!("{}/{}", issuer_url, JWKS_KEY),
            response_types_supported: vec!["id_token".to_string()],
            subject_types_supported: vec!["public".to_string()],
            id_token_signing_alg_values_supported: vec![SIGNING_ALGORITHM.to_string()],
            claims_supported: ["aud", "exp", "sub", "iat", "iss"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }

    /// Render as tab-indented JSON.
    pub fn render(&self) -> Result<String> {
        let bytes = to_indented_json(self, b"\t")?;
        String::from_utf8(bytes)
            .map_err(|e| rosa_oidc_core::Error::Serialization(e.to_string()))
    }
}

/// Build the discovery document JSON bound to `issuer_url`.
pub fn build_discovery_document(issuer_url: &str) -> Result<String> {
    OidcDiscoveryDocument::new(issuer_url).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISSUER: &str = "https://oidc-ab12.s3.us-east-1.amazonaws.com";

    #[test]
    fn test_issuer_and_jwks_uri() {
        let rendered = build_discovery_document(ISSUER).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(doc["issuer"], ISSUER);
        assert_eq!(doc["jwks_uri"], format!("{}/keys.json", ISSUER));
    }

    #[test]
    fn test_fixed_shape() {
        let rendered = build_discovery_document(ISSUER).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let object = doc.as_object().unwrap();

        assert_eq!(object.len(), 6);
        assert_eq!(doc["response_types_supported"], serde_json::json!(["id_token"]));
        assert_eq!(doc["subject_types_supported"], serde_json::json!(["public"]));
        assert_eq!(
            doc["id_token_signing_alg_values_supported"],
            serde_json::json!(["RS256"])
        );
        assert_eq!(
            doc["claims_supported"],
            serde_json::json!(["aud", "exp", "sub", "iat", "iss"])
        );
    }

    #[test]
    fn test_tab_indented() {
        let rendered = build_discovery_document(ISSUER).unwrap();
        assert!(rendered.starts_with("{\n\t\"issuer\": \"https://oidc-ab12"));
        assert!(rendered.contains("\n\t\t\"id_token\"\n"));
    }
}
