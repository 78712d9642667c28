//! REST client for the `clusters_mgmt` OIDC config collection.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode, Url};
use rosa_oidc_core::ports::OidcConfigRegistry;
use rosa_oidc_core::{Error, NewOidcConfig, OidcConfig, Result};
use serde::Deserialize;
use tracing::{debug, error, info};

/// Production API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openshift.com";

const OIDC_CONFIGS_PATH: &str = "/api/clusters_mgmt/v1/oidc_configs";

/// OCM API configuration.
#[derive(Clone)]
pub struct OcmConfig {
    /// API base URL.
    pub api_url: String,
    /// Bearer token. Requests are sent unauthenticated when `None`.
    pub token: Option<String>,
}

impl Default for OcmConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

impl std::fmt::Debug for OcmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcmConfig")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

/// OCM API client.
pub struct OcmClient {
    config: OcmConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OidcConfigList {
    #[serde(default)]
    items: Vec<OidcConfig>,
}

#[derive(Debug, Deserialize)]
struct OcmError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

impl OcmClient {
    pub fn new(config: OcmConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), OIDC_CONFIGS_PATH)
    }

    /// Collection URL plus `id` as a single, percent-encoded path segment.
    fn item_url(&self, id: &str) -> Result<Url> {
        let invalid = || Error::Registry(format!("Invalid API URL '{}'", self.config.api_url));
        let mut url = Url::parse(&self.collection_url()).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|_| invalid())?.push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        self.authorize(request)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))
    }

    /// Turn a non-success response into an error, preferring the API's reason.
    async fn check(response: Response, id: Option<&str>) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND
            && let Some(id) = id
        {
            return Err(Error::OidcConfigNotFound(id.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<OcmError>(&body) {
            Ok(OcmError {
                reason: Some(reason),
                code,
            }) => match code {
                Some(code) => format!("{} ({})", reason, code),
                None => reason,
            },
            _ => format!("API error: {}", status),
        };
        error!(status = %status, message = %message, "OCM request failed");
        Err(Error::Registry(message))
    }
}

#[async_trait]
impl OidcConfigRegistry for OcmClient {
    async fn create_oidc_config(&self, config: &NewOidcConfig) -> Result<OidcConfig> {
        debug!(managed = config.managed, "Registering OIDC config");
        let response = self
            .send(self.client.post(self.collection_url()).json(config))
            .await?;
        let created: OidcConfig = Self::check(response, None)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;
        info!(id = %created.id, managed = created.managed, "OIDC config registered");
        Ok(created)
    }

    async fn get_oidc_config(&self, id: &str) -> Result<OidcConfig> {
        let response = self.send(self.client.get(self.item_url(id)?)).await?;
        Self::check(response, Some(id))
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    async fn list_oidc_configs(&self) -> Result<Vec<OidcConfig>> {
        let request = self
            .client
            .get(self.collection_url())
            .query(&[("page", "1"), ("size", "-1")]);
        let response = self.send(request).await?;
        let list: OidcConfigList = Self::check(response, None)
            .await?
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;
        debug!(count = list.items.len(), "Listed OIDC configs");
        Ok(list.items)
    }

    async fn delete_oidc_config(&self, id: &str) -> Result<()> {
        let response = self.send(self.client.delete(self.item_url(id)?)).await?;
        Self::check(response, Some(id)).await?;
        info!(id = %id, "OIDC config deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = OcmClient::new(OcmConfig {
            api_url: "https://api.stage.openshift.com/".to_string(),
            token: None,
        });
        assert_eq!(
            client.collection_url(),
            "https://api.stage.openshift.com/api/clusters_mgmt/v1/oidc_configs"
        );
        assert_eq!(
            client.item_url("abc").unwrap().as_str(),
            "https://api.stage.openshift.com/api/clusters_mgmt/v1/oidc_configs/abc"
        );
    }

    #[test]
    fn test_item_url_escapes_id() {
        let client = OcmClient::new(OcmConfig::default());
        assert_eq!(
            client.item_url("../clusters?x=1").unwrap().as_str(),
            "https://api.openshift.com/api/clusters_mgmt/v1/oidc_configs/..%2Fclusters%3Fx=1"
        );
    }

    #[test]
    fn test_item_url_rejects_bad_api_url() {
        let client = OcmClient::new(OcmConfig {
            api_url: "not a url".to_string(),
            token: None,
        });
        assert!(matches!(client.item_url("abc"), Err(Error::Registry(_))));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = OcmConfig {
            token: Some("eyJhbGciOi".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("eyJhbGciOi"));
    }
}
