//! Secrets Manager store for the issuer's private key.

use async_trait::async_trait;
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use aws_sdk_secretsmanager::types::Tag;
use rosa_oidc_core::ports::{NewSecret, SecretStore};
use rosa_oidc_core::tags::Tags;
use rosa_oidc_core::{Error, Result};
use tracing::{info, warn};

pub struct SecretsManagerStore {
    client: SecretsManagerClient,
    region: String,
}

impl SecretsManagerStore {
    /// `region` is the region `client` was configured for.
    pub fn new(client: SecretsManagerClient, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }
}

pub fn secret_tags(tags: &Tags) -> Vec<Tag> {
    tags.iter()
        .map(|(key, value)| Tag::builder().key(key).value(value).build())
        .collect()
}

#[async_trait]
impl SecretStore for SecretsManagerStore {
    async fn create_secret(&self, secret: NewSecret<'_>) -> Result<String> {
        if secret.region != self.region {
            warn!(
                requested = %secret.region,
                configured = %self.region,
                "Secret region differs from client region"
            );
        }

        let output = self
            .client
            .create_secret()
            .name(secret.name)
            .secret_string(secret.value)
            .description(secret.description)
            .set_tags(Some(secret_tags(secret.tags)))
            .send()
            .await
            .map_err(|e| Error::SecretStore(DisplayErrorContext(e).to_string()))?;

        let arn = output
            .arn()
            .ok_or_else(|| Error::SecretStore(format!("no ARN returned for secret '{}'", secret.name)))?;
        info!(name = %secret.name, "Created secret");
        Ok(arn.to_string())
    }
}
