//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the provisioning core and the
//! external systems it drives: object storage, secret storage, IAM and the
//! cluster-management registry. Each call is a single blocking operation from
//! the core's point of view; timeouts and retries belong to the adapter.

use crate::oidc_config::{NewOidcConfig, OidcConfig};
use crate::tags::Tags;
use crate::Result;
use async_trait::async_trait;

/// Object storage holding the public discovery artifacts.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create a bucket.
    async fn create_bucket(&self, bucket: NewBucket<'_>) -> Result<()>;

    /// Remove the bucket's public access block so public-read objects are served.
    async fn delete_public_access_block(&self, bucket: &str) -> Result<()>;

    /// Replace the bucket's tag set.
    async fn put_bucket_tagging(&self, bucket: &str, tags: &Tags) -> Result<()>;

    /// Upload an object readable by anyone.
    async fn put_public_read_object(&self, object: PublicObject<'_>) -> Result<()>;
}

/// A bucket to create.
#[derive(Debug, Clone, Copy)]
pub struct NewBucket<'a> {
    pub name: &'a str,
    pub region: &'a str,
    /// S3 object ownership setting, e.g. `BucketOwnerPreferred`.
    pub object_ownership: &'a str,
}

/// A public-read object upload.
#[derive(Debug, Clone, Copy)]
pub struct PublicObject<'a> {
    pub bucket: &'a str,
    pub key: &'a str,
    pub body: &'a [u8],
    pub content_type: &'a str,
    pub tags: &'a Tags,
}

/// Secret storage holding the private signing key.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Create a secret and return its ARN.
    async fn create_secret(&self, secret: NewSecret<'_>) -> Result<String>;
}

/// A secret to create.
#[derive(Clone, Copy)]
pub struct NewSecret<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub description: &'a str,
    pub region: &'a str,
    pub tags: &'a Tags,
}

impl std::fmt::Debug for NewSecret<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewSecret")
            .field("name", &self.name)
            .field("value", &"***")
            .field("description", &self.description)
            .field("region", &self.region)
            .field("tags", &self.tags)
            .finish()
    }
}

/// IAM lookups used to validate the installer role.
#[async_trait]
pub trait RoleLookup: Send + Sync {
    /// Check whether a role with this name exists.
    async fn role_exists(&self, role_name: &str) -> Result<bool>;
}

/// Remote registry of OIDC configurations.
#[async_trait]
pub trait OidcConfigRegistry: Send + Sync {
    /// Register a new OIDC configuration.
    async fn create_oidc_config(&self, config: &NewOidcConfig) -> Result<OidcConfig>;

    /// Get a configuration by ID.
    async fn get_oidc_config(&self, id: &str) -> Result<OidcConfig>;

    /// List all configurations visible to the caller.
    async fn list_oidc_configs(&self) -> Result<Vec<OidcConfig>>;

    /// Delete a configuration.
    async fn delete_oidc_config(&self, id: &str) -> Result<()>;
}
