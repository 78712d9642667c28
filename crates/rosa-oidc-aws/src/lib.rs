//! AWS adapters for rosa-oidc.
//!
//! Implements the object store, secret store and role lookup ports on top of
//! the AWS SDK. Credentials and endpoints come from the standard AWS
//! environment (profiles, env vars, instance metadata).

pub mod iam;
pub mod s3;
pub mod secrets;

pub use iam::IamRoleLookup;
pub use s3::S3ObjectStore;
pub use secrets::SecretsManagerStore;

use aws_config::{BehaviorVersion, Region};
use tracing::debug;

/// Adapters sharing one loaded AWS configuration.
pub struct AwsClients {
    pub object_store: S3ObjectStore,
    pub secret_store: SecretsManagerStore,
    pub roles: IamRoleLookup,
}

impl AwsClients {
    /// Load credentials from the environment, pinned to `region`.
    pub async fn load(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        debug!(region = %region, "Loaded AWS configuration");

        Self {
            object_store: S3ObjectStore::new(aws_sdk_s3::Client::new(&config)),
            secret_store: SecretsManagerStore::new(
                aws_sdk_secretsmanager::Client::new(&config),
                region,
            ),
            roles: IamRoleLookup::new(aws_sdk_iam::Client::new(&config)),
        }
    }
}
