//! Provisioning bundle assembly.

use crate::naming;
use rosa_oidc_auth::{KeyPair, build_discovery_document, build_jwks, generate_key_pair};
use rosa_oidc_core::Result;
use std::fmt;
use tracing::{debug, info};

/// Everything an unmanaged strategy publishes, derived once per invocation.
///
/// Fields are private: the issuer URL, discovery document and JWKS are
/// computed together and cannot be changed independently afterwards.
#[derive(Clone)]
pub struct ProvisioningBundle {
    bucket_name: String,
    region: String,
    issuer_url: String,
    private_key: String,
    public_key: String,
    private_key_filename: String,
    private_key_secret_name: String,
    discovery_document: String,
    jwks: Vec<u8>,
}

impl ProvisioningBundle {
    /// Assemble a bundle with a freshly generated signing key.
    pub fn assemble(prefix: &str, region: &str) -> Result<Self> {
        Self::assemble_with(prefix, region, generate_key_pair)
    }

    /// Assemble a bundle, taking key material from `key_source`.
    ///
    /// The bucket name is validated before any key is generated.
    pub fn assemble_with<F>(prefix: &str, region: &str, key_source: F) -> Result<Self>
    where
        F: FnOnce() -> Result<KeyPair>,
    {
        let label = naming::random_label(naming::RANDOM_LABEL_LENGTH);
        let bucket_name = naming::bucket_name(prefix, &label);
        naming::validate_bucket_name(&bucket_name)?;

        let private_key_secret_name = naming::private_key_secret_name(&bucket_name);
        let issuer_url = naming::issuer_url(&bucket_name, region);
        debug!(bucket = %bucket_name, issuer_url = %issuer_url, "Derived OIDC config names");

        let key_pair = key_source()?;
        let private_key_filename = naming::private_key_filename(&private_key_secret_name);
        let discovery_document = build_discovery_document(&issuer_url)?;
        let jwks = build_jwks(&key_pair.public_key_pem)?;

        info!(bucket = %bucket_name, region = %region, "Assembled OIDC config input");
        Ok(Self {
            bucket_name,
            region: region.to_string(),
            issuer_url,
            private_key: key_pair.private_key_pem,
            public_key: key_pair.public_key_pem,
            private_key_filename,
            private_key_secret_name,
            discovery_document,
            jwks,
        })
    }

    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn issuer_url(&self) -> &str {
        &self.issuer_url
    }

    /// PKCS#1 PEM. Only ever written to secret storage or a local file.
    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn private_key_filename(&self) -> &str {
        &self.private_key_filename
    }

    pub fn private_key_secret_name(&self) -> &str {
        &self.private_key_secret_name
    }

    pub fn discovery_document(&self) -> &str {
        &self.discovery_document
    }

    pub fn jwks(&self) -> &[u8] {
        &self.jwks
    }

    pub fn discovery_document_filename(&self) -> String {
        naming::discovery_document_filename(&self.bucket_name)
    }

    pub fn jwks_filename(&self) -> String {
        naming::jwks_filename(&self.bucket_name)
    }
}

impl fmt::Debug for ProvisioningBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisioningBundle")
            .field("bucket_name", &self.bucket_name)
            .field("region", &self.region)
            .field("issuer_url", &self.issuer_url)
            .field("private_key", &"***")
            .field("private_key_filename", &self.private_key_filename)
            .field("private_key_secret_name", &self.private_key_secret_name)
            .finish_non_exhaustive()
    }
}
