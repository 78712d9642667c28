//! Error types for rosa-oidc.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Validation errors
    #[error("{0}")]
    InvalidFlags(String),

    #[error("Invalid mode '{0}'. Allowed values are [auto manual]")]
    InvalidMode(String),

    #[error("Expected a valid prefix for the configuration: {0}")]
    InvalidPrefix(String),

    #[error("The bucket name '{0}' is not valid")]
    InvalidBucketName(String),

    #[error("Expected a valid ARN: {0}")]
    InvalidArn(String),

    #[error("Role '{0}' does not exist")]
    RoleNotFound(String),

    // Key material errors
    #[error("There was a problem generating key pair: {0}")]
    KeyGeneration(String),

    #[error("Malformed public key: {0}")]
    MalformedKey(String),

    #[error("Unsupported key type: {0}")]
    UnsupportedKeyType(String),

    // Remote provisioning errors
    #[error("There was a problem {operation}: {reason}{created}")]
    RemoteProvisioning {
        operation: String,
        reason: String,
        created: CreatedResources,
    },

    #[error("There was a problem saving {document} to a file: {reason}")]
    LocalOutput { document: String, reason: String },

    // Adapter errors
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Secrets Manager error: {0}")]
    SecretStore(String),

    #[error("IAM error: {0}")]
    Iam(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("OIDC config not found: {0}")]
    OidcConfigNotFound(String),

    // Infrastructure errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error was raised by client-side validation, before any
    /// remote call was attempted.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidFlags(_)
                | Error::InvalidMode(_)
                | Error::InvalidPrefix(_)
                | Error::InvalidBucketName(_)
                | Error::InvalidArn(_)
                | Error::RoleNotFound(_)
        )
    }

    /// Whether this error came from generating or reading key material.
    pub fn is_key_material(&self) -> bool {
        matches!(
            self,
            Error::KeyGeneration(_) | Error::MalformedKey(_) | Error::UnsupportedKeyType(_)
        )
    }

    /// Resources that already exist remotely when this error was raised.
    pub fn created_resources(&self) -> Option<&CreatedResources> {
        match self {
            Error::RemoteProvisioning { created, .. } => Some(created),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Identifiers of remote resources created before a provisioning step failed.
///
/// Nothing is rolled back automatically, so these are reported to the
/// operator to finish or clean up by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedResources {
    pub bucket_name: Option<String>,
    pub secret_arn: Option<String>,
    pub issuer_url: Option<String>,
}

impl CreatedResources {
    pub fn is_empty(&self) -> bool {
        self.bucket_name.is_none() && self.secret_arn.is_none() && self.issuer_url.is_none()
    }
}

impl fmt::Display for CreatedResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        write!(f, "\nAlready created:")?;
        if let Some(bucket) = &self.bucket_name {
            write!(f, "\n  Bucket: {}", bucket)?;
        }
        if let Some(arn) = &self.secret_arn {
            write!(f, "\n  Secret ARN: {}", arn)?;
        }
        if let Some(url) = &self.issuer_url {
            write!(f, "\n  Issuer URL: {}", url)?;
        }
        Ok(())
    }
}
