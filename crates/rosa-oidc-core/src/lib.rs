//! rosa-oidc core
//!
//! Shared vocabulary for provisioning OIDC issuer configurations: the error
//! taxonomy, the port traits for external systems, the registry model and the
//! small naming helpers every other crate relies on.

pub mod arn;
pub mod error;
pub mod mode;
pub mod oidc_config;
pub mod ports;
pub mod tags;

pub use error::{CreatedResources, Error, Result};
pub use mode::Mode;
pub use oidc_config::{NewOidcConfig, OidcConfig};
