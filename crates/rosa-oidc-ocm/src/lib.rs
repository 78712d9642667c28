//! OpenShift Cluster Manager client for rosa-oidc.

pub mod client;

pub use client::{DEFAULT_API_URL, OcmClient, OcmConfig};
