//! OIDC config provisioning.
//!
//! Turns the create command's options into one of four strategies and runs
//! it: write raw files, print manual AWS CLI commands, create the AWS
//! resources and register them, or ask the registry for a managed config.

pub mod bundle;
pub mod command;
pub mod files;
pub mod naming;
pub mod options;
pub mod service;
pub mod steps;
pub mod strategy;

pub use bundle::ProvisioningBundle;
pub use files::OutputDir;
pub use options::{CreateOidcConfigOptions, ValidatedOptions};
pub use service::{KeySource, OidcConfigService};
pub use strategy::{ProvisioningOutcome, Strategy, StrategyKind};
