//! Provisioning strategies.
//!
//! Exactly one strategy runs per invocation. [`select`] picks the kind from
//! the validated flags; [`Strategy`] carries the data that kind needs, so a
//! managed strategy never holds key material and an unmanaged one always does.

use crate::bundle::ProvisioningBundle;
use crate::files::OutputDir;
use crate::steps::{self, StepOutput};
use rosa_oidc_core::ports::{ObjectStore, OidcConfigRegistry, SecretStore};
use rosa_oidc_core::{CreatedResources, Error, Mode, NewOidcConfig, OidcConfig, Result};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::{info, warn};

/// Which strategy handles an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Write the generated files locally and stop.
    Raw,
    /// Create the AWS resources and register the config.
    UnmanagedAuto,
    /// Write the files and print the equivalent AWS CLI commands.
    UnmanagedManual,
    /// Ask the registry to host everything.
    ManagedAuto,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrategyKind::Raw => "raw",
            StrategyKind::UnmanagedAuto => "unmanaged-auto",
            StrategyKind::UnmanagedManual => "unmanaged-manual",
            StrategyKind::ManagedAuto => "managed-auto",
        };
        f.write_str(name)
    }
}

/// Pick a strategy. Raw files win over managed, which wins over the mode.
pub fn select(raw_files: bool, managed: bool, mode: Mode) -> StrategyKind {
    if raw_files {
        return StrategyKind::Raw;
    }
    if managed {
        return StrategyKind::ManagedAuto;
    }
    match mode {
        Mode::Auto => StrategyKind::UnmanagedAuto,
        Mode::Manual => StrategyKind::UnmanagedManual,
    }
}

/// A selected strategy and the data it runs with.
#[derive(Debug)]
pub enum Strategy {
    Raw {
        bundle: ProvisioningBundle,
    },
    UnmanagedAuto {
        bundle: ProvisioningBundle,
        installer_role_arn: Option<String>,
    },
    UnmanagedManual {
        bundle: ProvisioningBundle,
    },
    ManagedAuto,
}

/// The systems a strategy may touch.
#[derive(Clone, Copy)]
pub struct Backends<'a> {
    pub object_store: &'a dyn ObjectStore,
    pub secret_store: &'a dyn SecretStore,
    pub registry: &'a dyn OidcConfigRegistry,
}

/// What a strategy produced.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningOutcome {
    pub kind: StrategyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oidc_config: Option<OidcConfig>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<String>,
}

impl ProvisioningOutcome {
    fn new(kind: StrategyKind) -> Self {
        Self {
            kind,
            bucket_name: None,
            issuer_url: None,
            secret_arn: None,
            oidc_config: None,
            files: vec![],
            commands: vec![],
        }
    }

    /// ID of the registered config, when one was registered.
    pub fn oidc_config_id(&self) -> Option<&str> {
        self.oidc_config.as_ref().map(|config| config.id.as_str())
    }
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Raw { .. } => StrategyKind::Raw,
            Strategy::UnmanagedAuto { .. } => StrategyKind::UnmanagedAuto,
            Strategy::UnmanagedManual { .. } => StrategyKind::UnmanagedManual,
            Strategy::ManagedAuto => StrategyKind::ManagedAuto,
        }
    }

    pub fn bundle(&self) -> Option<&ProvisioningBundle> {
        match self {
            Strategy::Raw { bundle }
            | Strategy::UnmanagedAuto { bundle, .. }
            | Strategy::UnmanagedManual { bundle } => Some(bundle),
            Strategy::ManagedAuto => None,
        }
    }

    pub async fn execute(
        &self,
        backends: Backends<'_>,
        output: &OutputDir,
    ) -> Result<ProvisioningOutcome> {
        info!(strategy = %self.kind(), "Executing OIDC config strategy");
        match self {
            Strategy::Raw { bundle } => write_raw_files(bundle, output).await,
            Strategy::UnmanagedAuto {
                bundle,
                installer_role_arn,
            } => provision_unmanaged(bundle, installer_role_arn.clone(), backends).await,
            Strategy::UnmanagedManual { bundle } => render_manual_commands(bundle, output).await,
            Strategy::ManagedAuto => register_managed(backends.registry).await,
        }
    }
}

async fn save_bundle_files(bundle: &ProvisioningBundle, output: &OutputDir) -> Result<Vec<PathBuf>> {
    let private_key = output
        .save_private_key(bundle.private_key_filename(), bundle.private_key())
        .await
        .map_err(|e| local_write_error("private key", e))?;
    let discovery_document = output
        .save_document(
            &bundle.discovery_document_filename(),
            bundle.discovery_document().as_bytes(),
        )
        .await
        .map_err(|e| local_write_error("discovery document", e))?;
    let jwks = output
        .save_document(&bundle.jwks_filename(), bundle.jwks())
        .await
        .map_err(|e| local_write_error("JSON Web Key Set", e))?;
    Ok(vec![private_key, discovery_document, jwks])
}

fn local_write_error(document: &str, err: Error) -> Error {
    Error::LocalOutput {
        document: document.to_string(),
        reason: err.to_string(),
    }
}

async fn write_raw_files(
    bundle: &ProvisioningBundle,
    output: &OutputDir,
) -> Result<ProvisioningOutcome> {
    let files = save_bundle_files(bundle, output).await?;
    let mut outcome = ProvisioningOutcome::new(StrategyKind::Raw);
    outcome.bucket_name = Some(bundle.bucket_name().to_string());
    outcome.issuer_url = Some(bundle.issuer_url().to_string());
    outcome.files = files;
    Ok(outcome)
}

async fn render_manual_commands(
    bundle: &ProvisioningBundle,
    output: &OutputDir,
) -> Result<ProvisioningOutcome> {
    let files = save_bundle_files(bundle, output).await?;
    let commands = steps::plan(bundle)
        .iter()
        .flat_map(|step| step.to_cli_commands(output.path()))
        .collect();

    let mut outcome = ProvisioningOutcome::new(StrategyKind::UnmanagedManual);
    outcome.bucket_name = Some(bundle.bucket_name().to_string());
    outcome.issuer_url = Some(bundle.issuer_url().to_string());
    outcome.files = files;
    outcome.commands = commands;
    Ok(outcome)
}

async fn provision_unmanaged(
    bundle: &ProvisioningBundle,
    installer_role_arn: Option<String>,
    backends: Backends<'_>,
) -> Result<ProvisioningOutcome> {
    let mut created = CreatedResources::default();

    for step in steps::plan(bundle) {
        let output = step
            .apply(backends.object_store, backends.secret_store)
            .await
            .map_err(|e| {
                warn!(step = step.name(), error = %e, "Provisioning step failed");
                Error::RemoteProvisioning {
                    operation: step.operation(),
                    reason: e.to_string(),
                    created: created.clone(),
                }
            })?;

        match (&step, output) {
            (steps::ProvisioningStep::CreateBucket { bucket, .. }, _) => {
                created.bucket_name = Some(bucket.to_string());
            }
            (steps::ProvisioningStep::PutObject { key, .. }, _)
                if *key == rosa_oidc_auth::oidc::DISCOVERY_DOCUMENT_KEY =>
            {
                created.issuer_url = Some(bundle.issuer_url().to_string());
            }
            (_, StepOutput::SecretArn(arn)) => {
                created.secret_arn = Some(arn);
            }
            _ => {}
        }
    }

    let secret_arn = created.secret_arn.clone().ok_or_else(|| {
        Error::Internal("secret creation did not return an ARN".to_string())
    })?;
    let request = NewOidcConfig::unmanaged(
        secret_arn.clone(),
        bundle.issuer_url(),
        installer_role_arn,
    );
    let oidc_config = backends
        .registry
        .create_oidc_config(&request)
        .await
        .map_err(|e| Error::RemoteProvisioning {
            operation: "building your unmanaged OIDC Configuration with OCM".to_string(),
            reason: e.to_string(),
            created: created.clone(),
        })?;
    info!(id = %oidc_config.id, bucket = %bundle.bucket_name(), "Registered unmanaged OIDC config");

    let mut outcome = ProvisioningOutcome::new(StrategyKind::UnmanagedAuto);
    outcome.bucket_name = Some(bundle.bucket_name().to_string());
    outcome.issuer_url = Some(bundle.issuer_url().to_string());
    outcome.secret_arn = Some(secret_arn);
    outcome.oidc_config = Some(oidc_config);
    Ok(outcome)
}

async fn register_managed(registry: &dyn OidcConfigRegistry) -> Result<ProvisioningOutcome> {
    let oidc_config = registry
        .create_oidc_config(&NewOidcConfig::managed())
        .await
        .map_err(|e| Error::RemoteProvisioning {
            operation: "registering your managed OIDC Configuration".to_string(),
            reason: e.to_string(),
            created: CreatedResources::default(),
        })?;
    info!(id = %oidc_config.id, "Registered managed OIDC config");

    let mut outcome = ProvisioningOutcome::new(StrategyKind::ManagedAuto);
    outcome.issuer_url = Some(oidc_config.issuer_url.clone()).filter(|url| !url.is_empty());
    outcome.oidc_config = Some(oidc_config);
    Ok(outcome)
}
