//! The create / list / describe / delete workflow behind the CLI.

use crate::bundle::ProvisioningBundle;
use crate::files::OutputDir;
use crate::options::{CreateOidcConfigOptions, ValidatedOptions};
use crate::strategy::{self, Backends, ProvisioningOutcome, Strategy, StrategyKind};
use rosa_oidc_auth::{KeyPair, generate_key_pair};
use rosa_oidc_core::ports::{ObjectStore, OidcConfigRegistry, RoleLookup, SecretStore};
use rosa_oidc_core::{Error, OidcConfig, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Produces the signing key pair for an unmanaged config.
pub type KeySource = fn() -> Result<KeyPair>;

/// Drives OIDC config provisioning against a set of backends.
#[derive(Clone)]
pub struct OidcConfigService {
    object_store: Arc<dyn ObjectStore>,
    secret_store: Arc<dyn SecretStore>,
    roles: Arc<dyn RoleLookup>,
    registry: Arc<dyn OidcConfigRegistry>,
    output: OutputDir,
    key_source: KeySource,
}

impl OidcConfigService {
    pub fn new(
        object_store: Arc<dyn ObjectStore>,
        secret_store: Arc<dyn SecretStore>,
        roles: Arc<dyn RoleLookup>,
        registry: Arc<dyn OidcConfigRegistry>,
    ) -> Self {
        Self {
            object_store,
            secret_store,
            roles,
            registry,
            output: OutputDir::current(),
            key_source: generate_key_pair,
        }
    }

    /// Write local files under `output` instead of the working directory.
    pub fn with_output_dir(mut self, output: OutputDir) -> Self {
        self.output = output;
        self
    }

    pub fn with_key_source(mut self, key_source: KeySource) -> Self {
        self.key_source = key_source;
        self
    }

    /// Validate, assemble and run the selected strategy.
    #[instrument(skip(self, options), fields(region = %options.region))]
    pub async fn create(&self, options: &CreateOidcConfigOptions) -> Result<ProvisioningOutcome> {
        let strategy = self.prepare(options).await?;
        self.execute(&strategy).await
    }

    /// Run a strategy returned by [`prepare`](Self::prepare).
    pub async fn execute(&self, strategy: &Strategy) -> Result<ProvisioningOutcome> {
        strategy
            .execute(
                Backends {
                    object_store: self.object_store.as_ref(),
                    secret_store: self.secret_store.as_ref(),
                    registry: self.registry.as_ref(),
                },
                &self.output,
            )
            .await
    }

    /// Run every check and build the strategy without touching any
    /// object, secret or registry backend.
    pub async fn prepare(&self, options: &CreateOidcConfigOptions) -> Result<Strategy> {
        let validated = options.validate()?;
        self.check_installer_role(&validated).await?;

        let kind = strategy::select(validated.raw_files, validated.managed, validated.mode);
        debug!(strategy = %kind, "Selected OIDC config strategy");

        let strategy = match kind {
            StrategyKind::ManagedAuto => Strategy::ManagedAuto,
            StrategyKind::Raw => Strategy::Raw {
                bundle: self.assemble(&validated)?,
            },
            StrategyKind::UnmanagedManual => Strategy::UnmanagedManual {
                bundle: self.assemble(&validated)?,
            },
            StrategyKind::UnmanagedAuto => Strategy::UnmanagedAuto {
                bundle: self.assemble(&validated)?,
                installer_role_arn: validated.installer_role_arn.clone(),
            },
        };
        Ok(strategy)
    }

    async fn check_installer_role(&self, validated: &ValidatedOptions) -> Result<()> {
        let Some(role_name) = validated.installer_role_name.as_deref() else {
            return Ok(());
        };
        let exists = self.roles.role_exists(role_name).await?;
        if !exists {
            return Err(Error::RoleNotFound(role_name.to_string()));
        }
        debug!(role = %role_name, "Installer role exists");
        Ok(())
    }

    fn assemble(&self, validated: &ValidatedOptions) -> Result<ProvisioningBundle> {
        ProvisioningBundle::assemble_with(&validated.prefix, &validated.region, self.key_source)
    }

    pub async fn list(&self) -> Result<Vec<OidcConfig>> {
        let configs = self.registry.list_oidc_configs().await?;
        debug!(count = configs.len(), "Listed OIDC configs");
        Ok(configs)
    }

    pub async fn describe(&self, id: &str) -> Result<OidcConfig> {
        self.registry.get_oidc_config(id).await
    }

    /// Remove the registry record. Customer-hosted resources are left alone.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.registry.delete_oidc_config(id).await?;
        info!(id = %id, "Deleted OIDC config");
        Ok(())
    }
}
