//! Command options and the checks that run before any side effect.

use crate::naming;
use rosa_oidc_core::arn::role_name_from_arn;
use rosa_oidc_core::{Error, Mode, Result};

const RAW_FILES_FLAG: &str = "raw-files";
const PREFIX_FLAG: &str = "prefix";
const MANAGED_FLAG: &str = "managed";
const INSTALLER_ROLE_ARN_FLAG: &str = "installer-role-arn";

/// Options for creating an OIDC config, as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct CreateOidcConfigOptions {
    /// `None` when the caller did not pass `--mode`.
    pub mode: Option<Mode>,
    pub managed: bool,
    pub raw_files: bool,
    pub prefix: String,
    pub installer_role_arn: Option<String>,
    pub region: String,
}

/// Options that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOptions {
    pub mode: Mode,
    pub managed: bool,
    pub raw_files: bool,
    pub prefix: String,
    pub installer_role_arn: Option<String>,
    /// Role name extracted from `installer_role_arn`.
    pub installer_role_name: Option<String>,
    pub region: String,
}

impl CreateOidcConfigOptions {
    /// Reject unsupported flag combinations and malformed values.
    ///
    /// Runs entirely client-side; nothing remote has been touched when this
    /// returns an error.
    pub fn validate(&self) -> Result<ValidatedOptions> {
        let installer_role_arn = self
            .installer_role_arn
            .as_deref()
            .map(str::trim)
            .filter(|arn| !arn.is_empty());
        // Any prefix at all conflicts with --managed, even blank.
        let prefix_set = !self.prefix.is_empty();

        if self.raw_files && self.mode.is_some() {
            return Err(unsupported_alongside(RAW_FILES_FLAG, "mode"));
        }
        if self.raw_files && installer_role_arn.is_some() {
            return Err(unsupported_alongside(RAW_FILES_FLAG, INSTALLER_ROLE_ARN_FLAG));
        }
        if self.raw_files && self.managed {
            return Err(unsupported_alongside(RAW_FILES_FLAG, MANAGED_FLAG));
        }
        if self.managed && prefix_set {
            return Err(unsupported_for_managed(PREFIX_FLAG));
        }
        if self.managed && installer_role_arn.is_some() {
            return Err(unsupported_for_managed(INSTALLER_ROLE_ARN_FLAG));
        }

        if self.region.trim().is_empty() {
            return Err(Error::InvalidFlags("A region is required".to_string()));
        }

        let prefix = if self.managed {
            String::new()
        } else {
            naming::normalize_prefix(&self.prefix)?
        };

        let installer_role_name = installer_role_arn
            .map(|arn| role_name_from_arn(arn).map(str::to_string))
            .transpose()?;

        Ok(ValidatedOptions {
            mode: self.mode.unwrap_or_default(),
            managed: self.managed,
            raw_files: self.raw_files,
            prefix,
            installer_role_arn: installer_role_arn.map(str::to_string),
            installer_role_name,
            region: self.region.trim().to_string(),
        })
    }
}

fn unsupported_alongside(flag: &str, other: &str) -> Error {
    Error::InvalidFlags(format!(
        "--{} param is not supported alongside --{} param",
        flag, other
    ))
}

fn unsupported_for_managed(flag: &str) -> Error {
    Error::InvalidFlags(format!(
        "--{} param is not supported for managed OIDC config",
        flag
    ))
}
