//! CLI command definitions.

use clap::{Args, Subcommand};
use rosa_oidc_core::Mode;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a resource
    Create {
        #[command(subcommand)]
        command: CreateCommands,
    },

    /// List resources
    List {
        #[command(subcommand)]
        command: ListCommands,
    },

    /// Show details of a resource
    Describe {
        #[command(subcommand)]
        command: DescribeCommands,
    },

    /// Delete a resource
    Delete {
        #[command(subcommand)]
        command: DeleteCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum CreateCommands {
    /// Create an OIDC configuration for STS clusters
    OidcConfig(CreateOidcConfigArgs),
}

#[derive(Args, Debug, Default)]
pub struct CreateOidcConfigArgs {
    /// How to perform the operation: auto or manual
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Let the registry host the issuer and its signing key
    #[arg(long)]
    pub managed: bool,

    /// Only write the generated files to the output directory
    #[arg(long)]
    pub raw_files: bool,

    /// Prefix for the generated bucket and secret names (max 15 characters)
    #[arg(long)]
    pub prefix: Option<String>,

    /// ARN of the installer role that will use the configuration
    #[arg(long)]
    pub installer_role_arn: Option<String>,

    /// AWS region
    #[arg(long)]
    pub region: Option<String>,

    /// Directory for generated files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// List OIDC configurations
    OidcConfigs,
}

#[derive(Subcommand)]
pub enum DescribeCommands {
    /// Show an OIDC configuration
    OidcConfig {
        /// OIDC configuration ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum DeleteCommands {
    /// Delete an OIDC configuration
    OidcConfig {
        /// OIDC configuration ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set configuration value
    Set {
        /// Key
        key: String,

        /// Value
        value: String,
    },
}
