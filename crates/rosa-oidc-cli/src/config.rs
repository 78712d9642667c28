//! CLI configuration management.

use rosa_oidc_ocm::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Region used when neither the flag, the environment nor the file set one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Registry API URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Registry bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Default AWS region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Output format for list and describe.
    #[serde(default)]
    pub output_format: OutputFormat,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            region: None,
            output_format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

impl CliConfig {
    /// Load configuration from file.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let dirs = directories::ProjectDirs::from("com", "redhat", "rosa-oidc")
            .ok_or("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.yaml"))
    }

    /// Apply `OCM_URL`, `OCM_TOKEN` and `AWS_REGION` from `env`.
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |name: &str| env(name).filter(|value| !value.trim().is_empty());
        if let Some(url) = set("OCM_URL") {
            self.api_url = url;
        }
        if let Some(token) = set("OCM_TOKEN") {
            self.token = Some(token);
        }
        if let Some(region) = set("AWS_REGION") {
            self.region = Some(region);
        }
        self
    }

    /// The region to use: `flag`, then the configured region, then the default.
    pub fn region(&self, flag: Option<&str>) -> String {
        flag.map(str::trim)
            .filter(|region| !region.is_empty())
            .or(self.region.as_deref())
            .unwrap_or(DEFAULT_REGION)
            .to_string()
    }

    /// Set a configuration value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "api_url" => self.api_url = value.to_string(),
            "token" => self.token = Some(value.to_string()),
            "region" => self.region = Some(value.to_string()),
            "output_format" => {
                self.output_format = match value {
                    "table" => OutputFormat::Table,
                    "json" => OutputFormat::Json,
                    "yaml" => OutputFormat::Yaml,
                    _ => return Err(format!("Invalid output format: {}", value)),
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }
}
