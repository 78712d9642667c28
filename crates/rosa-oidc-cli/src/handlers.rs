//! Command handlers.

use crate::commands::CreateOidcConfigArgs;
use crate::config::{CliConfig, OutputFormat};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use rosa_oidc_aws::AwsClients;
use rosa_oidc_core::OidcConfig;
use rosa_oidc_ocm::{OcmClient, OcmConfig};
use rosa_oidc_provision::command::join_commands;
use rosa_oidc_provision::{
    CreateOidcConfigOptions, OidcConfigService, OutputDir, ProvisioningOutcome, Strategy,
    StrategyKind,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

fn info(message: impl std::fmt::Display) {
    eprintln!("{} {}", style("I:").cyan().bold(), message);
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

async fn service(
    config: &CliConfig,
    region: &str,
    output_dir: Option<PathBuf>,
) -> OidcConfigService {
    debug!(region = %region, api_url = %config.api_url, "Connecting to AWS and OCM");
    let aws = AwsClients::load(region).await;
    let registry = OcmClient::new(OcmConfig {
        api_url: config.api_url.clone(),
        token: config.token.clone(),
    });

    let service = OidcConfigService::new(
        Arc::new(aws.object_store),
        Arc::new(aws.secret_store),
        Arc::new(aws.roles),
        Arc::new(registry),
    );
    match output_dir {
        Some(dir) => service.with_output_dir(OutputDir::new(dir)),
        None => service,
    }
}

/// Create an OIDC configuration.
pub async fn create_oidc_config(config: &CliConfig, args: CreateOidcConfigArgs) -> HandlerResult {
    let region = config.region(args.region.as_deref());
    let options = CreateOidcConfigOptions {
        mode: args.mode,
        managed: args.managed,
        raw_files: args.raw_files,
        prefix: args.prefix.unwrap_or_default(),
        installer_role_arn: args.installer_role_arn,
        region: region.clone(),
    };

    let service = service(config, &region, args.output_dir).await;
    let strategy = service.prepare(&options).await?;

    let pb = match &strategy {
        Strategy::UnmanagedAuto { bundle, .. } => {
            info(
                "This command will create a S3 bucket populating it with documents to be \
                 compliant with OIDC protocol. It will also create a Secret in Secrets Manager \
                 containing the private key",
            );
            info(format!(
                "Setting up unmanaged OIDC configuration '{}'",
                bundle.bucket_name()
            ));
            Some(spinner("Provisioning AWS resources..."))
        }
        Strategy::ManagedAuto => {
            info("Setting up managed OIDC configuration");
            Some(spinner("Registering OIDC configuration..."))
        }
        Strategy::Raw { .. } | Strategy::UnmanagedManual { .. } => None,
    };

    let result = service.execute(&strategy).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    report_outcome(&result?);
    Ok(())
}

fn report_outcome(outcome: &ProvisioningOutcome) {
    match outcome.kind {
        StrategyKind::Raw => {
            for file in &outcome.files {
                info(format!("Saved {}", file.display()));
            }
            info(
                "Please refer to documentation to use generated files to create an OIDC \
                 compliant configuration.",
            );
        }
        StrategyKind::UnmanagedManual => {
            println!("{}", join_commands(&outcome.commands));
            info(
                "Please run commands above to generate OIDC compliant configuration in your AWS \
                 account. After running the commands please refer to the documentation to \
                 register your unmanaged OIDC Configuration with OCM.",
            );
        }
        StrategyKind::UnmanagedAuto | StrategyKind::ManagedAuto => {
            let Some(id) = outcome.oidc_config_id() else {
                return;
            };
            println!(
                "{} Created OIDC configuration {}",
                style("✓").green(),
                style(id).bold()
            );
            if let Some(issuer_url) = &outcome.issuer_url {
                println!("  Issuer URL: {}", issuer_url);
            }
            info(format!(
                "Please run the following command to create a cluster with this oidc config\n\
                 rosa create cluster --sts --oidc-config-id {}",
                id
            ));
        }
    }
}

/// List OIDC configurations.
pub async fn list_oidc_configs(config: &CliConfig) -> HandlerResult {
    let service = service(config, &config.region(None), None).await;
    let configs = service.list().await?;

    match config.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&configs)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&configs)?),
        OutputFormat::Table => {
            if configs.is_empty() {
                println!("{} No OIDC configurations", style("i").blue());
                return Ok(());
            }
            print!("{}", render_table(&configs));
        }
    }
    Ok(())
}

fn render_table(configs: &[OidcConfig]) -> String {
    let id_width = configs
        .iter()
        .map(|c| c.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());
    let mut out = format!("{:<id_width$}  {:<7}  {}\n", "ID", "MANAGED", "ISSUER URL");
    for config in configs {
        out.push_str(&format!(
            "{:<id_width$}  {:<7}  {}\n",
            config.id, config.managed, config.issuer_url
        ));
    }
    out
}

/// Describe an OIDC configuration.
pub async fn describe_oidc_config(config: &CliConfig, id: &str) -> HandlerResult {
    let service = service(config, &config.region(None), None).await;
    let oidc_config = service.describe(id).await?;

    match config.output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&oidc_config)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&oidc_config)?),
        OutputFormat::Table => print!("{}", render_details(&oidc_config)),
    }
    Ok(())
}

fn render_details(config: &OidcConfig) -> String {
    let unset = "(not set)";
    let mut out = String::new();
    out.push_str(&format!("ID:                  {}\n", config.id));
    out.push_str(&format!("Managed:             {}\n", config.managed));
    out.push_str(&format!("Reusable:            {}\n", config.reusable));
    out.push_str(&format!("Issuer URL:          {}\n", config.issuer_url));
    out.push_str(&format!(
        "Secret ARN:          {}\n",
        config.secret_arn.as_deref().unwrap_or(unset)
    ));
    out.push_str(&format!(
        "Installer Role ARN:  {}\n",
        config.installer_role_arn.as_deref().unwrap_or(unset)
    ));
    if let Some(created) = config.creation_timestamp {
        out.push_str(&format!("Created:             {}\n", created.to_rfc3339()));
    }
    out
}

/// Delete an OIDC configuration.
pub async fn delete_oidc_config(config: &CliConfig, id: &str, yes: bool) -> HandlerResult {
    use dialoguer::Confirm;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete OIDC configuration {}?", id))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{} Cancelled", style("!").yellow());
            return Ok(());
        }
    }

    let service = service(config, &config.region(None), None).await;
    service.delete(id).await?;

    println!("{} OIDC configuration {} deleted", style("✓").green(), id);
    info("Customer-hosted resources such as the S3 bucket and secret are not removed.");
    Ok(())
}

/// Show configuration.
pub fn show_config(config: &CliConfig) -> HandlerResult {
    println!("Current configuration:");
    println!("  api_url: {}", config.api_url);
    println!(
        "  token: {}",
        if config.token.is_some() {
            "***"
        } else {
            "(not set)"
        }
    );
    println!(
        "  region: {}",
        config.region.as_deref().unwrap_or("(not set)")
    );
    println!("  output_format: {:?}", config.output_format);

    if let Ok(path) = CliConfig::config_path() {
        println!("\nConfig file: {}", path.display());
    }

    Ok(())
}

/// Set configuration.
pub fn set_config(key: &str, value: &str) -> HandlerResult {
    let mut config = CliConfig::load().unwrap_or_default();
    config.set(key, value)?;
    config.save()?;

    let shown = if key == "token" { "***" } else { value };
    println!("{} Set {} = {}", style("✓").green(), key, shown);
    Ok(())
}
