//! rosa-oidc CLI entrypoint.

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod handlers;

use commands::{
    Commands, ConfigCommands, CreateCommands, DeleteCommands, DescribeCommands, ListCommands,
};
use config::CliConfig;

#[derive(Parser)]
#[command(name = "rosa-oidc")]
#[command(author, version, about = "Provision OIDC configurations for ROSA STS clusters", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::load()
        .unwrap_or_default()
        .with_env(|name| std::env::var(name).ok());

    match cli.command {
        Commands::Create { command } => match command {
            CreateCommands::OidcConfig(args) => handlers::create_oidc_config(&config, args).await?,
        },
        Commands::List { command } => match command {
            ListCommands::OidcConfigs => handlers::list_oidc_configs(&config).await?,
        },
        Commands::Describe { command } => match command {
            DescribeCommands::OidcConfig { id } => {
                handlers::describe_oidc_config(&config, &id).await?
            }
        },
        Commands::Delete { command } => match command {
            DeleteCommands::OidcConfig { id, yes } => {
                handlers::delete_oidc_config(&config, &id, yes).await?
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => handlers::show_config(&config)?,
            ConfigCommands::Set { key, value } => handlers::set_config(&key, &value)?,
        },
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr; stdout carries the manual-mode commands.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        eprintln!("{} {}", style("E:").red().bold(), err);
        std::process::exit(1);
    }
    Ok(())
}
