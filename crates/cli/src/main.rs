//! okta-rm - Query role inheritance against an Okta org
//!
//! Usage:
//!   okta-rm has-link <login> <group>  - Check whether a user inherits a group
//!   okta-rm roles <login>             - List the groups of a user
//!   okta-rm users <group>             - List the ACTIVE members of a group
//!
//! Connection settings come from `--config <file>` and the `OKTA_DOMAIN` /
//! `OKTA_API_TOKEN` environment variables.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cli::commands::{HasLinkCommand, RolesCommand, UsersCommand};
use rbac::DirectoryRoleManager;
use shared::DirectoryConfig;

#[derive(Parser)]
#[command(name = "okta-rm")]
#[command(about = "Okta-backed role manager")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a user inherits a group
    HasLink(HasLinkCommand),
    /// List the groups a user belongs to
    Roles(RolesCommand),
    /// List the active members of a group
    Users(UsersCommand),
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<DirectoryConfig> {
    let config = match path {
        Some(path) => DirectoryConfig::from_file(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => DirectoryConfig::default(),
    };
    Ok(config.with_env())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    tracing::debug!(?config, "Loaded configuration");
    let rm = DirectoryRoleManager::from_config(&config)?;

    let output = match &cli.command {
        Commands::HasLink(cmd) => cmd.run(&rm, cli.json).await?,
        Commands::Roles(cmd) => cmd.run(&rm, cli.json).await?,
        Commands::Users(cmd) => cmd.run(&rm, cli.json).await?,
    };

    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}
