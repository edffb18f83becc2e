//! CLM CLI - Command-line interface for organization administration
//!
//! Usage:
//!   clm roles compute --org-roles admin,editor --selected editor [--editing]
//!   clm roles check --role admin --granted admin,editor
//!   clm vars get --fixture f.json --org acme --end-user eu-1 [--name color]
//!   clm users list --fixture f.json --org acme [--ids u1,u2]
//!   clm users show --fixture f.json --org acme --id u1
//!   clm users add --fixture f.json --org acme --first-name Ada --last-name Lovelace --roles editor
//!   clm users edit --fixture f.json --org acme --id u1 --first-name Ada --last-name King
//!   clm users reset-password --fixture f.json --email ada@example.com

use clap::{Parser, Subcommand};
use cli::commands::{RolesCommand, UsersCommand, VarsCommand};
use cli::context::Context;
use shared::ClmConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clm")]
#[command(about = "CLM - Organization roles, users and end-user variables")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Role map computation and checks
    Roles(RolesCommand),
    /// End-user variable lookup
    Vars(VarsCommand),
    /// Organization user roster
    Users(UsersCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ClmConfig::load(cli.config.as_deref())?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(config = ?cli.config, log_level = %config.log_level, "Configuration loaded");

    let ctx = Context::new(config, cli.json);

    match cli.command {
        Commands::Roles(cmd) => cmd.run(&ctx),
        Commands::Vars(cmd) => cmd.run(&ctx).await,
        Commands::Users(cmd) => cmd.run(&ctx).await,
    }
}
