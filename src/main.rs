//! vtsandbox: run sandboxed coding-agent tool calls from the command line

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vtsandbox_core::ConfigManager;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let workspace = match args.workspace.clone() {
        Some(workspace) => workspace,
        None => std::env::current_dir().context("cannot determine current dir")?,
    };

    let manager = match &args.config {
        Some(path) => ConfigManager::load_from_file(path)?,
        None => ConfigManager::load_from_workspace(&workspace)?,
    };

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| manager.config().telemetry.log_level.clone());
    init_tracing(&log_level);

    match manager.config_path() {
        Some(path) => debug!(path = %path.display(), "loaded configuration"),
        None => debug!("using default configuration"),
    }
    let config = manager.into_config();

    match args.command {
        Commands::Tools => cli::handle_tools_command(&workspace, config),
        Commands::Call {
            name,
            input,
            confirm,
        } => cli::handle_call_command(&workspace, config, &name, &input, confirm.mode()).await,
        Commands::Serve { confirm } => {
            cli::handle_serve_command(&workspace, config, confirm.mode()).await
        }
        Commands::Init { force } => cli::handle_init_command(&workspace, force),
    }
}

/// Logs go to stderr; `RUST_LOG` takes precedence over the configured level
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
