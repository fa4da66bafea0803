//! CLI argument parsing and configuration

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for vtsandbox
#[derive(Parser, Debug)]
#[command(
    name = "vtsandbox",
    version,
    about = "Sandboxed file viewing, editing and search tools for terminal coding agents"
)]
pub struct Cli {
    /// Workspace root directory; defaults to current directory
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); defaults to telemetry.log_level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tool specs offered to the reasoning service as JSON
    Tools,

    /// Execute a single tool call and print its result
    Call {
        /// Tool name, e.g. str_replace_editor
        name: String,

        /// Tool input as a JSON object
        input: String,

        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    /// Read one JSON tool call per line from stdin and write one JSON result per line
    Serve {
        #[command(flatten)]
        confirm: ConfirmArgs,
    },

    /// Write a default vtsandbox.toml and .toolignore into the workspace
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

/// How proposed edits are confirmed
#[derive(Args, Debug, Clone, Copy)]
pub struct ConfirmArgs {
    /// Approve every proposed edit without asking
    #[arg(long, conflicts_with = "no")]
    pub yes: bool,

    /// Reject every proposed edit without asking
    #[arg(long)]
    pub no: bool,
}

impl ConfirmArgs {
    pub fn mode(&self) -> ConfirmMode {
        if self.yes {
            ConfirmMode::Approve
        } else if self.no {
            ConfirmMode::Reject
        } else {
            ConfirmMode::Prompt
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    Prompt,
    Approve,
    Reject,
}
