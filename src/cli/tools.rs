use anyhow::{Context, Result};
use std::path::Path;
use vtsandbox_core::{SandboxConfig, SandboxSession};

/// Handle the tools command
pub fn handle_tools_command(workspace: &Path, config: SandboxConfig) -> Result<()> {
    let session = SandboxSession::new(workspace, config)?;
    let specs = serde_json::to_string_pretty(&session.tool_specs())
        .context("failed to serialize tool specs")?;
    println!("{specs}");
    Ok(())
}
