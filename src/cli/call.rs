use super::{ConfirmMode, confirmer_for};
use anyhow::{Context, Result, bail};
use console::style;
use serde_json::Value;
use std::path::Path;
use vtsandbox_core::{SandboxConfig, SandboxSession, ToolCall};

/// Handle the call command
pub async fn handle_call_command(
    workspace: &Path,
    config: SandboxConfig,
    name: &str,
    input: &str,
    mode: ConfirmMode,
) -> Result<()> {
    let input: Value =
        serde_json::from_str(input).with_context(|| "tool input must be valid JSON")?;
    let session = SandboxSession::new(workspace, config)?;
    let mut confirmer = confirmer_for(mode);

    let call = ToolCall::new("cli", name, input);
    let result = session.handle(&call, confirmer.as_mut()).await;

    if result.is_error {
        eprintln!("{}", style(&result.content).red());
        bail!("tool call '{}' failed", name);
    }

    println!("{}", result.content);
    Ok(())
}
