use super::{ConfirmMode, confirmer_for};
use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use vtsandbox_core::{SandboxConfig, SandboxSession, ToolCall, ToolResult};

/// Handle the serve command: JSON lines in, JSON lines out
pub async fn handle_serve_command(
    workspace: &Path,
    config: SandboxConfig,
    mode: ConfirmMode,
) -> Result<()> {
    let session = SandboxSession::new(workspace, config)?;
    let mut confirmer = confirmer_for(mode);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut handled = 0usize;

    info!(workspace = %session.workspace().display(), "serving tool calls on stdin");
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read tool call from stdin")?
    {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let result = match serde_json::from_str::<ToolCall>(line) {
            Ok(call) => {
                debug!(id = %call.id, tool = %call.name, "tool call received");
                session.handle(&call, confirmer.as_mut()).await
            }
            Err(err) => ToolResult::error(String::new(), format!("Invalid tool call: {err}")),
        };

        let mut encoded =
            serde_json::to_string(&result).context("failed to serialize tool result")?;
        encoded.push('\n');
        stdout
            .write_all(encoded.as_bytes())
            .await
            .context("failed to write tool result")?;
        stdout.flush().await.context("failed to flush stdout")?;
        handled += 1;
    }

    info!(handled, "stdin closed, shutting down");
    Ok(())
}
