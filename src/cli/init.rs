use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use vtsandbox_core::SandboxConfig;

/// Handle the init command
pub fn handle_init_command(workspace: &Path, force: bool) -> Result<()> {
    println!(
        "{}",
        style("Initialize VTSandbox configuration").blue().bold()
    );
    println!("Workspace: {}", workspace.display());
    println!("Force overwrite: {force}");

    let created = SandboxConfig::bootstrap_project(workspace, force)
        .with_context(|| "failed to initialize configuration files")?;

    if created.is_empty() {
        println!(
            "{}",
            style("Nothing to do: configuration already exists (use --force to overwrite)")
                .yellow()
        );
    } else {
        for file in created {
            println!("{} {}", style("Created").green(), file);
        }
    }

    Ok(())
}
