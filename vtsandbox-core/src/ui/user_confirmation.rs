//! Interactive yes/no prompts for proposed edits
//!
//! Prompts go to stderr so stdout stays free for tool results.

use crate::config::constants::markers;
use crate::core::session::Confirmer;
use anyhow::Result;
use console::{Term, style};
use dialoguer::Confirm;

/// Asks the human at the terminal before any edit is written
#[derive(Debug, Default, Clone, Copy)]
pub struct DialoguerConfirmer;

impl DialoguerConfirmer {
    pub fn new() -> Self {
        Self
    }

    /// Preview text without the machine-readable sentinel
    fn display_text(preview: &str) -> &str {
        preview
            .strip_prefix(markers::CONFIRM_EDIT)
            .map(|rest| rest.trim_start_matches('\n'))
            .unwrap_or(preview)
    }
}

impl Confirmer for DialoguerConfirmer {
    fn confirm(&mut self, preview: &str) -> Result<bool> {
        let term = Term::stderr();
        term.write_line(&style("Edit Confirmation Required").yellow().bold().to_string())?;
        term.write_line("")?;
        for line in Self::display_text(preview).lines() {
            let styled = if line.starts_with('+') && !line.starts_with("+++") {
                style(line).green().to_string()
            } else if line.starts_with('-') && !line.starts_with("---") {
                style(line).red().to_string()
            } else if line.starts_with("@@") {
                style(line).cyan().to_string()
            } else {
                line.to_string()
            };
            term.write_line(&styled)?;
        }
        term.write_line("")?;

        let confirmed = Confirm::new()
            .with_prompt("Confirm changes")
            .default(false)
            .interact_on(&term)?;

        if confirmed {
            term.write_line(&style("Confirmed: applying changes").green().to_string())?;
        } else {
            term.write_line(&style("Cancelled: nothing was written").yellow().to_string())?;
        }

        Ok(confirmed)
    }
}
