//! Command-line interface module
//!
//! This module handles all CLI argument parsing and command definitions.

pub mod args;
pub mod call;
pub mod init;
pub mod serve;
pub mod tools;

pub use args::*;
pub use call::handle_call_command;
pub use init::handle_init_command;
pub use serve::handle_serve_command;
pub use tools::handle_tools_command;

use vtsandbox_core::{AutoApprove, AutoReject, Confirmer, DialoguerConfirmer};

/// Build the confirmer selected on the command line
pub(crate) fn confirmer_for(mode: ConfirmMode) -> Box<dyn Confirmer> {
    match mode {
        ConfirmMode::Prompt => Box::new(DialoguerConfirmer::new()),
        ConfirmMode::Approve => Box::new(AutoApprove),
        ConfirmMode::Reject => Box::new(AutoReject),
    }
}
