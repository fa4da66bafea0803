use super::history::EditOperation;
use crate::tools::path_guard::ValidatedPath;

/// File state a proposal was computed against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreImage {
    /// The file must still not exist
    Absent,
    /// The file must still hold exactly this content
    Content(String),
}

/// A computed mutation awaiting yes/no from the calling layer
#[derive(Debug, Clone)]
pub struct PendingChange {
    pub token: String,
    pub path: ValidatedPath,
    pub operation: EditOperation,
    /// Confirmation text shown to the human
    pub preview: String,
    pub new_content: String,
    pub expected: PreImage,
    /// Message returned once committed
    pub success_message: String,
}

#[derive(Debug, Clone)]
pub enum Proposal {
    /// Read-only or immediately applied commands
    Completed(String),
    Pending(PendingChange),
}
