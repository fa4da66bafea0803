use crate::config::constants::files;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Security configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SecurityConfig {
    /// Require human confirmation before any mutating editor command is committed
    #[serde(default = "default_true")]
    pub human_in_the_loop: bool,

    /// Folders tools may touch in addition to the workspace root.
    /// Relative entries are resolved against the workspace root.
    #[serde(default)]
    pub allowed_folders: Vec<PathBuf>,

    /// Ignore-pattern file, relative to the workspace root unless absolute
    #[serde(default = "default_toolignore_path")]
    pub toolignore_path: PathBuf,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            human_in_the_loop: default_true(),
            allowed_folders: Vec::new(),
            toolignore_path: default_toolignore_path(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_toolignore_path() -> PathBuf {
    PathBuf::from(files::TOOLIGNORE)
}
