use crate::config::constants::{editor, files, output, search};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tool execution configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Settings for `str_replace_editor`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EditorConfig {
    /// Backup directory, relative to the workspace root unless absolute
    #[serde(default = "default_backup_dir")]
    pub backup_dir: PathBuf,

    /// Maximum number of lines returned by a single `view`
    #[serde(default = "default_max_view_lines")]
    pub max_view_lines: usize,

    /// Characters of new file content shown when confirming `create`
    #[serde(default = "default_create_preview_chars")]
    pub create_preview_chars: usize,

    /// Context lines around each hunk of a proposed diff
    #[serde(default = "default_diff_context_lines")]
    pub diff_context_lines: usize,

    /// Character budget of a directory listing
    #[serde(default = "default_listing_max_chars")]
    pub listing_max_chars: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            backup_dir: default_backup_dir(),
            max_view_lines: default_max_view_lines(),
            create_preview_chars: default_create_preview_chars(),
            diff_context_lines: default_diff_context_lines(),
            listing_max_chars: default_listing_max_chars(),
        }
    }
}

/// Settings for `file_content_search`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Fuzzy scores must be strictly above this value (0-100)
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: u8,

    #[serde(default = "default_fuzzy_results")]
    pub default_fuzzy_results: usize,

    #[serde(default = "default_content_results")]
    pub default_content_results: usize,

    #[serde(default = "default_max_per_file")]
    pub default_max_per_file: usize,

    /// Files larger than this many bytes are skipped by content search
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Leading bytes inspected for a NUL byte
    #[serde(default = "default_binary_sniff_bytes")]
    pub binary_sniff_bytes: usize,

    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    #[serde(default = "default_file_results_max_chars")]
    pub file_results_max_chars: usize,

    #[serde(default = "default_content_results_max_chars")]
    pub content_results_max_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            default_fuzzy_results: default_fuzzy_results(),
            default_content_results: default_content_results(),
            default_max_per_file: default_max_per_file(),
            max_file_size: default_max_file_size(),
            binary_sniff_bytes: default_binary_sniff_bytes(),
            context_lines: default_context_lines(),
            file_results_max_chars: default_file_results_max_chars(),
            content_results_max_chars: default_content_results_max_chars(),
        }
    }
}

/// Bounds applied to every tool result
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "default_max_result_chars")]
    pub max_result_chars: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_result_chars: default_max_result_chars(),
        }
    }
}

fn default_backup_dir() -> PathBuf {
    PathBuf::from(files::BACKUP_DIR)
}
fn default_max_view_lines() -> usize {
    editor::MAX_VIEW_LINES
}
fn default_create_preview_chars() -> usize {
    editor::CREATE_PREVIEW_CHARS
}
fn default_diff_context_lines() -> usize {
    editor::DIFF_CONTEXT_LINES
}
fn default_listing_max_chars() -> usize {
    editor::LISTING_MAX_CHARS
}
fn default_fuzzy_threshold() -> u8 {
    search::FUZZY_THRESHOLD
}
fn default_fuzzy_results() -> usize {
    search::DEFAULT_FUZZY_RESULTS
}
fn default_content_results() -> usize {
    search::DEFAULT_CONTENT_RESULTS
}
fn default_max_per_file() -> usize {
    search::DEFAULT_MAX_PER_FILE
}
fn default_max_file_size() -> u64 {
    search::MAX_FILE_SIZE
}
fn default_binary_sniff_bytes() -> usize {
    search::BINARY_PROBE_BYTES
}
fn default_context_lines() -> usize {
    search::CONTEXT_LINES
}
fn default_file_results_max_chars() -> usize {
    search::FILE_RESULTS_MAX_CHARS
}
fn default_content_results_max_chars() -> usize {
    search::CONTENT_RESULTS_MAX_CHARS
}
fn default_max_result_chars() -> usize {
    output::MAX_RESULT_CHARS
}
