/// Tool name constants shared by the registry, declarations and tests
pub mod tools {
    pub const STR_REPLACE_EDITOR: &str = "str_replace_editor";
    pub const FILE_CONTENT_SEARCH: &str = "file_content_search";
}

/// Editor command names accepted by `str_replace_editor`
pub mod commands {
    pub const VIEW: &str = "view";
    pub const STR_REPLACE: &str = "str_replace";
    pub const CREATE: &str = "create";
    pub const INSERT: &str = "insert";
    pub const UNDO_EDIT: &str = "undo_edit";

    pub const ALL: &[&str] = &[VIEW, STR_REPLACE, CREATE, INSERT, UNDO_EDIT];
}

/// Search types accepted by `file_content_search`
pub mod search_types {
    pub const FUZZY_FILE: &str = "fuzzy_file";
    pub const CONTENT: &str = "content";

    pub const ALL: &[&str] = &[FUZZY_FILE, CONTENT];
}

/// Workspace file names
pub mod files {
    pub const CONFIG_FILE: &str = "vtsandbox.toml";
    pub const CONFIG_DIR: &str = ".vtsandbox";
    pub const TOOLIGNORE: &str = ".toolignore";
    pub const BACKUP_DIR: &str = ".backups";
    pub const BACKUP_EXTENSION: &str = "bak";
}

/// Markers exchanged with the calling layer
pub mod markers {
    /// Prefix of any tool result that awaits human approval
    pub const CONFIRM_EDIT: &str = "CONFIRM_EDIT";
    pub const REJECTED_BY_USER: &str = "Changes were rejected by the user.";
}

/// Default limits for the editor
pub mod editor {
    pub const MAX_VIEW_LINES: usize = 250;
    pub const CREATE_PREVIEW_CHARS: usize = 1000;
    pub const DIFF_CONTEXT_LINES: usize = 3;
    pub const LISTING_MAX_CHARS: usize = 5000;
}

/// Default limits for the search tool
pub mod search {
    pub const FUZZY_THRESHOLD: u8 = 50;
    pub const DEFAULT_FUZZY_RESULTS: usize = 10;
    pub const DEFAULT_CONTENT_RESULTS: usize = 50;
    pub const DEFAULT_MAX_PER_FILE: usize = 10;
    pub const MAX_FILE_SIZE: u64 = 1024 * 1024;
    pub const BINARY_PROBE_BYTES: usize = 1024;
    pub const CONTEXT_LINES: usize = 2;
    pub const FILE_RESULTS_MAX_CHARS: usize = 5000;
    pub const CONTENT_RESULTS_MAX_CHARS: usize = 10000;
}

/// Default limits for anything returned across the tool boundary
pub mod output {
    pub const MAX_RESULT_CHARS: usize = 10000;
}

pub mod telemetry {
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}
