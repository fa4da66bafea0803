pub mod security;
pub mod tools;

pub use security::SecurityConfig;
pub use tools::{EditorConfig, OutputConfig, SearchConfig, ToolsConfig};
