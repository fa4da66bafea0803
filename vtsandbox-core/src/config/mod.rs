//! VTSandbox Configuration Module
//!
//! This module handles loading and managing configuration from vtsandbox.toml files.
//! It provides a centralized way to manage the access policy, editor and search
//! limits, and the output budget applied at the tool boundary.

pub mod constants;
pub mod core;
pub mod loader;
pub mod telemetry;

pub use core::{EditorConfig, OutputConfig, SearchConfig, SecurityConfig, ToolsConfig};
pub use loader::{ConfigManager, SandboxConfig};
pub use telemetry::TelemetryConfig;
