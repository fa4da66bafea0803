use crate::config::constants::files;
use crate::config::core::{SecurityConfig, ToolsConfig};
use crate::config::telemetry::TelemetryConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure for VTSandbox
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SandboxConfig {
    /// Access policy and confirmation settings
    #[serde(default)]
    pub security: SecurityConfig,

    /// Editor, search and output limits
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl SandboxConfig {
    /// Bootstrap a workspace with a default vtsandbox.toml and .toolignore.
    /// Returns the names of the files that were written.
    pub fn bootstrap_project<P: AsRef<Path>>(workspace: P, force: bool) -> Result<Vec<String>> {
        let workspace = workspace.as_ref();
        let mut created_files = Vec::new();

        let config_path = workspace.join(files::CONFIG_FILE);
        if !config_path.exists() || force {
            let config_content = toml::to_string_pretty(&SandboxConfig::default())
                .context("Failed to serialize default configuration")?;

            fs::write(&config_path, config_content).with_context(|| {
                format!("Failed to write config file: {}", config_path.display())
            })?;

            created_files.push(files::CONFIG_FILE.to_string());
        }

        let toolignore_path = workspace.join(files::TOOLIGNORE);
        if !toolignore_path.exists() || force {
            fs::write(&toolignore_path, Self::default_toolignore()).with_context(|| {
                format!(
                    "Failed to write ignore file: {}",
                    toolignore_path.display()
                )
            })?;

            created_files.push(files::TOOLIGNORE.to_string());
        }

        Ok(created_files)
    }

    /// Generate default .toolignore content
    fn default_toolignore() -> String {
        r#"# Paths hidden from the agent's tools (one glob per line)

# Secrets
.env
.env.*
*.pem
*.key

# Version control and tool state
.git
.backups
.vtsandbox

# Build output and dependencies
target
node_modules
__pycache__

# Logs
*.log
"#
        .to_string()
    }

    /// Resolve a configured path against the workspace root
    pub fn resolve_path(workspace: &Path, configured: &Path) -> PathBuf {
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            workspace.join(configured)
        }
    }
}

/// Configuration manager for loading configuration files
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: SandboxConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        Self::load_from_workspace(std::env::current_dir()?)
    }

    /// Get the user's home directory path
    pub fn get_home_dir() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home));
        }

        if let Ok(userprofile) = std::env::var("USERPROFILE") {
            return Some(PathBuf::from(userprofile));
        }

        dirs::home_dir()
    }

    /// Load configuration from a specific workspace
    pub fn load_from_workspace(workspace: impl AsRef<Path>) -> Result<Self> {
        let workspace = workspace.as_ref();

        let config_path = workspace.join(files::CONFIG_FILE);
        if config_path.exists() {
            return Self::load_from_file(&config_path);
        }

        let fallback_path = workspace.join(files::CONFIG_DIR).join(files::CONFIG_FILE);
        if fallback_path.exists() {
            return Self::load_from_file(&fallback_path);
        }

        if let Some(home_dir) = Self::get_home_dir() {
            let home_config_path = home_dir.join(files::CONFIG_DIR).join(files::CONFIG_FILE);
            if home_config_path.exists() {
                return Self::load_from_file(&home_config_path);
            }
        }

        Ok(Self {
            config: SandboxConfig::default(),
            config_path: None,
        })
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: SandboxConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(Self {
            config,
            config_path: Some(path.to_path_buf()),
        })
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    /// Consume the manager, keeping only the configuration
    pub fn into_config(self) -> SandboxConfig {
        self.config
    }

    /// Get the configuration file path (if loaded from file)
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: SandboxConfig = toml::from_str(
            r#"
[security]
allowed_folders = ["docs"]

[tools.editor]
max_view_lines = 100
"#,
        )
        .unwrap();

        assert_eq!(config.security.allowed_folders, vec![PathBuf::from("docs")]);
        assert!(config.security.human_in_the_loop);
        assert_eq!(config.tools.editor.max_view_lines, 100);
        assert_eq!(config.tools.editor.create_preview_chars, 1000);
        assert_eq!(config.tools.search.fuzzy_threshold, 50);
        assert_eq!(config.tools.output.max_result_chars, 10000);
    }

    #[test]
    fn workspace_config_takes_precedence() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(files::CONFIG_FILE),
            "[security]\nhuman_in_the_loop = false\n",
        )
        .unwrap();

        let manager = ConfigManager::load_from_workspace(temp_dir.path()).unwrap();
        assert!(!manager.config().security.human_in_the_loop);
        assert_eq!(
            manager.config_path(),
            Some(temp_dir.path().join(files::CONFIG_FILE).as_path())
        );
    }

    #[test]
    fn bootstrap_writes_config_and_ignore_file() {
        let temp_dir = TempDir::new().unwrap();

        let created = SandboxConfig::bootstrap_project(temp_dir.path(), false).unwrap();
        assert_eq!(created, vec![files::CONFIG_FILE, files::TOOLIGNORE]);

        let again = SandboxConfig::bootstrap_project(temp_dir.path(), false).unwrap();
        assert!(again.is_empty());

        let manager = ConfigManager::load_from_workspace(temp_dir.path()).unwrap();
        assert_eq!(manager.config().tools.editor.max_view_lines, 250);
    }

    #[test]
    fn invalid_config_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(files::CONFIG_FILE);
        fs::write(&path, "[security\n").unwrap();

        let err = ConfigManager::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
