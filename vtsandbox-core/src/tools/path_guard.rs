//! Workspace access control for every tool that touches the filesystem
//!
//! All editor and search operations resolve their paths through [`PathGuard`]:
//! traversal is rejected first, then `.toolignore` patterns, then the
//! allow-list (workspace root plus configured folders).

use crate::config::{SandboxConfig, SecurityConfig};
use crate::utils::toolignore::ToolIgnore;
use anyhow::{Context, Result};
use std::fmt;
use std::ops::Deref;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Path traversal not allowed: {path}")]
    Traversal { path: String },

    #[error("Path is ignored by .toolignore: {path}")]
    Ignored { path: String },

    #[error("Path is not in allowed folders: {path}")]
    AccessDenied { path: String },
}

/// The rules a path must satisfy before any tool may touch it
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    repo_root: PathBuf,
    allowed_folders: Vec<PathBuf>,
    ignore: ToolIgnore,
}

impl AccessPolicy {
    pub fn new(repo_root: &Path, allowed_folders: &[PathBuf], ignore: ToolIgnore) -> Result<Self> {
        let repo_root = normalize_absolute(
            &std::path::absolute(repo_root).with_context(|| {
                format!("Failed to resolve workspace root: {}", repo_root.display())
            })?,
        );

        let allowed_folders = allowed_folders
            .iter()
            .map(|folder| normalize_absolute(&SandboxConfig::resolve_path(&repo_root, folder)))
            .collect();

        Ok(Self {
            repo_root,
            allowed_folders,
            ignore,
        })
    }

    /// Build the policy from configuration, loading the ignore file it names
    pub fn from_config(repo_root: &Path, security: &SecurityConfig) -> Result<Self> {
        let root = std::path::absolute(repo_root).with_context(|| {
            format!("Failed to resolve workspace root: {}", repo_root.display())
        })?;
        let root = normalize_absolute(&root);
        let ignore_file = SandboxConfig::resolve_path(&root, &security.toolignore_path);
        let ignore = ToolIgnore::load(&root, &ignore_file)?;
        Self::new(&root, &security.allowed_folders, ignore)
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn allowed_folders(&self) -> &[PathBuf] {
        &self.allowed_folders
    }

    pub fn ignore(&self) -> &ToolIgnore {
        &self.ignore
    }
}

/// An absolute, normalized path that satisfied the [`AccessPolicy`] when it was checked.
///
/// The filesystem may change afterwards; this is not a lasting guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValidatedPath(PathBuf);

impl ValidatedPath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl Deref for ValidatedPath {
    type Target = Path;

    fn deref(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ValidatedPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for ValidatedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

#[derive(Debug, Clone)]
pub struct PathGuard {
    policy: AccessPolicy,
}

impl PathGuard {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }

    pub fn repo_root(&self) -> &Path {
        &self.policy.repo_root
    }

    /// Resolve `raw` and check it against the policy.
    ///
    /// Root-anchored input is read relative to the workspace root unless it
    /// already points inside the root or an allowed folder.
    pub fn validate(&self, raw: &str) -> Result<ValidatedPath, PathError> {
        let resolved = self.resolve(raw)?;

        if self.is_ignored(&resolved) {
            return Err(PathError::Ignored {
                path: self.display_path(&resolved),
            });
        }

        if !self.is_allowed(&resolved) {
            warn!(path = %resolved.display(), "path outside workspace and allowed folders");
            return Err(PathError::AccessDenied {
                path: resolved.display().to_string(),
            });
        }

        Ok(ValidatedPath(resolved))
    }

    fn resolve(&self, raw: &str) -> Result<PathBuf, PathError> {
        let raw_path = Path::new(raw);

        if raw_path.is_absolute() {
            let normalized = normalize_absolute(raw_path);
            if self.within_scope(&normalized) {
                return Ok(normalized);
            }
            if raw_path
                .components()
                .any(|component| matches!(component, Component::ParentDir))
            {
                return Err(PathError::Traversal {
                    path: raw.to_string(),
                });
            }
        }

        if raw_path.has_root() {
            let stripped = raw.trim_start_matches(['/', '\\']);
            let relative = if stripped.is_empty() { "." } else { stripped };
            debug!(raw, relative, "reading root-anchored path relative to workspace");
            return self.resolve_relative(relative, raw);
        }

        self.resolve_relative(raw, raw)
    }

    /// Join `relative` onto the root, refusing any `..` that climbs above it
    fn resolve_relative(&self, relative: &str, raw: &str) -> Result<PathBuf, PathError> {
        let mut stack: Vec<&std::ffi::OsStr> = Vec::new();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => stack.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if stack.pop().is_none() {
                        return Err(PathError::Traversal {
                            path: raw.to_string(),
                        });
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(PathError::Traversal {
                        path: raw.to_string(),
                    });
                }
            }
        }

        let mut resolved = self.policy.repo_root.clone();
        resolved.extend(stack);
        Ok(resolved)
    }

    fn within_scope(&self, path: &Path) -> bool {
        path.starts_with(&self.policy.repo_root)
            || self
                .policy
                .allowed_folders
                .iter()
                .any(|folder| path.starts_with(folder))
    }

    /// Whether the path or any ancestor matches an ignore pattern
    pub fn is_ignored(&self, path: &Path) -> bool {
        self.policy.ignore.is_ignored(path)
    }

    /// Whether the path is the root, inside it, or inside an allowed folder
    pub fn is_allowed(&self, path: &Path) -> bool {
        let root = &self.policy.repo_root;
        if path == root.as_path() || path.parent() == Some(root.as_path()) {
            return true;
        }
        self.within_scope(path)
    }

    /// Every visible file below `directory`, ignored subtrees pruned before descending
    pub fn list_files(&self, directory: &Path) -> Vec<ValidatedPath> {
        let directory = if directory.is_absolute() {
            normalize_absolute(directory)
        } else {
            normalize_absolute(&self.policy.repo_root.join(directory))
        };

        let mut files = Vec::new();
        let walker = WalkDir::new(&directory)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.is_ignored(entry.path()));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if self.is_ignored(path) || !self.is_allowed(path) {
                continue;
            }

            files.push(ValidatedPath(path.to_path_buf()));
        }

        files
    }

    /// Path relative to the workspace root when inside it, absolute otherwise
    pub fn display_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.policy.repo_root) {
            Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
            Ok(relative) => relative.display().to_string(),
            Err(_) => path.display().to_string(),
        }
    }
}

/// Lexically collapse `.` and `..` in an absolute path; `..` at the root stays at the root
pub(crate) fn normalize_absolute(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
