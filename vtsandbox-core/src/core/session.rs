use crate::config::SandboxConfig;
use crate::config::constants::markers;
use crate::tools::editor::{EditorError, TextEditor};
use crate::tools::file_search::Finder;
use crate::tools::path_guard::{AccessPolicy, PathGuard};
use crate::tools::registry::{ToolRegistry, register_builtin_tools};
use crate::tools::types::{ToolCall, ToolResult};
use anyhow::Result;
use parking_lot::Mutex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Answers yes/no for a pending change preview
pub trait Confirmer: Send {
    fn confirm(&mut self, preview: &str) -> Result<bool>;
}

/// Approves every change
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoApprove;

impl Confirmer for AutoApprove {
    fn confirm(&mut self, _preview: &str) -> Result<bool> {
        Ok(true)
    }
}

/// Rejects every change
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoReject;

impl Confirmer for AutoReject {
    fn confirm(&mut self, _preview: &str) -> Result<bool> {
        Ok(false)
    }
}

/// One workspace's tool sandbox: policy, editor state and tool directory
pub struct SandboxSession {
    workspace: PathBuf,
    config: SandboxConfig,
    guard: Arc<PathGuard>,
    editor: Arc<Mutex<TextEditor>>,
    finder: Finder,
    registry: ToolRegistry,
}

impl SandboxSession {
    pub fn new(workspace: &Path, config: SandboxConfig) -> Result<Self> {
        let policy = AccessPolicy::from_config(workspace, &config.security)?;
        info!(
            root = %policy.repo_root().display(),
            allowed_folders = policy.allowed_folders().len(),
            ignore_patterns = policy.ignore().pattern_count(),
            "sandbox session started"
        );

        let guard = Arc::new(PathGuard::new(policy));
        let editor = Arc::new(Mutex::new(TextEditor::new(
            Arc::clone(&guard),
            config.tools.editor.clone(),
        )));
        let finder = Finder::new(Arc::clone(&guard), config.tools.search.clone());

        let mut registry = ToolRegistry::new(&config.tools.output);
        register_builtin_tools(&mut registry, Arc::clone(&editor), finder.clone());

        Ok(Self {
            workspace: guard.repo_root().to_path_buf(),
            config,
            guard,
            editor,
            finder,
            registry,
        })
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn guard(&self) -> &PathGuard {
        &self.guard
    }

    pub fn finder(&self) -> &Finder {
        &self.finder
    }

    pub fn editor(&self) -> Arc<Mutex<TextEditor>> {
        Arc::clone(&self.editor)
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.registry
    }

    pub fn tool_specs(&self) -> Vec<Value> {
        self.registry.tool_specs()
    }

    /// Dispatch without resolving confirmations; a pending result keeps its token
    pub async fn dispatch(&self, call: &ToolCall) -> ToolResult {
        self.registry.execute(call).await
    }

    /// Dispatch and settle any pending change before returning
    pub async fn handle(&self, call: &ToolCall, confirmer: &mut dyn Confirmer) -> ToolResult {
        let result = self.registry.execute(call).await;
        let Some(token) = result.pending_confirmation.clone() else {
            return result;
        };

        if !self.config.security.human_in_the_loop {
            debug!(token = %token, "auto-committing without confirmation");
            return self.settle_commit(&call.id, &token);
        }

        match confirmer.confirm(&result.content) {
            Ok(true) => self.settle_commit(&call.id, &token),
            Ok(false) => match self.reject(&token) {
                Ok(()) => ToolResult::success(&call.id, markers::REJECTED_BY_USER),
                Err(err) => ToolResult::error(&call.id, err.to_string()),
            },
            Err(err) => {
                warn!(error = %err, "confirmation failed, discarding change");
                if let Err(reject_err) = self.reject(&token) {
                    debug!(token = %token, error = %reject_err, "pending change already settled");
                }
                ToolResult::error(&call.id, format!("Confirmation failed: {err}"))
            }
        }
    }

    pub fn commit(&self, token: &str) -> Result<String, EditorError> {
        self.editor.lock().commit(token)
    }

    pub fn reject(&self, token: &str) -> Result<(), EditorError> {
        self.editor.lock().reject(token)
    }

    fn settle_commit(&self, call_id: &str, token: &str) -> ToolResult {
        match self.commit(token) {
            Ok(message) => ToolResult::success(call_id, message),
            Err(err) => ToolResult::error(call_id, err.to_string()),
        }
    }
}
