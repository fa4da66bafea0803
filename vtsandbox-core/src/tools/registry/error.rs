use crate::tools::editor::EditorError;
use crate::tools::path_guard::PathError;
use anyhow::Error;
use std::fmt;

/// A failed tool call, classified for logging and returned as `Error: {message}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolExecutionError {
    pub tool_name: String,
    pub error_type: ToolErrorType,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorType {
    InvalidParameters,
    ToolNotFound,
    PermissionDenied,
    ResourceNotFound,
    Conflict,
    ExecutionError,
    PolicyViolation,
}

impl ToolExecutionError {
    pub fn new(tool_name: String, error_type: ToolErrorType, message: String) -> Self {
        Self {
            tool_name,
            error_type,
            message,
        }
    }

    /// Build from a handler failure, classifying it by its concrete type
    pub fn from_handler(tool_name: &str, error: &Error) -> Self {
        Self::new(tool_name.to_string(), classify_error(error), error.to_string())
    }
}

impl fmt::Display for ToolExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ToolExecutionError {}

fn classify_path_error(error: &PathError) -> ToolErrorType {
    match error {
        PathError::Traversal { .. } | PathError::Ignored { .. } => ToolErrorType::PolicyViolation,
        PathError::AccessDenied { .. } => ToolErrorType::PermissionDenied,
    }
}

fn classify_editor_error(error: &EditorError) -> ToolErrorType {
    match error {
        EditorError::Path(path_error) => classify_path_error(path_error),
        EditorError::NotFound { .. }
        | EditorError::TextNotFound
        | EditorError::NoHistory { .. } => ToolErrorType::ResourceNotFound,
        EditorError::AlreadyExists { .. }
        | EditorError::AmbiguousMatch { .. }
        | EditorError::StaleProposal { .. } => ToolErrorType::Conflict,
        EditorError::InvalidLine { .. }
        | EditorError::InvalidRange { .. }
        | EditorError::MissingParameter { .. }
        | EditorError::UnknownProposal { .. } => ToolErrorType::InvalidParameters,
        EditorError::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => {
            ToolErrorType::PermissionDenied
        }
        EditorError::NotUtf8 { .. }
        | EditorError::UndoUnavailable { .. }
        | EditorError::Io { .. } => ToolErrorType::ExecutionError,
    }
}

pub fn classify_error(error: &Error) -> ToolErrorType {
    if let Some(editor_error) = error.downcast_ref::<EditorError>() {
        return classify_editor_error(editor_error);
    }
    if let Some(path_error) = error.downcast_ref::<PathError>() {
        return classify_path_error(path_error);
    }

    let error_msg = error.to_string().to_lowercase();

    if error_msg.contains("permission") || error_msg.contains("access denied") {
        ToolErrorType::PermissionDenied
    } else if error_msg.contains("not found") || error_msg.contains("no such file") {
        ToolErrorType::ResourceNotFound
    } else if error_msg.contains("invalid")
        || error_msg.contains("required")
        || error_msg.contains("unknown")
    {
        ToolErrorType::InvalidParameters
    } else if error_msg.contains("policy") || error_msg.contains("denied") {
        ToolErrorType::PolicyViolation
    } else {
        ToolErrorType::ExecutionError
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn typed_errors_are_classified_by_variant() {
        let traversal = Error::new(PathError::Traversal {
            path: "../x".into(),
        });
        assert_eq!(classify_error(&traversal), ToolErrorType::PolicyViolation);

        let ambiguous = Error::new(EditorError::AmbiguousMatch { count: 3 });
        assert_eq!(classify_error(&ambiguous), ToolErrorType::Conflict);

        let wrapped = Error::new(EditorError::Path(PathError::AccessDenied {
            path: "/etc".into(),
        }));
        assert_eq!(classify_error(&wrapped), ToolErrorType::PermissionDenied);
    }

    #[test]
    fn untyped_errors_fall_back_to_message() {
        assert_eq!(
            classify_error(&anyhow!("Directory not found: src")),
            ToolErrorType::ResourceNotFound
        );
        assert_eq!(
            classify_error(&anyhow!("Unknown command 'explode'")),
            ToolErrorType::InvalidParameters
        );
    }

    #[test]
    fn handler_errors_keep_message_and_type() {
        let error = Error::new(EditorError::NotUtf8 {
            path: "latin1.txt".into(),
        });
        let wrapped = ToolExecutionError::from_handler("str_replace_editor", &error);
        assert_eq!(wrapped.tool_name, "str_replace_editor");
        assert_eq!(wrapped.error_type, ToolErrorType::ExecutionError);
        assert_eq!(wrapped.message, "File 'latin1.txt' is not valid UTF-8 text");
    }
}
