//! `file_content_search` through the registry

use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;
use vtsandbox_core::{AutoReject, SandboxConfig, SandboxSession, ToolCall, ToolResult};

async fn search(session: &SandboxSession, input: Value) -> ToolResult {
    session
        .handle(&ToolCall::new("search", "file_content_search", input), &mut AutoReject)
        .await
}

#[tokio::test]
async fn test_fuzzy_search_ranks_agent_files_first() {
    let temp_dir = TempDir::new().unwrap();
    for name in ["agent.py", "agent_test.py", "readme.md"] {
        fs::write(temp_dir.path().join(name), "").unwrap();
    }
    let session = SandboxSession::new(temp_dir.path(), SandboxConfig::default()).unwrap();

    let result = search(&session, json!({"search_type": "fuzzy_file", "query": "agen"})).await;
    assert!(!result.is_error, "{}", result.content);
    assert!(result.content.starts_with("Found 2 files matching 'agen':\n\n"));
    assert!(result.content.contains("1. agent.py (Score: 100)"));
    assert!(result.content.contains("2. agent_test.py (Score: 100)"));
    assert!(!result.content.contains("readme.md"));
}

#[tokio::test]
async fn test_fuzzy_search_without_hits() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("main.rs"), "").unwrap();
    let session = SandboxSession::new(temp_dir.path(), SandboxConfig::default()).unwrap();

    let result = search(&session, json!({"search_type": "fuzzy_file", "query": "zzzzzz"})).await;
    assert_eq!(result.content, "No files found matching 'zzzzzz'");
}

#[tokio::test]
async fn test_content_search_formats_matches() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("src")).unwrap();
    fs::write(
        temp_dir.path().join("src/lib.rs"),
        "use std::fs;\n\npub fn load() {\n    // TODO: cache\n}\n",
    )
    .unwrap();
    let session = SandboxSession::new(temp_dir.path(), SandboxConfig::default()).unwrap();

    let result = search(
        &session,
        json!({"search_type": "content", "query": "todo", "directory": "src"}),
    )
    .await;
    assert!(result.content.starts_with("Found 1 matches for 'todo' in 1 files:"));
    assert!(result.content.contains("File: src/lib.rs (1 matches)"));
    assert!(result.content.contains("  Line 4:     // TODO: cache"));
    assert!(result.content.contains("  > Line 4:     // TODO: cache"));
    assert!(result.content.contains("    Line 2: \n"));

    let strict = search(
        &session,
        json!({"search_type": "content", "query": "todo", "case_sensitive": true}),
    )
    .await;
    assert_eq!(strict.content, "No content matches found for 'todo'");
}

#[tokio::test]
async fn test_content_output_reports_omissions() {
    let temp_dir = TempDir::new().unwrap();
    for index in 0..30 {
        fs::write(
            temp_dir.path().join(format!("file_{index:02}.txt")),
            format!("{}\n", "needle ".repeat(60)).repeat(5),
        )
        .unwrap();
    }
    let session = SandboxSession::new(temp_dir.path(), SandboxConfig::default()).unwrap();

    let result = search(
        &session,
        json!({"search_type": "content", "query": "needle", "max_results": 100, "max_per_file": 5}),
    )
    .await;
    assert!(result.content.chars().count() <= 10_000);
    assert!(result.content.starts_with("Found 100 matches for 'needle' in 20 files:"));

    let shown = result.content.matches("\n  Line ").count();
    let files_started = result.content.matches("File: ").count();
    let partially_shown = if shown % 5 == 0 { 0 } else { 1 };
    let expected = format!(
        "[{} more matches in {} files not shown due to output size limit]",
        100 - shown,
        20 - files_started + partially_shown
    );
    let tail = &result.content[result.content.len() - 200..];
    assert!(result.content.ends_with(&expected), "{tail}");
}

#[tokio::test]
async fn test_content_search_rejects_traversal_directory() {
    let temp_dir = TempDir::new().unwrap();
    let session = SandboxSession::new(temp_dir.path(), SandboxConfig::default()).unwrap();

    let result = search(
        &session,
        json!({"search_type": "content", "query": "x", "directory": "../"}),
    )
    .await;
    assert!(result.is_error);
    assert_eq!(result.content, "Error: Path traversal not allowed: ../");
}

#[tokio::test]
async fn test_search_parameters_are_validated() {
    let temp_dir = TempDir::new().unwrap();
    let session = SandboxSession::new(temp_dir.path(), SandboxConfig::default()).unwrap();

    let bad_enum = search(&session, json!({"search_type": "regex", "query": "x"})).await;
    assert!(bad_enum.is_error);
    assert!(bad_enum.content.contains("Invalid value 'regex' for parameter 'search_type'"));

    let missing = search(&session, json!({"search_type": "content"})).await;
    assert_eq!(missing.content, "Error: Missing required parameter 'query'");

    let empty = search(&session, json!({"search_type": "content", "query": ""})).await;
    assert_eq!(empty.content, "Error: query parameter is required");
}
