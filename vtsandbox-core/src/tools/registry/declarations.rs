use super::registration::ToolContract;
use super::schema::{ParameterKind, ParameterSpec, ToolSchema};
use crate::config::constants::{commands, search_types, tools};
use serde_json::json;

const EDITOR_DESCRIPTION: &str = "Text editor tool for viewing and modifying text files.
This tool allows you to examine and edit files directly, helping with debugging, fixing, and improving code or other text documents.

Available commands:
- view: Read the contents of a file or list the contents of a directory. Limited to 250 lines at a time.
- str_replace: Replace a specific string in a file with a new string. The string must occur exactly once.
- create: Create a new file with specified content
- insert: Insert text after a specific line in a file (0 inserts at the beginning)
- undo_edit: Revert the last edit made to a file

Path access rules:
- The workspace root and everything below it are accessible, EXCEPT paths matching .toolignore patterns
- Additional allowed folders can be configured for access outside the workspace
- All paths are checked against .toolignore patterns before any other access rule
- When viewing a directory, the tool lists its contents (excluding ignored entries)
- Path traversal (using '../') is not allowed
- Paths can be given with or without a leading slash (e.g., '/README.md' or 'README.md')

Confirmation:
- With confirm=true (the default) mutating commands return a preview that starts with CONFIRM_EDIT and nothing is written until the user approves it

Best practices:
- Search for a file with file_content_search before trying to view or edit it
- Use view with a specific line range when working with large files
- Use undo_edit if you need to revert a change; only the most recent edit of each file can be undone";

const SEARCH_DESCRIPTION: &str = "Search tool for finding files and content within files.
This tool allows you to search for files by name using fuzzy matching or search for specific content within files.

Available search types:
- fuzzy_file: Find files with names similar to the query
- content: Search for specific text within files

Path access rules:
- The workspace root and everything below it are accessible, EXCEPT paths matching .toolignore patterns
- Additional allowed folders can be configured for access outside the workspace
- All paths are checked against .toolignore patterns before any other access rule
- Path traversal (using '../') is not allowed

Best practices:
- Search for a file's existence using fuzzy_file before trying to view its content
- Use specific search terms to avoid excessive results
- For content search, specify a directory to narrow the search scope when possible
- Content search automatically skips binary files and files larger than 1MB";

pub(super) fn text_editor_contract() -> ToolContract {
    let schema = ToolSchema::new()
        .parameter(
            "command",
            ParameterSpec::string(
                "The command to execute (view, str_replace, create, insert, or undo_edit)",
            )
            .with_enum(commands::ALL),
        )
        .parameter(
            "path",
            ParameterSpec::string(
                "The path to the file or directory to view or modify. Use '.' for the workspace root. Can be specified with or without a leading slash.",
            ),
        )
        .parameter(
            "view_range",
            ParameterSpec::array_of(
                ParameterKind::Integer,
                "An array of two integers specifying the start and end line numbers to view. Line numbers are 1-indexed, and -1 for the end line means read to the end of the file.",
            ),
        )
        .parameter(
            "old_str",
            ParameterSpec::string(
                "The text to replace (must match exactly, including whitespace and indentation)",
            ),
        )
        .parameter(
            "new_str",
            ParameterSpec::string("The new text to insert in place of the old text, or after insert_line"),
        )
        .parameter(
            "file_text",
            ParameterSpec::string("The content to write to the new file"),
        )
        .parameter(
            "insert_line",
            ParameterSpec::integer(
                "The line number after which to insert the text (0 for beginning of file)",
            ),
        )
        .parameter(
            "confirm",
            ParameterSpec::boolean(
                "Whether to show a diff and ask for confirmation before applying the changes",
            )
            .with_default(json!(true)),
        )
        .required(&["command", "path"]);

    ToolContract::new(tools::STR_REPLACE_EDITOR, EDITOR_DESCRIPTION, schema)
}

pub(super) fn search_contract() -> ToolContract {
    let schema = ToolSchema::new()
        .parameter(
            "search_type",
            ParameterSpec::string("The type of search to perform (fuzzy_file or content)")
                .with_enum(search_types::ALL),
        )
        .parameter("query", ParameterSpec::string("The search query"))
        .parameter(
            "directory",
            ParameterSpec::string(
                "The directory to search in (for content search). Default is the workspace root.",
            )
            .with_default(json!(".")),
        )
        .parameter(
            "case_sensitive",
            ParameterSpec::boolean(
                "Whether the search should be case sensitive (for content search). Default is false.",
            )
            .with_default(json!(false)),
        )
        .parameter(
            "max_results",
            ParameterSpec::integer(
                "Maximum number of results to return. Default is 10 for fuzzy_file and 50 for content.",
            ),
        )
        .parameter(
            "max_per_file",
            ParameterSpec::integer(
                "Maximum number of matches per file (for content search). Default is 10.",
            )
            .with_default(json!(10)),
        )
        .required(&["search_type", "query"]);

    ToolContract::new(tools::FILE_CONTENT_SEARCH, SEARCH_DESCRIPTION, schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_contract_lists_commands() {
        let spec = text_editor_contract().spec();
        assert_eq!(spec["name"], tools::STR_REPLACE_EDITOR);
        assert_eq!(
            spec["input_schema"]["properties"]["command"]["enum"],
            json!(["view", "str_replace", "create", "insert", "undo_edit"])
        );
        assert_eq!(spec["input_schema"]["required"], json!(["command", "path"]));
    }

    #[test]
    fn search_contract_requires_query() {
        let spec = search_contract().spec();
        assert_eq!(spec["input_schema"]["required"], json!(["search_type", "query"]));
        assert_eq!(
            spec["input_schema"]["properties"]["search_type"]["enum"],
            json!(["fuzzy_file", "content"])
        );
    }
}
