use crate::config::constants::markers;
use similar::TextDiff;

/// Unified diff between two versions of `display_path`
pub fn unified_diff(old: &str, new: &str, display_path: &str, context: usize) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(context)
        .header(
            &format!("a/{display_path}"),
            &format!("b/{display_path}"),
        )
        .to_string()
}

pub fn change_preview(diff: &str) -> String {
    format!(
        "{}\n\nProposed changes:\n\n{}\n\nDo you want to apply these changes? (yes/no)",
        markers::CONFIRM_EDIT,
        diff
    )
}

pub fn creation_preview(display_path: &str, file_text: &str, max_chars: usize) -> String {
    let mut preview: String = file_text.chars().take(max_chars).collect();
    if file_text.chars().count() > max_chars {
        preview.push_str("...");
    }
    format!(
        "{}\n\nProposed file creation '{}':\n\n{}\n\nDo you want to create this file? (yes/no)",
        markers::CONFIRM_EDIT,
        display_path,
        preview
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_has_prefixed_headers() {
        let diff = unified_diff("a\nb\nc\n", "a\nB\nc\n", "src/lib.rs", 3);
        assert!(diff.starts_with("--- a/src/lib.rs\n+++ b/src/lib.rs\n"));
        assert!(diff.contains("-b\n"));
        assert!(diff.contains("+B\n"));
    }

    #[test]
    fn creation_preview_is_capped() {
        let preview = creation_preview("new.txt", &"z".repeat(20), 5);
        assert!(preview.starts_with("CONFIRM_EDIT\n\nProposed file creation 'new.txt':"));
        assert!(preview.contains("\n\nzzzzz...\n\n"));
    }
}
