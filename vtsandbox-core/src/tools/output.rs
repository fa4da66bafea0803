//! Size bounds for everything returned across the tool boundary

use super::file_search::{ContentMatch, SearchMatch};
use indexmap::IndexMap;

/// Stateless helpers that cap text and search results.
///
/// Every formatted result fits within its character budget, including the
/// trailer that reports what was left out.
pub struct OutputGovernor;

impl OutputGovernor {
    /// Cap `text` at `max_chars` characters, appending a note when it was cut
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        let len = text.chars().count();
        if len <= max_chars {
            return text.to_string();
        }

        let note = format!(
            "\n\n[Output truncated to {max_chars} characters. Original length: {len} characters]"
        );
        let note_len = note.chars().count();
        if note_len >= max_chars {
            return take_chars(text, max_chars);
        }

        let mut truncated = take_chars(text, max_chars - note_len);
        truncated.push_str(&note);
        truncated
    }

    pub fn limit_matches<T: Clone>(matches: &[T], max_matches: usize) -> Vec<T> {
        matches.iter().take(max_matches).cloned().collect()
    }

    /// Cap matches per file and in total, keeping file order. Files left empty are dropped.
    pub fn limit_content_matches(
        results: &IndexMap<String, Vec<ContentMatch>>,
        max_total: usize,
        max_per_file: usize,
    ) -> IndexMap<String, Vec<ContentMatch>> {
        let mut limited = IndexMap::new();
        let mut remaining = max_total;

        for (path, matches) in results {
            if remaining == 0 {
                break;
            }
            let take = matches.len().min(max_per_file).min(remaining);
            if take == 0 {
                continue;
            }
            limited.insert(path.clone(), matches[..take].to_vec());
            remaining -= take;
        }

        limited
    }

    pub fn format_file_search_results(
        results: &[SearchMatch],
        query: &str,
        max_chars: usize,
    ) -> String {
        if results.is_empty() {
            return Self::truncate_text(&format!("No files found matching '{query}'"), max_chars);
        }

        let header = format!("Found {} files matching '{}':\n\n", results.len(), query);
        let blocks = results
            .iter()
            .enumerate()
            .map(|(index, result)| Block {
                text: format!("{}. {} (Score: {})\n", index + 1, result.path, result.score),
                file_index: index,
            })
            .collect();

        assemble(header, blocks, max_chars, |matches, _| {
            format!("\n[{matches} more matches not shown due to output size limit]")
        })
    }

    pub fn format_content_search_results(
        results: &IndexMap<String, Vec<ContentMatch>>,
        query: &str,
        max_chars: usize,
    ) -> String {
        let total: usize = results.values().map(Vec::len).sum();
        if total == 0 {
            return Self::truncate_text(
                &format!("No content matches found for '{query}'"),
                max_chars,
            );
        }

        let header = format!(
            "Found {} matches for '{}' in {} files:\n\n",
            total,
            query,
            results.values().filter(|matches| !matches.is_empty()).count()
        );

        let mut blocks = Vec::with_capacity(total);
        for (file_index, (path, matches)) in results.iter().enumerate() {
            for (position, found) in matches.iter().enumerate() {
                let mut text = String::new();
                if position == 0 {
                    text.push_str(&format!("File: {} ({} matches)\n", path, matches.len()));
                }
                text.push_str(&format!("  Line {}: {}\n", found.line_number, found.content));
                if !found.context.is_empty() {
                    text.push_str("  Context:\n");
                    for line in &found.context {
                        let prefix = if line.is_match { "  > " } else { "    " };
                        text.push_str(&format!(
                            "{}Line {}: {}\n",
                            prefix, line.line_number, line.content
                        ));
                    }
                }
                text.push('\n');
                blocks.push(Block { text, file_index });
            }
        }

        assemble(header, blocks, max_chars, |matches, files| {
            format!(
                "\n[{matches} more matches in {files} files not shown due to output size limit]"
            )
        })
    }

    /// Human readable byte count, e.g. `1.5 KB`
    pub fn format_size(bytes: u64) -> String {
        const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit = 0;
        while size >= 1024.0 && unit < UNITS.len() - 1 {
            size /= 1024.0;
            unit += 1;
        }
        format!("{:.1} {}", size, UNITS[unit])
    }
}

struct Block {
    text: String,
    file_index: usize,
}

/// Append blocks while each one still leaves room for the trailer describing the rest.
///
/// If even the trailer for every block does not fit after the header, the header
/// is shortened so the omission counts are still reported.
fn assemble<F>(header: String, blocks: Vec<Block>, max_chars: usize, trailer: F) -> String
where
    F: Fn(usize, usize) -> String,
{
    let total = blocks.len();
    let files_left = files_remaining(&blocks);
    let mut output = header;
    let mut used = output.chars().count();

    if total > 0 {
        let note = trailer(total, files_left[0]);
        let note_len = note.chars().count();
        if used + note_len > max_chars {
            if note_len >= max_chars {
                return take_chars(&note, max_chars);
            }
            let mut shortened = take_chars(&output, max_chars - note_len);
            shortened.push_str(&note);
            return shortened;
        }
    }

    for (index, block) in blocks.iter().enumerate() {
        let block_len = block.text.chars().count();
        let after = total - index - 1;
        let reserve = if after == 0 {
            0
        } else {
            trailer(after, files_left[index + 1]).chars().count()
        };

        if used + block_len + reserve > max_chars {
            // Reserved by the previous iteration, or checked above for the first block
            output.push_str(&trailer(total - index, files_left[index]));
            return output;
        }

        output.push_str(&block.text);
        used += block_len;
    }

    output
}

/// `remaining[i]` is the number of distinct files among `blocks[i..]`
fn files_remaining(blocks: &[Block]) -> Vec<usize> {
    let mut remaining = vec![0; blocks.len() + 1];
    for index in (0..blocks.len()).rev() {
        let same_file_follows = blocks
            .get(index + 1)
            .is_some_and(|next| next.file_index == blocks[index].file_index);
        remaining[index] = remaining[index + 1] + usize::from(!same_file_follows);
    }
    remaining
}

fn take_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}
