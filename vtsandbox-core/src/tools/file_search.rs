//! Fuzzy filename search and literal content search over the visible tree

use super::fuzzy::partial_ratio;
use super::output::OutputGovernor;
use super::path_guard::{PathGuard, ValidatedPath};
use super::traits::Tool;
use super::types::ToolOutput;
use crate::config::SearchConfig;
use crate::config::constants::{search_types, tools};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, info};

/// A file whose name resembles the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    pub path: String,
    pub filename: String,
    /// Similarity on a 0-100 scale
    pub score: u8,
}

/// A line containing the query, with surrounding lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentMatch {
    /// Line number (1-based)
    pub line_number: usize,
    pub content: String,
    pub context: Vec<ContextLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextLine {
    pub line_number: usize,
    pub content: String,
    pub is_match: bool,
}

/// Search engine bound to one [`PathGuard`]
#[derive(Debug, Clone)]
pub struct Finder {
    guard: Arc<PathGuard>,
    config: SearchConfig,
}

impl Finder {
    pub fn new(guard: Arc<PathGuard>, config: SearchConfig) -> Self {
        Self { guard, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Score every visible file's basename against `query`, best first
    pub fn fuzzy_search(&self, query: &str, max_results: usize) -> Vec<SearchMatch> {
        let mut matches: Vec<SearchMatch> = self
            .guard
            .list_files(self.guard.repo_root())
            .into_iter()
            .filter_map(|path| {
                let filename = path.file_name()?.to_string_lossy().into_owned();
                let score = partial_ratio(query, &filename);
                (score > self.config.fuzzy_threshold).then(|| SearchMatch {
                    path: self.guard.display_path(&path),
                    filename,
                    score,
                })
            })
            .collect();

        // Stable, so equal scores keep walk order
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        OutputGovernor::limit_matches(&matches, max_results)
    }

    /// Literal search for `query` in every readable text file under `directory`
    pub fn content_search(
        &self,
        query: &str,
        directory: &ValidatedPath,
        case_sensitive: bool,
        max_results: usize,
        max_per_file: usize,
    ) -> IndexMap<String, Vec<ContentMatch>> {
        let mut results = IndexMap::new();
        if query.is_empty() {
            return results;
        }

        let needle = if case_sensitive {
            query.to_string()
        } else {
            query.to_lowercase()
        };
        let mut remaining = max_results;

        for path in self.guard.list_files(directory) {
            if remaining == 0 {
                break;
            }

            let Some(text) = self.read_text(&path) else {
                continue;
            };

            let limit = max_per_file.min(remaining);
            let matches = self.search_text(&text, &needle, case_sensitive, limit);
            if matches.is_empty() {
                continue;
            }

            remaining -= matches.len();
            results.insert(self.guard.display_path(&path), matches);
        }

        results
    }

    /// File content if it is small enough and does not look binary
    fn read_text(&self, path: &ValidatedPath) -> Option<String> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) => {
                debug!(path = %path, error = %err, "skipping unreadable file");
                return None;
            }
        };
        if metadata.len() > self.config.max_file_size {
            debug!(path = %path, size = metadata.len(), "skipping large file");
            return None;
        }

        let mut head = Vec::with_capacity(self.config.binary_sniff_bytes);
        let opened = fs::File::open(path).and_then(|file| {
            file.take(self.config.binary_sniff_bytes as u64)
                .read_to_end(&mut head)
        });
        if let Err(err) = opened {
            debug!(path = %path, error = %err, "skipping unreadable file");
            return None;
        }
        if head.contains(&0) {
            debug!(path = %path, "skipping binary file");
            return None;
        }

        match fs::read(path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) => {
                debug!(path = %path, error = %err, "skipping unreadable file");
                None
            }
        }
    }

    fn search_text(
        &self,
        text: &str,
        needle: &str,
        case_sensitive: bool,
        limit: usize,
    ) -> Vec<ContentMatch> {
        let lines: Vec<&str> = text.lines().collect();
        let radius = self.config.context_lines;
        let mut matches = Vec::new();

        for (index, line) in lines.iter().enumerate() {
            if matches.len() >= limit {
                break;
            }

            let found = if case_sensitive {
                line.contains(needle)
            } else {
                line.to_lowercase().contains(needle)
            };
            if !found {
                continue;
            }

            let start = index.saturating_sub(radius);
            let end = (index + radius + 1).min(lines.len());
            let context = (start..end)
                .map(|position| ContextLine {
                    line_number: position + 1,
                    content: lines[position].to_string(),
                    is_match: position == index,
                })
                .collect();

            matches.push(ContentMatch {
                line_number: index + 1,
                content: line.to_string(),
                context,
            });
        }

        matches
    }
}

#[derive(Debug, Deserialize)]
struct SearchInput {
    search_type: String,
    query: String,
    #[serde(default = "default_directory")]
    directory: String,
    #[serde(default)]
    case_sensitive: bool,
    max_results: Option<usize>,
    max_per_file: Option<usize>,
}

fn default_directory() -> String {
    ".".to_string()
}

/// `file_content_search` tool over a [`Finder`]
#[derive(Clone)]
pub struct SearchTool {
    finder: Finder,
}

impl SearchTool {
    pub fn new(finder: Finder) -> Self {
        Self { finder }
    }

    fn run(&self, input: SearchInput) -> Result<String> {
        if input.query.is_empty() {
            bail!("query parameter is required");
        }
        let config = self.finder.config();

        match input.search_type.as_str() {
            search_types::FUZZY_FILE => {
                let max_results = input.max_results.unwrap_or(config.default_fuzzy_results);
                let results = self.finder.fuzzy_search(&input.query, max_results);
                Ok(OutputGovernor::format_file_search_results(
                    &results,
                    &input.query,
                    config.file_results_max_chars,
                ))
            }
            search_types::CONTENT => {
                let directory = self.finder.guard.validate(&input.directory)?;
                if !directory.exists() {
                    bail!("Directory not found: {}", input.directory);
                }
                let max_results = input.max_results.unwrap_or(config.default_content_results);
                let max_per_file = input.max_per_file.unwrap_or(config.default_max_per_file);
                let results = self.finder.content_search(
                    &input.query,
                    &directory,
                    input.case_sensitive,
                    max_results,
                    max_per_file,
                );
                let limited =
                    OutputGovernor::limit_content_matches(&results, max_results, max_per_file);
                Ok(OutputGovernor::format_content_search_results(
                    &limited,
                    &input.query,
                    config.content_results_max_chars,
                ))
            }
            other => Err(anyhow!("Unknown search_type '{}'", other)),
        }
    }
}

#[async_trait]
impl Tool for SearchTool {
    async fn execute(&self, args: Value) -> Result<ToolOutput> {
        let input: SearchInput = serde_json::from_value(args).map_err(|err| {
            anyhow!("Invalid arguments for {}: {}", tools::FILE_CONTENT_SEARCH, err)
        })?;
        let search_type = input.search_type.clone();
        let query = input.query.clone();

        let content = self.run(input)?;
        info!(search_type = %search_type, query = %query, "search completed");
        Ok(ToolOutput::completed(content))
    }

    fn name(&self) -> &'static str {
        tools::FILE_CONTENT_SEARCH
    }

    fn description(&self) -> &'static str {
        "Fuzzy filename search and literal content search within the workspace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::path_guard::AccessPolicy;
    use crate::utils::ToolIgnore;
    use std::path::Path;
    use tempfile::TempDir;

    fn finder(root: &Path, patterns: &[&str]) -> Finder {
        let ignore = ToolIgnore::from_patterns(root, patterns.iter().copied());
        let policy = AccessPolicy::new(root, &[], ignore).unwrap();
        Finder::new(Arc::new(PathGuard::new(policy)), SearchConfig::default())
    }

    #[test]
    fn fuzzy_ranks_closest_names_first() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["agent.py", "agent_test.py", "readme.md"] {
            fs::write(temp_dir.path().join(name), "").unwrap();
        }

        let results = finder(temp_dir.path(), &[]).fuzzy_search("agen", 10);
        let names: Vec<&str> = results.iter().map(|m| m.filename.as_str()).collect();
        assert_eq!(&names[..2], &["agent.py", "agent_test.py"]);
        assert!(results.iter().all(|m| m.score > 50));
    }

    #[test]
    fn content_search_collects_context() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("notes.txt"),
            "one\ntwo\nNeedle three\nfour\nfive\nsix\n",
        )
        .unwrap();

        let finder = finder(temp_dir.path(), &[]);
        let root = finder.guard.validate(".").unwrap();
        let results = finder.content_search("needle", &root, false, 50, 10);
        let matches = &results["notes.txt"];
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line_number, 3);
        let numbers: Vec<usize> = matches[0].context.iter().map(|c| c.line_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert!(matches[0].context[2].is_match);

        assert!(finder.content_search("needle", &root, true, 50, 10).is_empty());
    }

    #[test]
    fn content_search_skips_binary_and_large_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("blob.bin"), b"needle\0needle").unwrap();
        fs::write(
            temp_dir.path().join("huge.txt"),
            "needle\n".repeat(200_000),
        )
        .unwrap();
        fs::write(temp_dir.path().join("small.txt"), "needle\n").unwrap();

        let finder = finder(temp_dir.path(), &[]);
        let root = finder.guard.validate(".").unwrap();
        let results = finder.content_search("needle", &root, false, 50, 10);
        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["small.txt"]);
    }

    #[test]
    fn global_cap_is_never_exceeded() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(temp_dir.path().join(name), "hit\n".repeat(4)).unwrap();
        }

        let finder = finder(temp_dir.path(), &[]);
        let root = finder.guard.validate(".").unwrap();
        let results = finder.content_search("hit", &root, false, 5, 3);
        let total: usize = results.values().map(Vec::len).sum();
        assert_eq!(total, 5);
        assert_eq!(results["a.txt"].len(), 3);
        assert_eq!(results["b.txt"].len(), 2);
        assert!(!results.contains_key("c.txt"));
    }

    #[test]
    fn ignored_files_are_not_searched() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("app.log"), "secret\n").unwrap();
        fs::write(temp_dir.path().join("app.rs"), "secret\n").unwrap();

        let finder = finder(temp_dir.path(), &["*.log"]);
        let root = finder.guard.validate(".").unwrap();
        let results = finder.content_search("secret", &root, false, 50, 10);
        assert_eq!(results.keys().collect::<Vec<_>>(), vec!["app.rs"]);
    }
}
