use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// `*` and `?` may cross separators, as with fnmatch
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Ordered ignore patterns loaded from a .toolignore file
#[derive(Debug, Clone, Default)]
pub struct ToolIgnore {
    /// Directory relative paths are matched against
    root_dir: PathBuf,
    patterns: Vec<CompiledPattern>,
    /// File the patterns came from, if it existed
    source: Option<PathBuf>,
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    original: String,
    pattern: Pattern,
}

impl ToolIgnore {
    /// Load patterns from `ignore_file`. A missing file yields an empty set.
    pub fn load(root_dir: &Path, ignore_file: &Path) -> Result<Self> {
        if !ignore_file.exists() {
            debug!(path = %ignore_file.display(), "no ignore file, nothing is ignored");
            return Ok(Self::from_patterns(root_dir, std::iter::empty::<&str>()));
        }

        let content = fs::read_to_string(ignore_file)
            .with_context(|| format!("Failed to read ignore file: {}", ignore_file.display()))?;

        let mut ignore = Self::parse(root_dir, &content);
        ignore.source = Some(ignore_file.to_path_buf());
        debug!(
            count = ignore.patterns.len(),
            path = %ignore_file.display(),
            "loaded ignore patterns"
        );
        Ok(ignore)
    }

    /// Parse ignore file content: one glob per line, blank lines and `#` comments skipped
    pub fn parse(root_dir: &Path, content: &str) -> Self {
        Self::from_patterns(
            root_dir,
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn from_patterns<I, S>(root_dir: &Path, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for raw in patterns {
            let raw = raw.as_ref();
            // A trailing slash marks a directory; prefix matching already covers descendants.
            let normalized = raw.trim_end_matches('/');
            if normalized.is_empty() {
                continue;
            }
            match Pattern::new(normalized) {
                Ok(pattern) => compiled.push(CompiledPattern {
                    original: raw.to_string(),
                    pattern,
                }),
                Err(err) => warn!(pattern = raw, error = %err, "skipping invalid ignore pattern"),
            }
        }

        Self {
            root_dir: root_dir.to_path_buf(),
            patterns: compiled,
            source: None,
        }
    }

    /// Whether `path` or any of its ancestors matches a pattern.
    ///
    /// Paths inside the root are matched by their relative form, anything else by
    /// its full form. Every prefix of the path is tried, so ignoring a directory
    /// hides everything below it.
    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.patterns.is_empty() {
            return false;
        }

        let relative = path.strip_prefix(&self.root_dir).unwrap_or(path);
        let candidates = prefixes(relative);

        for compiled in &self.patterns {
            for candidate in &candidates {
                if compiled.pattern.matches_with(candidate, MATCH_OPTIONS) {
                    debug!(
                        path = %path.display(),
                        matched = candidate.as_str(),
                        pattern = compiled.original.as_str(),
                        "path matches ignore pattern"
                    );
                    return true;
                }
            }
        }

        false
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.original.as_str())
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }
}

/// The full path plus every leading prefix, shortest first: `a`, `a/b`, `a/b/c`
fn prefixes(path: &Path) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => continue,
            other => current.push(other.as_os_str()),
        }
        if matches!(component, Component::RootDir | Component::Prefix(_)) {
            continue;
        }
        out.push(current.to_string_lossy().into_owned());
    }
    if out.is_empty() {
        out.push(path.to_string_lossy().into_owned());
    }
    out
}
