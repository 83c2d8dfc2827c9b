//! Ignore rules for recursive traversal.
//!
//! A [`PathIgnoreMatcher`] combines the built-in exclusion set with every
//! `.gitignore` found between the root and the filesystem root. After
//! construction it is immutable and can be shared freely across threads.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};

/// Name of the exclusion files discovered by walking upward from the root.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// Build output, dependency and version-control directories.
pub const BUILTIN_IGNORE_PATTERNS: &[&str] = &[
    "**/bin/**",
    "**/obj/**",
    "**/node_modules/**",
    "**/.git/**",
    "**/.vs/**",
    "**/.vscode/**",
    "**/target/**",
];

/// Answers whether a path is excluded from deep scans.
#[derive(Debug, Clone)]
pub struct PathIgnoreMatcher {
    root: PathBuf,
    set: GlobSet,
    pattern_count: usize,
}

impl PathIgnoreMatcher {
    /// Build a matcher for `root` from built-ins and discovered `.gitignore` files.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extra_patterns(root, &[])
    }

    /// Like [`new`](Self::new) with additional gitignore-syntax patterns.
    pub fn with_extra_patterns(root: impl Into<PathBuf>, extra: &[String]) -> Self {
        let root = root.into();
        let mut lines: Vec<String> = BUILTIN_IGNORE_PATTERNS
            .iter()
            .map(|p| p.to_string())
            .collect();
        lines.extend(discover_ignore_lines(&root));
        lines.extend(extra.iter().cloned());
        Self::from_patterns(root, lines)
    }

    /// Build a matcher from explicit patterns without reading any file.
    pub fn from_patterns<I, S>(root: impl Into<PathBuf>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = root.into();
        let mut builder = GlobSetBuilder::new();
        let mut pattern_count = 0;

        for line in patterns {
            for glob in normalize_pattern(line.as_ref()) {
                match GlobBuilder::new(&glob).literal_separator(true).build() {
                    Ok(compiled) => {
                        builder.add(compiled);
                        pattern_count += 1;
                    }
                    Err(err) => warn!(pattern = %glob, error = %err, "skipping invalid ignore pattern"),
                }
            }
        }

        let set = builder.build().unwrap_or_else(|err| {
            warn!(error = %err, "failed to compile ignore set, nothing will be ignored");
            GlobSet::empty()
        });

        debug!(root = %root.display(), patterns = pattern_count, "ignore matcher ready");
        Self {
            root,
            set,
            pattern_count,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of compiled globs.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Whether `path` should be excluded.
    ///
    /// The root itself and paths outside the root are never ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        if relative.as_os_str().is_empty() {
            return false;
        }
        self.set.is_match(relative_slash_path(relative))
    }
}

/// Render a relative path with `/` separators.
pub fn relative_slash_path(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Read every `.gitignore` from `root` up to the filesystem root.
fn discover_ignore_lines(root: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    for dir in root.ancestors() {
        let file = dir.join(IGNORE_FILE_NAME);
        let Ok(contents) = fs::read_to_string(&file) else {
            continue;
        };
        debug!(file = %file.display(), "loaded ignore file");
        lines.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(String::from),
        );
    }
    lines
}

/// Turn one gitignore-style line into the globs that implement it.
///
/// A matched directory also excludes everything under it, so each rule
/// yields both the bare glob and its `/**` form.
fn normalize_pattern(line: &str) -> Vec<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
        return Vec::new();
    }

    if let Some(prefix) = line.strip_suffix("/**") {
        return vec![prefix.to_string(), line.to_string()];
    }

    let body = line.trim_end_matches('/');
    let (body, anchored) = match body.strip_prefix('/') {
        Some(rest) => (rest, true),
        None => (body, false),
    };
    if body.is_empty() {
        return Vec::new();
    }

    let base = if anchored || body.contains('/') || body.starts_with("**") {
        body.to_string()
    } else {
        format!("**/{body}")
    };
    vec![format!("{base}/**"), base]
}
