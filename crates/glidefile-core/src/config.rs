//! Deep scan configuration.

use std::path::PathBuf;

use derive_builder::Builder;

/// Files between progress broadcasts unless configured otherwise.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 256;

/// Configuration for a recursive deep scan.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct DeepScanConfig {
    /// Directory to scan.
    pub root: PathBuf,

    /// Follow symbolic links.
    #[builder(default = "false")]
    pub follow_symlinks: bool,

    /// Number of threads for scanning (0 = auto-detect).
    #[builder(default = "0")]
    pub threads: usize,

    /// Files between progress broadcasts.
    #[builder(default = "DEFAULT_PROGRESS_INTERVAL")]
    pub progress_interval: u64,

    /// Patterns added on top of built-ins and `.gitignore` files.
    #[builder(default)]
    pub extra_ignore_patterns: Vec<String>,
}

impl DeepScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        match self.root {
            Some(ref root) if root.as_os_str().is_empty() => {
                Err("Root path cannot be empty".to_string())
            }
            Some(_) => {
                if self.progress_interval == Some(0) {
                    return Err("Progress interval must be positive".to_string());
                }
                Ok(())
            }
            None => Err("Root path is required".to_string()),
        }
    }
}

impl DeepScanConfig {
    /// Create a new config builder.
    pub fn builder() -> DeepScanConfigBuilder {
        DeepScanConfigBuilder::default()
    }

    /// Create a default config rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            threads: 0,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            extra_ignore_patterns: Vec::new(),
        }
    }
}
