//! Recursive deep scanner for glidefile.
//!
//! Walks a directory tree in parallel with jwalk, pruning ignored
//! directories as it goes, and returns a flat list of every remaining file.
//! The filter engine matches queries against this list.
//!
//! # Example
//!
//! ```rust,no_run
//! use glidefile_scan::{DeepScanConfig, DeepScanner};
//! use tokio_util::sync::CancellationToken;
//!
//! let scanner = DeepScanner::new();
//! let files = scanner
//!     .scan(&DeepScanConfig::new("/path/to/project"), &CancellationToken::new())
//!     .unwrap();
//!
//! for file in files {
//!     println!("{}", file.display_name);
//! }
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use glidefile_scan::DeepScanner;
//!
//! let scanner = DeepScanner::new();
//! let mut progress_rx = scanner.subscribe();
//!
//! tokio::spawn(async move {
//!     while let Ok(progress) = progress_rx.recv().await {
//!         println!("Scanned {} files", progress.files_scanned);
//!     }
//! });
//! ```

mod progress;
mod scanner;

pub use progress::ScanProgress;
pub use scanner::DeepScanner;

// Re-export core types for convenience
pub use glidefile_core::{DeepScanConfig, DirectoryEntry, FsError, FsResult, PathIgnoreMatcher};
