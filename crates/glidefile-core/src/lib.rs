//! Core types and traits for glidefile.
//!
//! This crate provides the fundamental pieces shared by the scanner, the
//! operations engine and the terminal interface: directory entries, the
//! error taxonomy, the ignore matcher and the shallow directory lister.

mod config;
mod entry;
mod error;
mod ignore;
mod lister;

pub use config::{DeepScanConfig, DeepScanConfigBuilder};
pub use entry::{DirectoryEntry, PARENT_MARKER_NAME};
pub use error::{FsError, FsResult};
pub use ignore::{BUILTIN_IGNORE_PATTERNS, IGNORE_FILE_NAME, PathIgnoreMatcher, relative_slash_path};
pub use lister::{list_directory, same_path};
