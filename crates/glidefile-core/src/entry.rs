//! Directory entry type.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Display name of the synthetic parent entry.
pub const PARENT_MARKER_NAME: &str = "..";

/// One row of a listing: a file, a directory, or the synthetic parent marker.
///
/// Entries are immutable snapshots and are rebuilt on every directory read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Absolute path of the entry.
    pub path: PathBuf,
    /// Name shown to the user. Deep-scan entries use the root-relative path.
    pub display_name: String,
    pub is_dir: bool,
    pub is_parent_marker: bool,
    /// Size in bytes (0 for directories).
    pub size: u64,
    pub modified: SystemTime,
}

impl DirectoryEntry {
    /// Build an entry from filesystem metadata.
    pub fn from_metadata(
        path: impl Into<PathBuf>,
        display_name: impl Into<String>,
        metadata: &Metadata,
    ) -> Self {
        let is_dir = metadata.is_dir();
        Self {
            path: path.into(),
            display_name: display_name.into(),
            is_dir,
            is_parent_marker: false,
            size: if is_dir { 0 } else { metadata.len() },
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }

    /// The synthetic ".." entry pointing at `parent`.
    pub fn parent_marker(parent: impl Into<PathBuf>) -> Self {
        Self {
            path: parent.into(),
            display_name: PARENT_MARKER_NAME.to_string(),
            is_dir: true,
            is_parent_marker: true,
            size: 0,
            modified: SystemTime::UNIX_EPOCH,
        }
    }

    /// Final path component, falling back to the display name.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display_name.clone())
    }

    /// Whether this entry is a regular file (not a directory or the marker).
    pub fn is_file(&self) -> bool {
        !self.is_dir && !self.is_parent_marker
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
