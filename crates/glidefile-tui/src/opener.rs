//! Hands files off to the operating system's default application.

use std::path::Path;

use tracing::{debug, warn};

/// Result of attempting to open a file.
#[derive(Debug, PartialEq, Eq)]
pub enum OpenResult {
    /// The launcher accepted the file.
    Opened,
    /// Error opening file.
    Error(String),
}

/// Open a file with the system default application.
///
/// The launcher is detached so the session keeps running while the
/// application is open.
pub fn open_with_system(path: &Path) -> OpenResult {
    match open::that_detached(path) {
        Ok(()) => {
            debug!(path = %path.display(), "opened with system handler");
            OpenResult::Opened
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "system open failed");
            OpenResult::Error(format!("Failed to open: {e}"))
        }
    }
}
