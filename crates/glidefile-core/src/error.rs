//! Error types for filesystem operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across glidefile.
pub type FsResult<T> = Result<T, FsError>;

/// Errors that can occur while listing or manipulating the filesystem.
///
/// The `Display` output is what the user sees in the status line.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path no longer exists.
    #[error("Path not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Permission or other I/O failure while reading.
    #[error("Cannot access {}: {source}", path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Name contains characters that are not valid for a path.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Destination already exists.
    #[error("'{name}' already exists.")]
    AlreadyExists { name: String },

    /// Input was empty or whitespace.
    #[error("Input was empty.")]
    EmptyInput,

    /// Operation was cancelled by the user.
    #[error("Operation was cancelled")]
    Cancelled,

    /// Destination lies inside the source directory.
    #[error("Cannot place '{}' inside itself", path.display())]
    NestedDestination { path: PathBuf },

    #[error("Copy failed for {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Delete failed for {}: {source}", path.display())]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rename failed for {}: {source}", path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Create failed for {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Create a read-side I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Access { path, source },
        }
    }

    pub fn copy(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Copy {
            path: path.into(),
            source,
        }
    }

    pub fn delete(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Delete {
            path: path.into(),
            source,
        }
    }

    pub fn rename(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Rename {
            path: path.into(),
            source,
        }
    }

    pub fn create(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Create {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn already_exists(name: impl Into<String>) -> Self {
        Self::AlreadyExists { name: name.into() }
    }

    /// Whether this error represents a user cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_maps_not_found() {
        let err = FsError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, FsError::NotFound { .. }));
    }

    #[test]
    fn test_io_maps_everything_else_to_access() {
        let err = FsError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, FsError::Access { .. }));
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(FsError::EmptyInput.to_string(), "Input was empty.");
        assert_eq!(
            FsError::already_exists("notes.txt").to_string(),
            "'notes.txt' already exists."
        );
        assert_eq!(FsError::Cancelled.to_string(), "Operation was cancelled");
        assert!(FsError::Cancelled.is_cancelled());
    }
}
