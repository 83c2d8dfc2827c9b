//! Rename operation.

use std::fs;
use std::path::Path;

use tracing::debug;

use glidefile_core::{FsError, FsResult};

/// Rename `old_name` to `new_name` inside `base`.
///
/// Fails with [`FsError::AlreadyExists`] if anything already occupies the
/// destination. Returns the new name.
pub fn rename_entry(base: &Path, old_name: &str, new_name: &str) -> FsResult<String> {
    validate_filename(new_name)?;

    let source = base.join(old_name);
    fs::symlink_metadata(&source).map_err(|e| FsError::io(&source, e))?;

    let destination = base.join(new_name);
    if fs::symlink_metadata(&destination).is_ok() {
        return Err(FsError::already_exists(new_name));
    }

    fs::rename(&source, &destination).map_err(|e| FsError::rename(&source, e))?;
    debug!(from = %source.display(), to = %destination.display(), "renamed entry");
    Ok(new_name.to_string())
}

/// Validate a filename for cross-platform compatibility.
pub fn validate_filename(name: &str) -> FsResult<()> {
    let invalid = |reason: &str| Err(FsError::invalid_name(name, reason));

    if name.trim().is_empty() {
        return invalid("name cannot be empty");
    }

    if name.len() > 255 {
        return invalid("name is too long (max 255 bytes)");
    }

    for c in ['/', '\0'] {
        if name.contains(c) {
            return invalid(&format!("name cannot contain {c:?}"));
        }
    }

    #[cfg(target_os = "windows")]
    {
        for c in ['\\', ':', '*', '?', '"', '<', '>', '|'] {
            if name.contains(c) {
                return invalid(&format!("name cannot contain {c:?}"));
            }
        }

        let reserved = [
            "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7",
            "COM8", "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
        ];
        let upper_name = name.to_uppercase();
        let base_name = upper_name.split('.').next().unwrap_or("");
        if reserved.contains(&base_name) {
            return invalid("reserved filename");
        }
    }

    if name.starts_with(' ') || name.ends_with(' ') {
        return invalid("name cannot start or end with spaces");
    }

    if name == "." || name == ".." {
        return invalid("'.' and '..' are reserved names");
    }

    if name.ends_with('.') {
        return invalid("name cannot end with a dot");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_filename_valid() {
        assert!(validate_filename("test.txt").is_ok());
        assert!(validate_filename("my-file").is_ok());
        assert!(validate_filename(".hidden").is_ok());
        assert!(validate_filename("file with spaces").is_ok());
    }

    #[test]
    fn test_validate_filename_invalid() {
        for name in ["", "   ", "test/file", ".", "..", "file ", " file", "file."] {
            let err = validate_filename(name).unwrap_err();
            assert!(matches!(err, FsError::InvalidName { .. }), "{name:?}");
        }
    }
}
