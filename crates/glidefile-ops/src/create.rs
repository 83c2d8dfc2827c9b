//! File and directory creation.

use std::fs::{self, File};
use std::path::{Component, Path};

use tracing::debug;

use glidefile_core::{FsError, FsResult};

/// Extension appended to file names that have none.
pub const DEFAULT_FILE_EXTENSION: &str = "txt";

#[cfg(windows)]
const INVALID_PATH_CHARS: &[char] = &['\0', '<', '>', ':', '"', '|', '?', '*'];
#[cfg(not(windows))]
const INVALID_PATH_CHARS: &[char] = &['\0'];

/// Create a file or directory under `base` from raw user input.
///
/// Input ending in a path separator creates a directory (and any missing
/// parents). Anything else creates an empty file, appending `.txt` when the
/// last segment has no extension. Returns the created leaf name.
pub fn create_entry(base: &Path, input: &str) -> FsResult<String> {
    if input.trim().is_empty() {
        return Err(FsError::EmptyInput);
    }
    if let Some(c) = input.chars().find(|c| INVALID_PATH_CHARS.contains(c)) {
        return Err(FsError::invalid_name(
            input,
            format!("contains invalid character {c:?}"),
        ));
    }

    let is_dir = input.ends_with(std::path::is_separator);
    let mut relative = input.to_string();
    if !is_dir && !has_extension(&relative) {
        relative.push('.');
        relative.push_str(DEFAULT_FILE_EXTENSION);
    }

    let relative_path = Path::new(&relative);
    if relative_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(FsError::invalid_name(
            input,
            "must stay inside the current directory",
        ));
    }

    let target = base.join(relative_path);
    if fs::symlink_metadata(&target).is_ok() {
        return Err(FsError::already_exists(relative));
    }

    if is_dir {
        fs::create_dir_all(&target).map_err(|e| FsError::create(&target, e))?;
    } else {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| FsError::create(parent, e))?;
        }
        File::create_new(&target).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => FsError::already_exists(relative.clone()),
            _ => FsError::create(&target, e),
        })?;
    }

    let name = leaf_name(&relative);
    debug!(path = %target.display(), is_dir, "created entry");
    Ok(name)
}

/// Whether the last segment has a dot that is not its final character.
fn has_extension(input: &str) -> bool {
    let segment = input.rsplit(std::path::is_separator).next().unwrap_or(input);
    segment
        .rfind('.')
        .is_some_and(|idx| idx + 1 < segment.len())
}

fn leaf_name(relative: &str) -> String {
    relative
        .trim_end_matches(std::path::is_separator)
        .rsplit(std::path::is_separator)
        .next()
        .unwrap_or(relative)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension("notes.md"));
        assert!(has_extension(".env"));
        assert!(has_extension("dir/archive.tar.gz"));
        assert!(!has_extension("notes"));
        assert!(!has_extension("notes."));
        assert!(!has_extension("v1.2/notes"));
    }

    #[test]
    fn test_leaf_name() {
        assert_eq!(leaf_name("sub/"), "sub");
        assert_eq!(leaf_name("a/b/c.txt"), "c.txt");
        assert_eq!(leaf_name("plain.txt"), "plain.txt");
    }
}
