//! Shallow directory listing.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::entry::DirectoryEntry;
use crate::error::{FsError, FsResult};

/// List `path`: parent marker first, then directories, then files.
///
/// Each run is sorted case-insensitively with a stable sort. The parent
/// marker is omitted at the filesystem root. Symlinks are followed; a
/// broken link is listed using its own metadata.
pub fn list_directory(path: &Path) -> FsResult<Vec<DirectoryEntry>> {
    let read_dir = fs::read_dir(path).map_err(|e| FsError::io(path, e))?;

    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for item in read_dir {
        let item = item.map_err(|e| FsError::io(path, e))?;
        let entry_path = item.path();
        let metadata = match fs::metadata(&entry_path) {
            Ok(m) => m,
            Err(_) => match item.metadata() {
                Ok(m) => m,
                Err(err) => {
                    debug!(path = %entry_path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            },
        };

        let name = item.file_name().to_string_lossy().into_owned();
        let entry = DirectoryEntry::from_metadata(entry_path, name, &metadata);
        if entry.is_dir {
            dirs.push(entry);
        } else {
            files.push(entry);
        }
    }

    dirs.sort_by_cached_key(|e| e.display_name.to_lowercase());
    files.sort_by_cached_key(|e| e.display_name.to_lowercase());

    let mut entries = Vec::with_capacity(dirs.len() + files.len() + 1);
    if let Some(parent) = path.parent() {
        entries.push(DirectoryEntry::parent_marker(parent));
    }
    entries.append(&mut dirs);
    entries.append(&mut files);
    Ok(entries)
}

/// Compare two paths the way the host filesystem does.
///
/// Case-insensitive on Windows, exact elsewhere.
pub fn same_path(a: &Path, b: &Path) -> bool {
    if cfg!(windows) {
        a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
    } else {
        a == b
    }
}
