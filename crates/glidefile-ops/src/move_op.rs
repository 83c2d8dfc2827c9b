//! Move operation.
//!
//! Within one filesystem a move is a single rename. Across filesystems it
//! becomes copy-then-delete, and the source is only removed once the copy
//! has fully succeeded.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use glidefile_core::{FsError, FsResult};

use crate::copy::{copy_with_progress, remove_partial, spawn_transfer};
use crate::delete::delete_entry;
use crate::progress::{OperationProgress, OperationType, TransferResult};

/// Move `source` to `destination`, reporting progress.
///
/// Same-volume moves report an instantaneous 0% to 100% transition.
pub fn move_entry(
    source: &Path,
    destination: &Path,
    cancel: &CancellationToken,
    on_progress: &mut dyn FnMut(&OperationProgress),
) -> FsResult<u64> {
    let metadata = fs::symlink_metadata(source).map_err(|e| FsError::io(source, e))?;
    if fs::symlink_metadata(destination).is_ok() {
        return Err(FsError::already_exists(file_name(destination)));
    }
    if metadata.is_dir() && destination.starts_with(source) {
        return Err(FsError::NestedDestination {
            path: source.to_path_buf(),
        });
    }
    if cancel.is_cancelled() {
        return Err(FsError::Cancelled);
    }

    if same_volume(source, destination) {
        let mut progress = OperationProgress::new(OperationType::Move, 1);
        progress.set_current_file(Some(source.to_path_buf()));
        on_progress(&progress);

        match fs::rename(source, destination) {
            Ok(()) => {
                progress.finish();
                on_progress(&progress);
                debug!(from = %source.display(), to = %destination.display(), "moved by rename");
                return Ok(if metadata.is_dir() { 0 } else { metadata.len() });
            }
            Err(err) if err.kind() == std::io::ErrorKind::CrossesDevices => {
                debug!(from = %source.display(), "rename crossed devices, copying instead");
            }
            Err(err) => return Err(FsError::rename(source, err)),
        }
    }

    move_across_volumes(source, destination, cancel, on_progress)
}

/// Copy then delete. A failed copy never touches the source.
pub(crate) fn move_across_volumes(
    source: &Path,
    destination: &Path,
    cancel: &CancellationToken,
    on_progress: &mut dyn FnMut(&OperationProgress),
) -> FsResult<u64> {
    if fs::symlink_metadata(destination).is_ok() {
        return Err(FsError::already_exists(file_name(destination)));
    }

    match copy_with_progress(source, destination, OperationType::Move, cancel, on_progress) {
        Ok(bytes) => {
            delete_entry(source)?;
            Ok(bytes)
        }
        Err(FsError::Cancelled) => Err(FsError::Cancelled),
        Err(err) => {
            remove_partial(destination);
            Err(err)
        }
    }
}

#[cfg(unix)]
fn same_volume(source: &Path, destination: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let Some(parent) = destination.parent() else {
        return false;
    };
    match (fs::symlink_metadata(source), fs::metadata(parent)) {
        (Ok(src), Ok(dst)) => src.dev() == dst.dev(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_volume(source: &Path, destination: &Path) -> bool {
    let root = |p: &Path| {
        std::path::absolute(p)
            .ok()
            .and_then(|abs| abs.components().next().map(|c| c.as_os_str().to_ascii_lowercase()))
    };
    root(source).is_some() && root(source) == root(destination)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Start a background move.
pub fn start_move(
    source: PathBuf,
    destination: PathBuf,
    cancel: CancellationToken,
) -> mpsc::Receiver<TransferResult> {
    spawn_transfer(source, destination, cancel, OperationType::Move, move_entry)
}
