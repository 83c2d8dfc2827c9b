//! Cancellable copy with byte-level progress.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use glidefile_core::{FsError, FsResult};

use crate::progress::{OperationComplete, OperationProgress, OperationType, TransferResult};
use crate::{COPY_BUFFER_SIZE, OPERATION_CHANNEL_SIZE};

/// Copy a file or directory tree to `destination`.
///
/// `on_progress` is called once with the computed total and then after
/// every chunk. The token is checked between chunks, files and directories;
/// on cancellation everything written so far is removed before
/// [`FsError::Cancelled`] is returned. Other failures leave the destination
/// as it is. Returns the number of bytes copied.
pub fn copy_entry(
    source: &Path,
    destination: &Path,
    cancel: &CancellationToken,
    on_progress: &mut dyn FnMut(&OperationProgress),
) -> FsResult<u64> {
    copy_with_progress(source, destination, OperationType::Copy, cancel, on_progress)
}

pub(crate) fn copy_with_progress(
    source: &Path,
    destination: &Path,
    operation_type: OperationType,
    cancel: &CancellationToken,
    on_progress: &mut dyn FnMut(&OperationProgress),
) -> FsResult<u64> {
    let metadata = fs::symlink_metadata(source).map_err(|e| FsError::io(source, e))?;
    if fs::symlink_metadata(destination).is_ok() {
        return Err(FsError::already_exists(display_name(destination)));
    }
    if metadata.is_dir() && destination.starts_with(source) {
        return Err(FsError::NestedDestination {
            path: source.to_path_buf(),
        });
    }

    let total = if metadata.is_dir() {
        directory_size(source)
    } else {
        metadata.len()
    };
    let mut progress = OperationProgress::new(operation_type, total);
    progress.set_current_file(Some(source.to_path_buf()));
    on_progress(&progress);

    let mut copier = TreeCopier {
        cancel,
        progress: &mut progress,
        on_progress: &mut *on_progress,
        buffer: vec![0; COPY_BUFFER_SIZE],
    };
    let result = if metadata.file_type().is_symlink() {
        copy_symlink(source, destination)
    } else if metadata.is_dir() {
        copier.copy_dir(source, destination)
    } else {
        copier.copy_file(source, destination)
    };

    match result {
        Ok(()) => {
            progress.finish();
            on_progress(&progress);
            Ok(progress.bytes_processed)
        }
        Err(FsError::Cancelled) => {
            remove_partial(destination);
            info!(source = %source.display(), "copy cancelled, partial destination removed");
            Err(FsError::Cancelled)
        }
        Err(err) => Err(err),
    }
}

struct TreeCopier<'a> {
    cancel: &'a CancellationToken,
    progress: &'a mut OperationProgress,
    on_progress: &'a mut dyn FnMut(&OperationProgress),
    buffer: Vec<u8>,
}

impl TreeCopier<'_> {
    fn check_cancelled(&self) -> FsResult<()> {
        if self.cancel.is_cancelled() {
            Err(FsError::Cancelled)
        } else {
            Ok(())
        }
    }

    fn copy_dir(&mut self, source: &Path, destination: &Path) -> FsResult<()> {
        self.check_cancelled()?;
        fs::create_dir(destination).map_err(|e| create_error(destination, e))?;

        let entries = fs::read_dir(source).map_err(|e| FsError::copy(source, e))?;
        for entry in entries {
            self.check_cancelled()?;
            let entry = entry.map_err(|e| FsError::copy(source, e))?;
            let path = entry.path();
            let target = destination.join(entry.file_name());
            let file_type = entry.file_type().map_err(|e| FsError::copy(&path, e))?;

            if file_type.is_symlink() {
                copy_symlink(&path, &target)?;
            } else if file_type.is_dir() {
                self.copy_dir(&path, &target)?;
            } else {
                self.copy_file(&path, &target)?;
            }
        }

        copy_permissions(source, destination);
        Ok(())
    }

    fn copy_file(&mut self, source: &Path, destination: &Path) -> FsResult<()> {
        self.check_cancelled()?;
        self.progress.set_current_file(Some(source.to_path_buf()));
        (self.on_progress)(&*self.progress);

        let mut reader = File::open(source).map_err(|e| FsError::copy(source, e))?;
        let mut writer = File::create_new(destination).map_err(|e| create_error(destination, e))?;

        loop {
            self.check_cancelled()?;
            let read = reader
                .read(&mut self.buffer)
                .map_err(|e| FsError::copy(source, e))?;
            if read == 0 {
                break;
            }
            writer
                .write_all(&self.buffer[..read])
                .map_err(|e| FsError::copy(destination, e))?;
            self.progress.add_bytes(read as u64);
            (self.on_progress)(&*self.progress);
        }
        writer.flush().map_err(|e| FsError::copy(destination, e))?;

        copy_permissions(source, destination);
        Ok(())
    }
}

fn create_error(path: &Path, err: std::io::Error) -> FsError {
    match err.kind() {
        std::io::ErrorKind::AlreadyExists => FsError::already_exists(display_name(path)),
        _ => FsError::copy(path, err),
    }
}

#[cfg(unix)]
fn copy_symlink(source: &Path, destination: &Path) -> FsResult<()> {
    let target = fs::read_link(source).map_err(|e| FsError::copy(source, e))?;
    std::os::unix::fs::symlink(target, destination).map_err(|e| create_error(destination, e))
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, destination: &Path) -> FsResult<()> {
    if fs::metadata(source).map(|m| m.is_dir()).unwrap_or(false) {
        Err(FsError::copy(
            source,
            std::io::Error::other("directory links are not copied"),
        ))
    } else {
        fs::copy(source, destination)
            .map(|_| ())
            .map_err(|e| create_error(destination, e))
    }
}

fn copy_permissions(source: &Path, destination: &Path) {
    if let Ok(metadata) = fs::metadata(source) {
        if let Err(err) = fs::set_permissions(destination, metadata.permissions()) {
            debug!(path = %destination.display(), error = %err, "could not copy permissions");
        }
    }
}

/// Sum file sizes under `dir`, skipping anything unreadable.
pub(crate) fn directory_size(dir: &Path) -> u64 {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .map(|entry| match entry.file_type() {
            Ok(t) if t.is_dir() => directory_size(&entry.path()),
            Ok(t) if t.is_file() => entry.metadata().map(|m| m.len()).unwrap_or(0),
            _ => 0,
        })
        .sum()
}

/// Best-effort removal of a partially written destination.
pub(crate) fn remove_partial(path: &Path) {
    let Ok(metadata) = fs::symlink_metadata(path) else {
        return;
    };
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    if let Err(err) = result {
        warn!(path = %path.display(), error = %err, "failed to remove partial destination");
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Start a background copy.
///
/// Progress updates are best-effort and may be dropped when the channel is
/// full; exactly one [`TransferResult::Complete`] is always sent.
pub fn start_copy(
    source: PathBuf,
    destination: PathBuf,
    cancel: CancellationToken,
) -> mpsc::Receiver<TransferResult> {
    spawn_transfer(source, destination, cancel, OperationType::Copy, copy_entry)
}

pub(crate) type TransferFn =
    fn(&Path, &Path, &CancellationToken, &mut dyn FnMut(&OperationProgress)) -> FsResult<u64>;

pub(crate) fn spawn_transfer(
    source: PathBuf,
    destination: PathBuf,
    cancel: CancellationToken,
    operation_type: OperationType,
    transfer: TransferFn,
) -> mpsc::Receiver<TransferResult> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        info!(
            operation = %operation_type,
            source = %source.display(),
            destination = %destination.display(),
            "transfer started"
        );

        let progress_tx = tx.clone();
        let (src, dst) = (source.clone(), destination.clone());
        let result = tokio::task::spawn_blocking(move || {
            transfer(&src, &dst, &cancel, &mut |progress| {
                let _ = progress_tx.try_send(TransferResult::Progress(progress.clone()));
            })
        })
        .await
        .unwrap_or_else(|e| Err(FsError::copy(&source, std::io::Error::other(e.to_string()))));

        match &result {
            Ok(bytes) => info!(operation = %operation_type, bytes, "transfer finished"),
            Err(err) => info!(operation = %operation_type, error = %err, "transfer stopped"),
        }

        let _ = tx
            .send(TransferResult::Complete(OperationComplete {
                operation_type,
                source,
                destination: Some(destination),
                result,
            }))
            .await;
    });

    rx
}
