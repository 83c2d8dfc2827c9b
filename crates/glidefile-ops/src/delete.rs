//! Delete operation.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::mpsc;
use tracing::debug;

use glidefile_core::{FsError, FsResult};

use crate::OPERATION_CHANNEL_SIZE;
use crate::progress::{OperationComplete, OperationType};

/// Remove a file, symlink or whole directory tree.
///
/// Never prompts; confirmation is the caller's job.
pub fn delete_entry(path: &Path) -> FsResult<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| FsError::delete(path, e))?;
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| FsError::delete(path, e))?;
    debug!(path = %path.display(), "deleted entry");
    Ok(())
}

/// Start a background deletion.
///
/// The receiver yields exactly one [`OperationComplete`].
pub fn start_delete(path: PathBuf) -> mpsc::Receiver<OperationComplete> {
    let (tx, rx) = mpsc::channel(OPERATION_CHANNEL_SIZE);

    tokio::spawn(async move {
        let target = path.clone();
        let result = tokio::task::spawn_blocking(move || delete_entry(&target))
            .await
            .unwrap_or_else(|e| Err(FsError::delete(&path, std::io::Error::other(e.to_string()))));

        let _ = tx
            .send(OperationComplete {
                operation_type: OperationType::Delete,
                source: path,
                destination: None,
                result: result.map(|()| 0),
            })
            .await;
    });

    rx
}
