//! JWalk-based parallel deep scanner.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use jwalk::{Parallelism, WalkDir};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use glidefile_core::{
    DeepScanConfig, DirectoryEntry, FsError, FsResult, PathIgnoreMatcher, relative_slash_path,
};

use crate::progress::{ProgressTracker, ScanProgress};

/// Recursive scanner producing the flat file list used for deep filtering.
pub struct DeepScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl DeepScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Scan `config.root`, building the ignore matcher from disk.
    pub fn scan(
        &self,
        config: &DeepScanConfig,
        cancel: &CancellationToken,
    ) -> FsResult<Vec<DirectoryEntry>> {
        let matcher = Arc::new(PathIgnoreMatcher::with_extra_patterns(
            &config.root,
            &config.extra_ignore_patterns,
        ));
        self.scan_with_matcher(config, matcher, cancel)
    }

    /// Scan with a prepared matcher.
    ///
    /// Returns every non-ignored file under the root, sorted by relative
    /// path, with `display_name` set to that `/`-separated relative path.
    /// Fails with [`FsError::Cancelled`] if `cancel` fires before the walk ends.
    pub fn scan_with_matcher(
        &self,
        config: &DeepScanConfig,
        matcher: Arc<PathIgnoreMatcher>,
        cancel: &CancellationToken,
    ) -> FsResult<Vec<DirectoryEntry>> {
        let root = config.root.as_path();
        let root_metadata = std::fs::metadata(root).map_err(|e| FsError::io(root, e))?;
        if !root_metadata.is_dir() {
            return Err(FsError::io(
                root,
                std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }

        info!(root = %root.display(), "deep scan started");

        let parallelism = match config.threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        let prune_matcher = Arc::clone(&matcher);
        let prune_cancel = cancel.clone();
        let walker = WalkDir::new(root)
            .parallelism(parallelism)
            .skip_hidden(false)
            .follow_links(config.follow_symlinks)
            .sort(true)
            .min_depth(1)
            .process_read_dir(move |_depth, _path, _state, children| {
                if prune_cancel.is_cancelled() {
                    children.clear();
                    return;
                }
                children.retain(|child| match child {
                    Ok(entry) => !prune_matcher.is_ignored(&entry.path()),
                    Err(_) => true,
                });
            });

        let mut tracker = ProgressTracker::new();
        let mut files = Vec::new();

        for entry_result in walker {
            if cancel.is_cancelled() {
                debug!(root = %root.display(), "deep scan cancelled");
                return Err(FsError::Cancelled);
            }

            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                tracker.record_dir();
                continue;
            }

            let path = entry.path();
            let metadata = match std::fs::metadata(&path)
                .or_else(|_| std::fs::symlink_metadata(&path))
            {
                Ok(m) => m,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "skipping entry without metadata");
                    continue;
                }
            };
            if metadata.is_dir() {
                continue;
            }

            let display_name = display_name_for(root, &path);
            files.push(DirectoryEntry::from_metadata(&path, display_name, &metadata));
            tracker.record_file(path);

            if tracker.files_scanned() % config.progress_interval.max(1) == 0 {
                let _ = self.progress_tx.send(tracker.snapshot());
            }
        }

        if cancel.is_cancelled() {
            debug!(root = %root.display(), "deep scan cancelled");
            return Err(FsError::Cancelled);
        }

        files.sort_by_cached_key(|e| e.display_name.to_lowercase());
        let _ = self.progress_tx.send(tracker.snapshot());
        info!(
            root = %root.display(),
            files = files.len(),
            "deep scan finished"
        );
        Ok(files)
    }
}

impl Default for DeepScanner {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name_for(root: &Path, path: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative_slash_path(relative),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}
