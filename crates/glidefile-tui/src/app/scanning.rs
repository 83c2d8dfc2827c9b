//! Background tasks behind the filter: the debounce timer and the deep scan.

use std::path::PathBuf;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use glidefile_core::FsError;
use glidefile_scan::{DeepScanConfig, DeepScanner};

use super::constants::DEBOUNCE_MS;
use super::state::AppMessage;

/// Post [`AppMessage::DebounceElapsed`] after the debounce period unless
/// `cancel` fires first.
pub fn spawn_debounce(tx: mpsc::Sender<AppMessage>, seq: u64, cancel: CancellationToken) {
    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {}
            _ = tokio::time::sleep(Duration::from_millis(DEBOUNCE_MS)) => {
                let _ = tx.send(AppMessage::DebounceElapsed { seq }).await;
            }
        }
    });
}

/// Start a deep scan of `root` for filter session `session`.
///
/// Progress is forwarded while the scan runs; exactly one
/// [`AppMessage::DeepScanComplete`] carrying `cancel` is sent at the end so
/// the receiver can tell whether the result was superseded.
pub fn spawn_deep_scan(
    tx: mpsc::Sender<AppMessage>,
    root: PathBuf,
    session: u64,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        let config = DeepScanConfig::new(root.clone());
        let scanner = DeepScanner::new();
        let mut progress_rx = scanner.subscribe();

        // Spawn task to forward progress updates
        let tx_progress = tx.clone();
        let progress_task = tokio::spawn(async move {
            while let Ok(progress) = progress_rx.recv().await {
                let message = AppMessage::DeepScanProgress {
                    session,
                    files: progress.files_scanned,
                };
                if tx_progress.send(message).await.is_err() {
                    break;
                }
            }
        });

        // jwalk uses rayon internally
        let scan_cancel = cancel.clone();
        let result = tokio::task::spawn_blocking(move || scanner.scan(&config, &scan_cancel))
            .await
            .unwrap_or_else(|e| Err(FsError::io(&root, std::io::Error::other(e.to_string()))));

        progress_task.abort();
        let _ = tx
            .send(AppMessage::DeepScanComplete {
                session,
                cancel,
                result,
            })
            .await;
    });
}
