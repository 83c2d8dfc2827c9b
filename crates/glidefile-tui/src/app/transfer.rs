//! Clipboard and the background copy/move.

use tracing::{info, warn};

use glidefile_core::same_path;
use glidefile_ops::{TransferResult, start_copy, start_move};

use super::state::{AppMessage, ClipboardEntry, ClipboardMode, StatusMessage, TransferJob};
use super::{App, forward_to_app};

impl App {
    pub(super) fn clipboard_copy(&mut self) {
        self.set_clipboard(ClipboardMode::Copy);
    }

    pub(super) fn clipboard_move(&mut self) {
        self.set_clipboard(ClipboardMode::Move);
    }

    fn set_clipboard(&mut self, mode: ClipboardMode) {
        let Some(entry) = self.nav.selected_entry().filter(|e| !e.is_parent_marker) else {
            return;
        };
        let clip = ClipboardEntry {
            entry: entry.clone(),
            mode,
        };
        let text = match mode {
            ClipboardMode::Copy => format!("'{}' copied to clipboard.", clip.name()),
            ClipboardMode::Move => format!("'{}' marked for move.", clip.name()),
        };
        self.status = Some(StatusMessage::info(text));
        self.clipboard = Some(clip);
    }

    /// Start pasting the clipboard entry into the selected directory, or
    /// into the current one.
    pub(super) fn paste(&mut self) {
        let Some(clip) = self.clipboard.clone() else {
            self.status = Some(StatusMessage::info("Clipboard is empty."));
            return;
        };
        if self.transfer.is_some() {
            self.status = Some(StatusMessage::error("A file operation is already in progress."));
            return;
        }

        let base = match self.nav.selected_entry() {
            Some(entry) if entry.is_dir && !entry.is_parent_marker => entry.path.clone(),
            _ => self.nav.current_path.clone(),
        };
        let source = clip.entry.path.clone();
        let name = clip.name();
        let destination = base.join(&name);

        let same_parent = source.parent().is_some_and(|p| same_path(p, &base));
        if same_path(&source, &destination) || (clip.mode == ClipboardMode::Move && same_parent) {
            if clip.mode == ClipboardMode::Move {
                self.clipboard = None;
            }
            self.status = Some(StatusMessage::info("Source and destination are the same."));
            return;
        }

        if destination.symlink_metadata().is_ok() {
            self.status = Some(StatusMessage::error(format!(
                "An item named '{name}' already exists here."
            )));
            return;
        }

        info!(
            source = %source.display(),
            destination = %destination.display(),
            mode = %clip.mode,
            "starting transfer"
        );

        self.clipboard = None;
        let job = TransferJob::new(source.clone(), destination.clone(), clip.mode);
        let rx = match clip.mode {
            ClipboardMode::Copy => start_copy(source, destination, job.cancel.clone()),
            ClipboardMode::Move => start_move(source, destination, job.cancel.clone()),
        };
        self.transfer = Some(job);
        forward_to_app(rx, self.msg_tx.clone(), AppMessage::Transfer);
    }

    pub(super) fn on_transfer_message(&mut self, message: TransferResult) {
        match message {
            TransferResult::Progress(progress) => {
                if let Some(job) = self.transfer.as_mut() {
                    job.progress = progress;
                }
            }
            TransferResult::Complete(complete) => {
                if self.transfer.take().is_none() {
                    return;
                }

                self.status = Some(if complete.is_cancelled() {
                    info!(source = %complete.source.display(), "transfer cancelled");
                    StatusMessage::info("Operation was cancelled")
                } else if complete.is_success() {
                    info!(source = %complete.source.display(), "transfer complete");
                    StatusMessage::success(complete.summary())
                } else {
                    warn!(source = %complete.source.display(), error = %complete.summary(), "transfer failed");
                    StatusMessage::error(complete.summary())
                });

                let name = self.selected_name();
                self.refresh_directory(name.as_deref(), true);

                if self.quit_after_transfer {
                    self.should_quit = true;
                }
            }
        }
    }
}
