//! Application state types and enums.

use std::path::PathBuf;

use strum::Display;
use tokio_util::sync::CancellationToken;

use glidefile_core::{DirectoryEntry, FsResult};
use glidefile_ops::{OperationComplete, OperationProgress, OperationType, TransferResult};

use super::input::InputState;

/// Input mode of the session. Exactly one is active at a time, and only
/// the text-entry modes carry a buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default, Display)]
pub enum InputMode {
    #[default]
    #[strum(to_string = "NORMAL")]
    Normal,
    /// Typing a name to create under `base`.
    #[strum(to_string = "ADD")]
    Add { input: InputState, base: PathBuf },
    /// Typing a new name for `target`.
    #[strum(to_string = "RENAME")]
    Rename {
        input: InputState,
        target: DirectoryEntry,
    },
    /// Waiting for y/n before deleting `target`.
    #[strum(to_string = "DELETE")]
    DeleteConfirm { target: DirectoryEntry },
    /// Editing the filter query.
    #[strum(to_string = "FILTER")]
    Filter { input: InputState },
    /// Browsing a directory opened from filter results; `b` goes back.
    #[strum(to_string = "RESULTS")]
    FilteredNavigation,
    /// Waiting for y/n before quitting with a transfer in flight.
    #[strum(to_string = "QUIT")]
    QuitConfirm,
}

/// What a paste does with the clipboard entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClipboardMode {
    #[strum(to_string = "copy")]
    Copy,
    #[strum(to_string = "move")]
    Move,
}

impl ClipboardMode {
    pub fn operation_type(self) -> OperationType {
        match self {
            Self::Copy => OperationType::Copy,
            Self::Move => OperationType::Move,
        }
    }
}

/// An entry waiting to be pasted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEntry {
    pub entry: DirectoryEntry,
    pub mode: ClipboardMode,
}

impl ClipboardEntry {
    pub fn name(&self) -> String {
        self.entry.file_name()
    }

    /// Footer summary, e.g. `move: report.pdf`.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.mode, self.name())
    }
}

/// The copy or move currently running in the background.
#[derive(Debug)]
pub struct TransferJob {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub mode: ClipboardMode,
    pub cancel: CancellationToken,
    /// Latest progress report from the engine.
    pub progress: OperationProgress,
}

impl TransferJob {
    pub fn new(source: PathBuf, destination: PathBuf, mode: ClipboardMode) -> Self {
        Self {
            source,
            destination,
            mode,
            cancel: CancellationToken::new(),
            progress: OperationProgress::new(mode.operation_type(), 0),
        }
    }

    /// Label for the item in flight, falling back to the source name.
    pub fn current_label(&self) -> String {
        let label = self.progress.current_label();
        if label.is_empty() {
            self.source
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            label
        }
    }
}

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// One-line message shown in the footer until the next keypress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Result from a background task, delivered to the main loop.
#[derive(Debug)]
pub enum AppMessage {
    /// The filter query has been stable for the debounce period.
    DebounceElapsed { seq: u64 },
    /// Deep scan progress for filter session `session`.
    DeepScanProgress { session: u64, files: u64 },
    /// Deep scan finished for filter session `session`.
    DeepScanComplete {
        session: u64,
        cancel: CancellationToken,
        result: FsResult<Vec<DirectoryEntry>>,
    },
    /// Progress or completion of the running transfer.
    Transfer(TransferResult),
    /// A background delete finished.
    DeleteComplete(OperationComplete),
}
