//! Progress reporting types for file operations.

use std::path::PathBuf;

use glidefile_core::{FsError, FsResult};

/// The type of operation being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationType {
    Copy,
    Move,
    Delete,
}

impl std::fmt::Display for OperationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy => write!(f, "Copy"),
            Self::Move => write!(f, "Move"),
            Self::Delete => write!(f, "Delete"),
        }
    }
}

/// Progress information for an ongoing operation.
#[derive(Debug, Clone)]
pub struct OperationProgress {
    /// The type of operation.
    pub operation_type: OperationType,
    /// Number of bytes processed so far.
    pub bytes_processed: u64,
    /// Total bytes to process (may be 0 if unknown).
    pub bytes_total: u64,
    /// The file currently being processed.
    pub current_file: Option<PathBuf>,
    /// Set once the last byte has been written.
    pub finished: bool,
}

impl OperationProgress {
    /// Create a new progress tracker for an operation.
    pub fn new(operation_type: OperationType, bytes_total: u64) -> Self {
        Self {
            operation_type,
            bytes_processed: 0,
            bytes_total,
            current_file: None,
            finished: false,
        }
    }

    /// Get the progress as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        if self.finished {
            100.0
        } else if self.bytes_total > 0 {
            ((self.bytes_processed as f64 / self.bytes_total as f64) * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    /// Label for the item currently in flight.
    pub fn current_label(&self) -> String {
        self.current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Update the current file being processed.
    pub fn set_current_file(&mut self, path: Option<PathBuf>) {
        self.current_file = path;
    }

    pub fn add_bytes(&mut self, bytes: u64) {
        self.bytes_processed += bytes;
    }

    pub fn finish(&mut self) {
        self.finished = true;
        self.bytes_processed = self.bytes_processed.max(self.bytes_total);
    }
}

/// Result of a completed operation.
#[derive(Debug)]
pub struct OperationComplete {
    /// The type of operation.
    pub operation_type: OperationType,
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    /// Bytes transferred, or why the operation stopped.
    pub result: FsResult<u64>,
}

impl OperationComplete {
    /// Check if the operation was fully successful.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.result, Err(FsError::Cancelled))
    }

    /// Name of the entry the operation acted on.
    pub fn item_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    /// Get a human-readable summary of the operation.
    pub fn summary(&self) -> String {
        let action = match self.operation_type {
            OperationType::Copy => "Copied",
            OperationType::Move => "Moved",
            OperationType::Delete => "Deleted",
        };

        match &self.result {
            Ok(_) => format!("{action} '{}'", self.item_name()),
            Err(err) => err.to_string(),
        }
    }
}

/// Message sent through the channel while a transfer runs.
#[derive(Debug)]
pub enum TransferResult {
    /// Progress update.
    Progress(OperationProgress),
    /// The operation completed. Sent exactly once.
    Complete(OperationComplete),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage() {
        let mut progress = OperationProgress::new(OperationType::Copy, 200);
        assert_eq!(progress.percentage(), 0.0);
        progress.add_bytes(50);
        assert_eq!(progress.percentage(), 25.0);
        progress.finish();
        assert_eq!(progress.percentage(), 100.0);
    }

    #[test]
    fn test_empty_transfer_finishes_at_full() {
        let mut progress = OperationProgress::new(OperationType::Move, 0);
        assert_eq!(progress.percentage(), 0.0);
        progress.finish();
        assert_eq!(progress.percentage(), 100.0);
    }

    #[test]
    fn test_summary() {
        let complete = OperationComplete {
            operation_type: OperationType::Move,
            source: PathBuf::from("/tmp/report.pdf"),
            destination: Some(PathBuf::from("/home/report.pdf")),
            result: Ok(10),
        };
        assert!(complete.is_success());
        assert_eq!(complete.summary(), "Moved 'report.pdf'");

        let cancelled = OperationComplete {
            result: Err(FsError::Cancelled),
            ..complete
        };
        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.summary(), "Operation was cancelled");
    }
}
