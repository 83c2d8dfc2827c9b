//! Scan progress reporting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Progress information during a deep scan.
#[derive(Debug, Clone, Default)]
pub struct ScanProgress {
    /// Files collected so far.
    pub files_scanned: u64,
    /// Directories entered so far.
    pub dirs_scanned: u64,
    /// Most recent path visited.
    pub current_path: PathBuf,
    /// Time elapsed since scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Calculate scan rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_scanned as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Internal progress tracker with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    files_scanned: u64,
    dirs_scanned: u64,
    current_path: PathBuf,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            files_scanned: 0,
            dirs_scanned: 0,
            current_path: PathBuf::new(),
        }
    }

    pub fn record_file(&mut self, path: PathBuf) {
        self.files_scanned += 1;
        self.current_path = path;
    }

    pub fn record_dir(&mut self) {
        self.dirs_scanned += 1;
    }

    pub fn files_scanned(&self) -> u64 {
        self.files_scanned
    }

    pub fn snapshot(&self) -> ScanProgress {
        ScanProgress {
            files_scanned: self.files_scanned,
            dirs_scanned: self.dirs_scanned,
            current_path: self.current_path.clone(),
            elapsed: self.start_time.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_snapshot() {
        let mut tracker = ProgressTracker::new();
        tracker.record_dir();
        tracker.record_file(PathBuf::from("/a/b.txt"));
        tracker.record_file(PathBuf::from("/a/c.txt"));

        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.files_scanned, 2);
        assert_eq!(snapshot.dirs_scanned, 1);
        assert_eq!(snapshot.current_path, PathBuf::from("/a/c.txt"));
    }

    #[test]
    fn test_rate_without_elapsed_time() {
        assert_eq!(ScanProgress::default().files_per_second(), 0.0);
    }
}
