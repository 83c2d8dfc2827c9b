//! Incremental filter: query matching, the debounced deep scan, and the
//! bookmark that lets the user return to results after opening one.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use glidefile_core::{DirectoryEntry, FsResult};

use super::App;
use super::input::{InputResult, InputState};
use super::navigation::ListNavigator;
use super::scanning::{spawn_debounce, spawn_deep_scan};
use super::state::InputMode;
use crate::event::KeyAction;

/// The filter view that was showing when the user opened a result.
#[derive(Debug, Clone)]
pub struct SavedFilterView {
    pub path: PathBuf,
    pub query: String,
    pub displayed: Vec<DirectoryEntry>,
    pub selected: Option<usize>,
    pub offset: usize,
    pub history_len: usize,
}

/// Filter state for the current directory.
///
/// Each reset bumps `session_id`; deep scan results tagged with an older
/// session are stale and dropped.
#[derive(Debug, Default)]
pub struct FilterSession {
    pub query: String,
    /// Every entry under the directory, once the deep scan has finished.
    pub deep_cache: Option<Vec<DirectoryEntry>>,
    pub scan_running: bool,
    pub scan_cancel: Option<CancellationToken>,
    /// Files seen so far by the running scan.
    pub scan_files: u64,
    pub debounce_cancel: Option<CancellationToken>,
    pub debounce_seq: u64,
    pub session_id: u64,
    pub saved: Option<SavedFilterView>,
}

impl FilterSession {
    /// Whether a non-empty query currently narrows the listing.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Abandon the query, the cache and any background work.
    pub fn reset(&mut self) {
        self.cancel_debounce();
        if let Some(cancel) = self.scan_cancel.take() {
            cancel.cancel();
        }
        self.session_id += 1;
        self.query.clear();
        self.deep_cache = None;
        self.scan_running = false;
        self.scan_files = 0;
    }

    /// Forget the query but keep the cache and any running scan.
    pub fn drop_query(&mut self) {
        self.cancel_debounce();
        self.query.clear();
    }

    pub fn cancel_debounce(&mut self) {
        if let Some(cancel) = self.debounce_cancel.take() {
            cancel.cancel();
        }
    }

    /// A scan is worth starting only once per session.
    pub fn wants_deep_scan(&self) -> bool {
        self.deep_cache.is_none() && !self.scan_running && !self.query.is_empty()
    }

    /// Entries to display for the current query.
    pub fn matching(&self, unfiltered: &[DirectoryEntry]) -> Vec<DirectoryEntry> {
        if self.query.is_empty() {
            return unfiltered.to_vec();
        }
        let source = self.deep_cache.as_deref().unwrap_or(unfiltered);
        filter_entries(source, &self.query)
    }
}

/// Case-insensitive substring match on display names. The parent marker
/// never matches.
pub fn filter_entries(entries: &[DirectoryEntry], query: &str) -> Vec<DirectoryEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|e| !e.is_parent_marker && e.display_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

impl App {
    /// Enter filter mode with an empty query.
    pub(super) fn begin_filter(&mut self) {
        let was_active = self.filter.is_active();
        self.filter.reset();
        self.filter.saved = None;
        self.mode = InputMode::Filter {
            input: InputState::new(),
        };

        if was_active {
            self.nav.show_unfiltered();
            self.update_preview();
        }
    }

    pub(super) fn handle_filter_key(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Enter, _) => self.accept_filter(Some(KeyAction::Open)),
            (KeyCode::Up, _) => self.accept_filter(Some(KeyAction::MoveUp)),
            (KeyCode::Down, _) => self.accept_filter(Some(KeyAction::MoveDown)),
            (KeyCode::Esc, _) => {
                if self.filter.is_active() {
                    self.accept_filter(None);
                } else {
                    self.clear_filter();
                }
            }
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.clear_filter(),
            _ => {
                let InputMode::Filter { input } = &mut self.mode else {
                    return;
                };
                let before = input.buffer().to_string();
                if let InputResult::Continue = input.handle_key(key) {
                    let after = input.buffer().to_string();
                    if after != before {
                        self.update_query(after);
                    }
                }
            }
        }
    }

    /// Leave the prompt, keeping the filtered view, then apply `then`.
    fn accept_filter(&mut self, then: Option<KeyAction>) {
        self.mode = InputMode::Normal;
        if let Some(action) = then {
            self.handle_action(action);
        }
    }

    /// Apply a new query and schedule a deep scan when needed.
    pub(super) fn update_query(&mut self, query: String) {
        self.filter.query = query;
        self.filter.cancel_debounce();
        self.filter.debounce_seq += 1;

        if self.filter.wants_deep_scan() {
            let cancel = CancellationToken::new();
            self.filter.debounce_cancel = Some(cancel.clone());
            spawn_debounce(self.msg_tx.clone(), self.filter.debounce_seq, cancel);
        }

        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        let matches = self.filter.matching(self.nav.unfiltered());
        self.nav.set_displayed(matches);
        self.update_preview();
    }

    pub(super) fn on_debounce_elapsed(&mut self, seq: u64) {
        if seq != self.filter.debounce_seq || !self.filter.wants_deep_scan() {
            return;
        }

        let cancel = CancellationToken::new();
        self.filter.debounce_cancel = None;
        self.filter.scan_cancel = Some(cancel.clone());
        self.filter.scan_running = true;
        self.filter.scan_files = 0;

        debug!(
            root = %self.nav.current_path.display(),
            session = self.filter.session_id,
            "starting deep scan"
        );
        spawn_deep_scan(
            self.msg_tx.clone(),
            self.nav.current_path.clone(),
            self.filter.session_id,
            cancel,
        );
    }

    pub(super) fn on_deep_scan_complete(
        &mut self,
        session: u64,
        cancel: &CancellationToken,
        result: FsResult<Vec<DirectoryEntry>>,
    ) {
        if session != self.filter.session_id || cancel.is_cancelled() {
            debug!(session, "discarding stale deep scan");
            return;
        }

        self.filter.scan_running = false;
        self.filter.scan_cancel = None;

        match result {
            Ok(entries) => {
                debug!(session, entries = entries.len(), "deep scan complete");
                self.filter.deep_cache = Some(entries);
                if self.filter.is_active() {
                    self.apply_filter();
                }
            }
            Err(e) => warn!(session, error = %e, "deep scan failed"),
        }
    }

    /// Drop the filter and show the full listing again.
    pub(super) fn clear_filter(&mut self) {
        self.filter.reset();
        self.filter.saved = None;
        self.mode = InputMode::Normal;
        self.nav.show_unfiltered();
        self.update_preview();
    }

    /// Record the current results so `b` can come back to them.
    pub(super) fn save_filter_view(&mut self) {
        self.filter.saved = Some(SavedFilterView {
            path: self.nav.current_path.clone(),
            query: self.filter.query.clone(),
            displayed: self.nav.displayed().to_vec(),
            selected: self.nav.selected(),
            offset: self.nav.offset(),
            history_len: self.history.len(),
        });
    }

    /// Go back to the filter results the user left.
    pub(super) fn return_to_filter(&mut self) {
        let Some(saved) = self.filter.saved.take() else {
            self.mode = InputMode::Normal;
            return;
        };

        self.filter.cancel_debounce();
        self.nav.current_path = saved.path;
        self.load_directory();
        self.nav.restore(saved.displayed, saved.selected, saved.offset);
        self.history.truncate(saved.history_len);
        self.filter.query = saved.query.clone();
        self.mode = InputMode::Filter {
            input: InputState::with_initial(&saved.query),
        };
        self.update_preview();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn entry(name: &str, is_dir: bool) -> DirectoryEntry {
        DirectoryEntry {
            path: PathBuf::from("/tmp").join(name),
            display_name: name.to_string(),
            is_dir,
            is_parent_marker: false,
            size: 0,
            modified: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_filter_entries_ignores_case_and_marker() {
        let entries = vec![
            DirectoryEntry::parent_marker("/"),
            entry("Alpha.txt", false),
            entry("beta", true),
            entry("ALPHABET.md", false),
        ];

        let names: Vec<_> = filter_entries(&entries, "alpha")
            .into_iter()
            .map(|e| e.display_name)
            .collect();
        assert_eq!(names, vec!["Alpha.txt", "ALPHABET.md"]);
        assert!(filter_entries(&entries, "..").is_empty());
    }

    #[test]
    fn test_matching_prefers_deep_cache() {
        let unfiltered = vec![entry("a.txt", false)];
        let mut session = FilterSession {
            query: "deep".to_string(),
            ..Default::default()
        };
        assert!(session.matching(&unfiltered).is_empty());

        session.deep_cache = Some(vec![entry("sub/deep.rs", false)]);
        assert_eq!(session.matching(&unfiltered).len(), 1);

        session.query.clear();
        assert_eq!(session.matching(&unfiltered), unfiltered);
    }

    #[test]
    fn test_reset_bumps_session_and_cancels() {
        let cancel = CancellationToken::new();
        let mut session = FilterSession {
            query: "x".to_string(),
            scan_running: true,
            scan_cancel: Some(cancel.clone()),
            ..Default::default()
        };

        session.reset();
        assert!(cancel.is_cancelled());
        assert_eq!(session.session_id, 1);
        assert!(!session.is_active());
        assert!(!session.scan_running);
    }

    #[test]
    fn test_wants_deep_scan_once() {
        let mut session = FilterSession {
            query: "x".to_string(),
            ..Default::default()
        };
        assert!(session.wants_deep_scan());
        session.scan_running = true;
        assert!(!session.wants_deep_scan());
        session.scan_running = false;
        session.deep_cache = Some(Vec::new());
        assert!(!session.wants_deep_scan());
    }
}
