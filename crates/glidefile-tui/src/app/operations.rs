//! Create, rename and delete prompts.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::{info, warn};

use glidefile_core::FsResult;
use glidefile_ops::{OperationComplete, create_entry, rename_entry, start_delete};

use super::input::{InputResult, InputState};
use super::state::{AppMessage, InputMode, StatusMessage};
use super::{App, forward_to_app};

impl App {
    /// Prompt for a new entry under the selected directory, or under the
    /// current one.
    pub(super) fn begin_add(&mut self) {
        let base = match self.nav.selected_entry() {
            Some(entry) if entry.is_dir && !entry.is_parent_marker => entry.path.clone(),
            _ => self.nav.current_path.clone(),
        };
        self.mode = InputMode::Add {
            input: InputState::new(),
            base,
        };
    }

    pub(super) fn begin_rename(&mut self) {
        let Some(target) = self.nav.selected_entry().filter(|e| !e.is_parent_marker) else {
            return;
        };
        self.mode = InputMode::Rename {
            input: InputState::with_initial(&target.file_name()),
            target: target.clone(),
        };
    }

    pub(super) fn begin_delete(&mut self) {
        let Some(target) = self.nav.selected_entry().filter(|e| !e.is_parent_marker) else {
            return;
        };
        self.mode = InputMode::DeleteConfirm {
            target: target.clone(),
        };
    }

    /// Route keys for the add and rename prompts.
    pub(super) fn handle_text_input(&mut self, key: KeyEvent) {
        let result = match &mut self.mode {
            InputMode::Add { input, .. } | InputMode::Rename { input, .. } => input.handle_key(key),
            _ => return,
        };

        match result {
            InputResult::Continue => {}
            InputResult::Cancel => self.mode = InputMode::Normal,
            InputResult::Submit(text) => {
                let mode = std::mem::take(&mut self.mode);
                match mode {
                    InputMode::Add { base, .. } => {
                        let outcome = create_entry(&base, &text);
                        self.finish_edit(outcome, "Created");
                    }
                    InputMode::Rename { target, .. } => {
                        let Some(parent) = target.path.parent() else {
                            return;
                        };
                        let outcome = rename_entry(parent, &target.file_name(), &text);
                        self.finish_edit(outcome, "Renamed to");
                    }
                    _ => {}
                }
            }
        }
    }

    /// Report a create or rename and select the resulting entry.
    fn finish_edit(&mut self, outcome: FsResult<String>, verb: &str) {
        match outcome {
            Ok(name) => {
                info!(name = %name, "{verb}");
                self.status = Some(StatusMessage::success(format!("{verb} '{name}'")));
                self.refresh_directory(Some(&name), true);
            }
            Err(e) => {
                warn!(error = %e, "{verb} failed");
                self.status = Some(StatusMessage::error(e.to_string()));
            }
        }
    }

    pub(super) fn handle_delete_confirm(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let InputMode::DeleteConfirm { target } = std::mem::take(&mut self.mode) {
                    let rx = start_delete(target.path);
                    forward_to_app(rx, self.msg_tx.clone(), AppMessage::DeleteComplete);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    pub(super) fn on_delete_complete(&mut self, complete: OperationComplete) {
        if complete.is_success() {
            info!(path = %complete.source.display(), "deleted");
            self.status = Some(StatusMessage::success(complete.summary()));
        } else {
            warn!(path = %complete.source.display(), error = %complete.summary(), "delete failed");
            self.status = Some(StatusMessage::error(complete.summary()));
        }
        self.refresh_directory(None, true);
    }
}
