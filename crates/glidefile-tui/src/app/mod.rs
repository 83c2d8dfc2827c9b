//! Session controller: application state, the input-mode state machine and
//! the event loop.

mod constants;
mod filter;
pub mod input;
mod navigation;
mod operations;
mod render;
mod scanning;
pub mod state;
mod transfer;


use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use glidefile_core::list_directory;

use crate::TuiConfig;
use crate::event::KeyAction;
use crate::icons::IconSet;
use crate::opener::{OpenResult, open_with_system};
use crate::preview::PreviewState;
use crate::theme::Theme;

use self::constants::{
    APP_CHANNEL_SIZE, LIST_CHROME_ROWS, PREVIEW_HORIZONTAL_STEP, PREVIEW_VERTICAL_STEP,
    TICK_INTERVAL_MS,
};
use self::filter::FilterSession;
use self::navigation::{ListNavigator, NavigationState};
use self::render::{RenderContext, render_app};
use self::state::{AppMessage, ClipboardEntry, InputMode, StatusMessage, TransferJob};

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// Main application state.
///
/// All fields are owned by the UI task. Background work reports back
/// through `msg_tx` and is applied in [`App::handle_message`].
pub struct App {
    nav: NavigationState,
    mode: InputMode,
    filter: FilterSession,
    /// Names of the directories entered, used to reselect them on the way up.
    history: Vec<String>,
    clipboard: Option<ClipboardEntry>,
    transfer: Option<TransferJob>,
    /// Set once the user confirmed quitting while a transfer was running.
    quit_after_transfer: bool,
    preview: PreviewState,
    status: Option<StatusMessage>,
    theme: Theme,
    icons: IconSet,
    should_quit: bool,
    needs_redraw: bool,
    msg_tx: mpsc::Sender<AppMessage>,
    msg_rx: mpsc::Receiver<AppMessage>,
}

impl App {
    /// Create a new application with default config.
    pub fn new(path: PathBuf) -> Self {
        Self::with_config(path, TuiConfig::default())
    }

    /// Create a new application and load the starting directory.
    pub fn with_config(path: PathBuf, config: TuiConfig) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(APP_CHANNEL_SIZE);

        let mut app = Self {
            nav: NavigationState::new(path),
            mode: InputMode::default(),
            filter: FilterSession::default(),
            history: Vec::new(),
            clipboard: None,
            transfer: None,
            quit_after_transfer: false,
            preview: PreviewState::new(),
            status: None,
            theme: Theme::dark(),
            icons: IconSet::new(config.use_icons),
            should_quit: false,
            needs_redraw: true,
            msg_tx,
            msg_rx,
        };

        app.refresh_directory(None, false);
        app
    }

    /// Run the application with async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let size = terminal.size()?;
        self.set_terminal_rows(size.height);

        let period = Duration::from_millis(TICK_INTERVAL_MS);
        let mut interval = tokio::time::interval(period);
        let mut events = EventStream::new();

        while !self.should_quit {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased;

                Some(Ok(event)) = events.next() => {
                    self.handle_event(event);

                    // Drain any additional pending events
                    while !self.should_quit && crossterm::event::poll(Duration::ZERO)? {
                        let event = crossterm::event::read()?;
                        self.handle_event(event);
                    }
                }

                Some(message) = self.msg_rx.recv() => {
                    self.handle_message(message);
                }

                _ = interval.tick() => {
                    // Periodic tick keeps the loop responsive without spinning
                }
            }
        }

        Ok(())
    }

    /// Render the application.
    fn render(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(_, rows) => self.set_terminal_rows(rows),
            _ => return,
        }
        self.needs_redraw = true;
    }

    /// Recompute the page size from the terminal height.
    fn set_terminal_rows(&mut self, rows: u16) {
        self.nav
            .set_page_size(rows.saturating_sub(LIST_CHROME_ROWS) as usize);
        self.needs_redraw = true;
    }

    /// Dispatch a key press to the active mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.status = None;

        match self.mode {
            InputMode::Add { .. } | InputMode::Rename { .. } => self.handle_text_input(key),
            InputMode::Filter { .. } => self.handle_filter_key(key),
            InputMode::DeleteConfirm { .. } => self.handle_delete_confirm(key),
            InputMode::QuitConfirm => self.handle_quit_confirm(key),
            InputMode::Normal | InputMode::FilteredNavigation => {
                self.handle_action(KeyAction::from_key_event(key))
            }
        }

        self.needs_redraw = true;
    }

    /// Handle a key action in a browsing mode.
    fn handle_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::MoveUp => self.change_selection(|nav| nav.move_up(1)),
            KeyAction::MoveDown => self.change_selection(|nav| nav.move_down(1)),
            KeyAction::JumpToTop => self.change_selection(|nav| nav.jump_to_top()),
            KeyAction::JumpToBottom => self.change_selection(|nav| nav.jump_to_bottom()),
            KeyAction::PageUp => self.change_selection(|nav| nav.page_up()),
            KeyAction::PageDown => self.change_selection(|nav| nav.page_down()),

            KeyAction::Open => self.open_selected(),
            KeyAction::NavigateUp => self.navigate_up(),

            KeyAction::Add => self.begin_add(),
            KeyAction::Rename => self.begin_rename(),
            KeyAction::Delete => self.begin_delete(),

            KeyAction::Filter => self.begin_filter(),
            KeyAction::BackToResults => {
                if self.mode == InputMode::FilteredNavigation {
                    self.return_to_filter();
                }
            }

            KeyAction::ClipboardCopy => self.clipboard_copy(),
            KeyAction::ClipboardMove => self.clipboard_move(),
            KeyAction::Paste => self.paste(),

            KeyAction::Refresh => {
                let name = self.selected_name();
                self.refresh_directory(name.as_deref(), true);
            }

            KeyAction::PreviewUp => self.preview.scroll_vertical(-PREVIEW_VERTICAL_STEP),
            KeyAction::PreviewDown => self.preview.scroll_vertical(PREVIEW_VERTICAL_STEP),
            KeyAction::PreviewLeft => self.preview.scroll_horizontal(-PREVIEW_HORIZONTAL_STEP),
            KeyAction::PreviewRight => self.preview.scroll_horizontal(PREVIEW_HORIZONTAL_STEP),

            KeyAction::Cancel => self.handle_escape(),
            KeyAction::Quit | KeyAction::ForceQuit => self.request_quit(),

            KeyAction::None => {}
        }
    }

    /// Esc while browsing: drop the filter view, then the results
    /// bookmark, then the clipboard, and finally quit.
    fn handle_escape(&mut self) {
        if self.filter.is_active() {
            self.clear_filter();
        } else if self.mode == InputMode::FilteredNavigation {
            self.mode = InputMode::Normal;
            self.filter.saved = None;
        } else if self.clipboard.take().is_some() {
            self.status = Some(StatusMessage::info("Clipboard cleared."));
        } else {
            self.request_quit();
        }
    }

    /// Apply a result posted by a background task.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::DebounceElapsed { seq } => self.on_debounce_elapsed(seq),
            AppMessage::DeepScanProgress { session, files } => {
                if session == self.filter.session_id {
                    self.filter.scan_files = files;
                }
            }
            AppMessage::DeepScanComplete {
                session,
                cancel,
                result,
            } => self.on_deep_scan_complete(session, &cancel, result),
            AppMessage::Transfer(result) => self.on_transfer_message(result),
            AppMessage::DeleteComplete(complete) => self.on_delete_complete(complete),
        }
        self.needs_redraw = true;
    }

    /// Run a selection change and refresh the preview if it moved.
    fn change_selection(&mut self, f: impl FnOnce(&mut NavigationState)) {
        let before = self.nav.selected();
        f(&mut self.nav);
        if self.nav.selected() != before {
            self.update_preview();
        }
    }

    fn update_preview(&mut self) {
        self.preview.load(self.nav.selected_entry());
    }

    fn selected_name(&self) -> Option<String> {
        self.nav.selected_entry().map(|e| e.display_name.clone())
    }

    /// Re-read the current directory.
    ///
    /// Selection goes to the entry named `find` when present, else to the
    /// previous index clamped to the new bounds when `preserve` is set,
    /// else to the first entry. An active filter view is recomputed against
    /// the fresh listing.
    fn refresh_directory(&mut self, find: Option<&str>, preserve: bool) {
        let previous = self.nav.selected();
        let previous_offset = self.nav.offset();

        self.load_directory();
        if self.filter.is_active() {
            let matches = self.filter.matching(self.nav.unfiltered());
            self.nav.set_displayed(matches);
        }

        let found = find.is_some_and(|name| self.nav.select_by_name(name));
        if !found {
            match previous {
                Some(index) if preserve => {
                    self.nav.restore(self.nav.displayed().to_vec(), Some(index), previous_offset);
                }
                _ => self.nav.select_clamped(0),
            }
        }

        self.update_preview();
    }

    /// Load the raw listing. A failure leaves an empty listing and a
    /// status message.
    fn load_directory(&mut self) {
        match list_directory(&self.nav.current_path) {
            Ok(entries) => self.nav.set_listing(entries),
            Err(e) => {
                warn!(path = %self.nav.current_path.display(), error = %e, "failed to load directory");
                self.nav.set_listing(Vec::new());
                self.status = Some(StatusMessage::error(format!("Error loading directory: {e}")));
            }
        }
    }

    /// Change directory, selecting `select` by name if given.
    fn navigate_to(&mut self, path: PathBuf, select: Option<String>) {
        if self.mode != InputMode::FilteredNavigation {
            self.mode = InputMode::Normal;
        }
        debug!(path = %path.display(), "navigate");
        self.nav.current_path = path;
        self.refresh_directory(select.as_deref(), false);
    }

    /// Go to the parent directory, or leave the filter view if one is shown.
    fn navigate_up(&mut self) {
        if self.filter.is_active() {
            self.clear_filter();
            return;
        }

        let Some(parent) = self.nav.current_path.parent().map(Path::to_path_buf) else {
            return;
        };
        let child = self.history.pop().or_else(|| {
            self.nav
                .current_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        });
        self.navigate_to(parent, child);
    }

    /// Enter the selected directory, open the selected file, or go up from
    /// the parent marker.
    fn open_selected(&mut self) {
        let Some(entry) = self.nav.selected_entry().cloned() else {
            return;
        };

        if entry.is_parent_marker {
            self.navigate_up();
        } else if entry.is_dir {
            if self.filter.is_active() {
                if self.mode == InputMode::Normal {
                    self.save_filter_view();
                    self.mode = InputMode::FilteredNavigation;
                }
                self.filter.drop_query();
            }
            self.history.push(entry.file_name());
            self.navigate_to(entry.path, None);
        } else if let OpenResult::Error(message) = open_with_system(&entry.path) {
            self.status = Some(StatusMessage::error(message));
        }
    }

    /// Quit, or ask first when a transfer is running.
    fn request_quit(&mut self) {
        if self.transfer.is_some() {
            self.mode = InputMode::QuitConfirm;
        } else {
            self.should_quit = true;
        }
    }

    fn handle_quit_confirm(&mut self, key: KeyEvent) {
        use crossterm::event::KeyCode;

        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                self.mode = InputMode::Normal;
                match &self.transfer {
                    Some(job) => {
                        job.cancel.cancel();
                        self.quit_after_transfer = true;
                        self.status = Some(StatusMessage::info("Cancelling transfer..."));
                    }
                    None => self.should_quit = true,
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.mode = InputMode::Normal;
            }
            _ => {}
        }
    }

    /// Whether the session has finished.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Forward every item of a background receiver into the app channel.
fn forward_to_app<T: Send + 'static>(
    mut rx: mpsc::Receiver<T>,
    tx: mpsc::Sender<AppMessage>,
    wrap: fn(T) -> AppMessage,
) {
    tokio::spawn(async move {
        while let Some(item) = rx.recv().await {
            if tx.send(wrap(item)).await.is_err() {
                break;
            }
        }
    });
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = RenderContext {
            theme: &self.theme,
            icons: self.icons,
            mode: &self.mode,
            current_path: &self.nav.current_path,
            entries: self.nav.displayed(),
            selected: self.nav.selected(),
            offset: self.nav.offset(),
            preview: &self.preview,
            status: self.status.as_ref(),
            clipboard: self.clipboard.as_ref(),
            transfer: self.transfer.as_ref(),
            filter: &self.filter,
        };

        render_app(&ctx, area, buf);
    }
}
