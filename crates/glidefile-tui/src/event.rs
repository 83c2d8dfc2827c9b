//! Key mapping for the browsing modes.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed while browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Directory navigation
    /// Enter a directory, launch a file, or go up from the parent marker.
    Open,
    NavigateUp,

    // File operations
    Add,
    Rename,
    Delete,

    // Filtering
    Filter,
    /// Return to the saved filter results.
    BackToResults,

    // Clipboard
    ClipboardCopy,
    ClipboardMove,
    Paste,

    Refresh,

    // Preview scrolling
    PreviewUp,
    PreviewDown,
    PreviewLeft,
    PreviewRight,

    /// Esc: clear the filter view, then the clipboard, then quit.
    Cancel,
    Quit,
    ForceQuit,

    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        if event.modifiers.contains(KeyModifiers::ALT) {
            return match event.code {
                KeyCode::Char('j') | KeyCode::Down => KeyAction::PreviewDown,
                KeyCode::Char('k') | KeyCode::Up => KeyAction::PreviewUp,
                KeyCode::Char('h') | KeyCode::Left => KeyAction::PreviewLeft,
                KeyCode::Char('l') | KeyCode::Right => KeyAction::PreviewRight,
                _ => KeyAction::None,
            };
        }

        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return match event.code {
                KeyCode::Char('c') => KeyAction::ForceQuit,
                _ => KeyAction::None,
            };
        }

        match event.code {
            KeyCode::Char(c) => Self::from_char(c),

            KeyCode::Down => KeyAction::MoveDown,
            KeyCode::Up => KeyAction::MoveUp,
            KeyCode::Home => KeyAction::JumpToTop,
            KeyCode::End => KeyAction::JumpToBottom,
            KeyCode::PageUp => KeyAction::PageUp,
            KeyCode::PageDown => KeyAction::PageDown,

            KeyCode::Enter | KeyCode::Right => KeyAction::Open,
            KeyCode::Backspace | KeyCode::Left => KeyAction::NavigateUp,

            KeyCode::Delete => KeyAction::Delete,
            KeyCode::Esc => KeyAction::Cancel,

            _ => KeyAction::None,
        }
    }

    /// Map a character key. Shifted characters arrive already uppercased.
    fn from_char(c: char) -> Self {
        match c {
            'j' => KeyAction::MoveDown,
            'k' => KeyAction::MoveUp,
            'g' => KeyAction::JumpToTop,
            'G' => KeyAction::JumpToBottom,

            'l' | 'o' => KeyAction::Open,
            'h' => KeyAction::NavigateUp,

            'a' => KeyAction::Add,
            'r' => KeyAction::Rename,
            'd' => KeyAction::Delete,

            's' | '/' => KeyAction::Filter,
            'b' => KeyAction::BackToResults,

            'c' | 'y' => KeyAction::ClipboardCopy,
            'x' => KeyAction::ClipboardMove,
            'p' => KeyAction::Paste,

            'R' => KeyAction::Refresh,
            'q' => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}
