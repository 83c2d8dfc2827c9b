//! Terminal user interface for glidefile.
//!
//! This crate provides the interactive session: a directory listing with a
//! live preview pane, an incremental filter backed by a background deep scan,
//! and cancellable copy/move transfers with a progress bar.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! glidefile_tui::run(PathBuf::from("/path/to/browse")).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `Enter`/`l` - Open directory or file
//! - `Backspace`/`h` - Go to parent directory
//! - `s` or `/` - Filter (deep search)
//! - `b` - Back to filter results
//! - `a`/`r`/`d` - Add, rename, delete
//! - `c`/`x`/`p` - Copy, cut, paste
//! - `q` - Quit

pub mod app;
mod event;
mod icons;
mod opener;
mod preview;
mod theme;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

pub use app::{App, AppResult};
pub use icons::IconSet;
pub use theme::Theme;

/// Configuration for the TUI.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Render Nerd Font glyphs instead of plain-text markers.
    pub use_icons: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { use_icons: true }
    }
}

impl TuiConfig {
    pub fn new(use_icons: bool) -> Self {
        Self { use_icons }
    }
}

/// Run the TUI application with the default configuration.
pub fn run(path: PathBuf) -> AppResult<()> {
    run_with_config(path, TuiConfig::default())
}

/// Run the TUI application with custom configuration.
pub fn run_with_config(path: PathBuf, config: TuiConfig) -> AppResult<()> {
    // Create tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()?;

    let app = App::with_config(path, config);
    let terminal = ratatui::init();
    let result = rt.block_on(app.run(terminal));
    ratatui::restore();

    // Background scans are abandoned on exit
    rt.shutdown_timeout(Duration::from_millis(100));

    result
}
