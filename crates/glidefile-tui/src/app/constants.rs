//! Application constants.

/// Event loop tick interval in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 50;

/// Quiet period after the last filter keystroke before a deep scan starts.
pub const DEBOUNCE_MS: u64 = 150;

/// Channel buffer size for background task messages.
pub const APP_CHANNEL_SIZE: usize = 100;

/// Terminal rows not available to listing entries: header, footer, the
/// listing border and the table header.
pub const LIST_CHROME_ROWS: u16 = 6;

/// Smallest page size, whatever the terminal height.
pub const MIN_PAGE_SIZE: usize = 5;

/// Lines scrolled per vertical preview step.
pub const PREVIEW_VERTICAL_STEP: isize = 1;

/// Columns scrolled per horizontal preview step.
pub const PREVIEW_HORIZONTAL_STEP: isize = 5;
