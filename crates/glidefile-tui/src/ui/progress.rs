//! Transfer progress bar widget.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// Cells used by the footer progress bar.
pub const PROGRESS_BAR_WIDTH: u16 = 30;

/// A horizontal bar filled in proportion to a percentage.
pub struct ProgressBar {
    /// Percentage complete (0.0 - 100.0).
    percent: f64,
    /// Style for filled portion.
    filled_style: Style,
    /// Style for empty portion.
    empty_style: Style,
}

impl ProgressBar {
    pub fn new(percent: f64) -> Self {
        Self {
            percent: percent.clamp(0.0, 100.0),
            filled_style: Style::default(),
            empty_style: Style::default(),
        }
    }

    pub fn filled_style(mut self, style: Style) -> Self {
        self.filled_style = style;
        self
    }

    pub fn empty_style(mut self, style: Style) -> Self {
        self.empty_style = style;
        self
    }

    /// Number of filled cells for a given width. Partial cells round down.
    fn filled_cells(&self, width: u16) -> u16 {
        ((width as f64 * self.percent / 100.0).floor() as u16).min(width)
    }
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let filled = self.filled_cells(area.width);

        for x in 0..area.width {
            let (symbol, style) = if x < filled {
                ('█', self.filled_style)
            } else {
                ('░', self.empty_style)
            };

            buf[(area.x + x, area.y)].set_char(symbol).set_style(style);
        }
    }
}
