//! UI components and widgets.

mod file_list;
mod progress;

pub use file_list::FileList;
pub use progress::{PROGRESS_BAR_WIDTH, ProgressBar};

use std::time::SystemTime;

use chrono::{DateTime, Local};
use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub list: Rect,
    pub preview: Rect,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect) -> Self {
        // Vertical split: header, main content, footer
        let [header, content, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .areas(area);

        let [list, preview] =
            Layout::horizontal([Constraint::Ratio(2, 5), Constraint::Ratio(3, 5)]).areas(content);

        Self {
            header,
            list,
            preview,
            footer,
        }
    }
}

/// Format a byte size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format a modification time as local `YYYY-MM-DD HH:MM`.
pub fn format_timestamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}

/// Shorten a name to `max_width` display columns, keeping its extension.
pub fn truncate_name(name: &str, max_width: usize) -> String {
    if name.width() <= max_width {
        return name.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let (stem, ext) = match name.rfind('.') {
        Some(i) if i > 0 && name.len() - i <= 8 => name.split_at(i),
        _ => (name, ""),
    };

    // Keep the extension only if the stem still gets some room
    let ext = if ext.width() + 2 <= max_width { ext } else { "" };
    let budget = max_width - ext.width() - 1;

    let mut out = String::new();
    let mut used = 0;
    for c in stem.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out.push_str(ext);
    out
}

/// Shorten a path to `max_width` display columns by dropping its start.
pub fn truncate_path_left(path: &str, max_width: usize) -> String {
    if path.width() <= max_width {
        return path.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut tail: Vec<char> = Vec::new();
    let mut used = 0;
    for c in path.chars().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        tail.push(c);
        used += w;
    }

    std::iter::once(ELLIPSIS).chain(tail.into_iter().rev()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_name_keeps_extension() {
        assert_eq!(truncate_name("short.rs", 20), "short.rs");
        assert_eq!(truncate_name("a_very_long_file_name.txt", 12), "a_very_….txt");
        assert_eq!(truncate_name("a_very_long_file_name.txt", 12).width(), 12);
    }

    #[test]
    fn test_truncate_name_without_extension() {
        assert_eq!(truncate_name("Makefile.but_not_an_extension", 6), "Makef…");
        assert_eq!(truncate_name("abcdef", 3), "ab…");
    }

    #[test]
    fn test_truncate_path_left() {
        assert_eq!(truncate_path_left("/home/user/projects", 40), "/home/user/projects");
        assert_eq!(truncate_path_left("/home/user/projects", 9), "…projects");
    }

    #[test]
    fn test_format_size_uses_binary_units() {
        assert_eq!(format_size(1024), "1 KiB");
    }
}
