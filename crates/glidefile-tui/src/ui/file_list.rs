//! Directory listing table with a text scrollbar.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table, Widget};
use unicode_width::UnicodeWidthStr;

use glidefile_core::DirectoryEntry;

use crate::icons::IconSet;
use crate::theme::Theme;

use super::{format_size, format_timestamp, truncate_name};

const SIZE_WIDTH: u16 = 10;
const MODIFIED_WIDTH: u16 = 16;

/// Scrollbar column for `rows` visible rows of a `len`-entry list.
///
/// Arrows mark that more entries exist above or below, `█` tracks the
/// selection's relative position, and `║` fills the rest. Lists that fit
/// entirely get a blank column.
pub fn scrollbar_glyphs(len: usize, selected: Option<usize>, offset: usize, rows: usize) -> Vec<char> {
    let visible = rows.min(len.saturating_sub(offset));
    if len <= rows {
        return vec![' '; visible];
    }

    let can_scroll_up = offset > 0;
    let can_scroll_down = offset + rows < len;
    let thumb = selected.map(|sel| {
        let ratio = sel as f64 / (len - 1) as f64;
        (ratio * visible.saturating_sub(1) as f64).floor() as usize
    });

    (0..visible)
        .map(|i| {
            if i == 0 && can_scroll_up {
                '⬆'
            } else if i + 1 == visible && can_scroll_down {
                '⬇'
            } else if Some(i) == thumb {
                '█'
            } else {
                '║'
            }
        })
        .collect()
}

/// The listing pane: name, size and modification time per entry.
pub struct FileList<'a> {
    entries: &'a [DirectoryEntry],
    selected: Option<usize>,
    offset: usize,
    icons: IconSet,
    theme: &'a Theme,
    title: String,
    empty_text: &'a str,
}

impl<'a> FileList<'a> {
    pub fn new(
        entries: &'a [DirectoryEntry],
        selected: Option<usize>,
        offset: usize,
        icons: IconSet,
        theme: &'a Theme,
    ) -> Self {
        Self {
            entries,
            selected,
            offset,
            icons,
            theme,
            title: String::new(),
            empty_text: "Empty directory",
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    fn name_style(&self, entry: &DirectoryEntry) -> Style {
        if entry.is_parent_marker {
            self.theme.parent
        } else if entry.is_dir {
            self.theme.directory
        } else {
            self.theme.file
        }
    }

    fn row(&self, index: usize, entry: &'a DirectoryEntry, name_width: usize) -> Row<'a> {
        let icon = self.icons.icon_for(entry);
        let name_budget = name_width.saturating_sub(icon.width() + 1);
        let name = Line::from(vec![
            Span::styled(icon, self.name_style(entry)),
            Span::raw(" "),
            Span::styled(
                truncate_name(&entry.display_name, name_budget),
                self.name_style(entry),
            ),
        ]);

        let size = if entry.is_dir {
            "-".to_string()
        } else {
            format_size(entry.size)
        };
        let modified = if entry.is_parent_marker {
            String::new()
        } else {
            format_timestamp(entry.modified)
        };

        let row = Row::new(vec![
            name,
            Line::styled(size, self.theme.size),
            Line::styled(modified, self.theme.modified),
        ]);

        if Some(index) == self.selected {
            row.style(self.theme.selected)
        } else {
            row
        }
    }
}

impl Widget for FileList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border)
            .title(Span::styled(self.title.clone(), self.theme.title));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 2 || inner.height < 2 {
            return;
        }

        if self.entries.is_empty() {
            Paragraph::new(Span::styled(self.empty_text, self.theme.help_desc)).render(inner, buf);
            return;
        }

        let [table_area, bar_area] =
            Layout::horizontal([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let rows = inner.height.saturating_sub(1) as usize;
        let name_width = table_area
            .width
            .saturating_sub(SIZE_WIDTH + MODIFIED_WIDTH + 2) as usize;

        let visible: Vec<Row> = self
            .entries
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(rows)
            .map(|(i, entry)| self.row(i, entry, name_width))
            .collect();

        let header = Row::new(vec!["Name", "Size", "Modified"]).style(self.theme.title);
        Table::new(
            visible,
            [
                Constraint::Fill(1),
                Constraint::Length(SIZE_WIDTH),
                Constraint::Length(MODIFIED_WIDTH),
            ],
        )
        .header(header)
        .column_spacing(1)
        .render(table_area, buf);

        let glyphs = scrollbar_glyphs(self.entries.len(), self.selected, self.offset, rows);
        for (i, glyph) in glyphs.into_iter().enumerate() {
            let y = bar_area.y + 1 + i as u16;
            if y >= bar_area.bottom() {
                break;
            }
            buf[(bar_area.x, y)]
                .set_char(glyph)
                .set_style(self.theme.scrollbar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn entry(name: &str, is_dir: bool) -> DirectoryEntry {
        DirectoryEntry {
            path: format!("/tmp/{name}").into(),
            display_name: name.to_string(),
            is_dir,
            is_parent_marker: false,
            size: 42,
            modified: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_scrollbar_blank_when_everything_fits() {
        assert_eq!(scrollbar_glyphs(3, Some(1), 0, 10), vec![' ', ' ', ' ']);
    }

    #[test]
    fn test_scrollbar_at_top() {
        let glyphs = scrollbar_glyphs(20, Some(0), 0, 5);
        assert_eq!(glyphs, vec!['█', '║', '║', '║', '⬇']);
    }

    #[test]
    fn test_scrollbar_in_middle() {
        let glyphs = scrollbar_glyphs(20, Some(10), 8, 5);
        assert_eq!(glyphs[0], '⬆');
        assert_eq!(glyphs[4], '⬇');
        assert_eq!(glyphs.iter().filter(|&&g| g == '█').count(), 1);
    }

    #[test]
    fn test_scrollbar_at_bottom() {
        let glyphs = scrollbar_glyphs(20, Some(19), 15, 5);
        assert_eq!(glyphs, vec!['⬆', '║', '║', '║', '█']);
    }

    #[test]
    fn test_render_marks_directories_with_dash() {
        let entries = vec![entry("src", true), entry("main.rs", false)];
        let theme = Theme::dark();
        let area = Rect::new(0, 0, 60, 6);
        let mut buf = Buffer::empty(area);

        FileList::new(&entries, Some(0), 0, IconSet::Plain, &theme)
            .title("files")
            .render(area, &mut buf);

        let row: String = (0..60).map(|x| buf[(x, 2)].symbol().to_string()).collect();
        assert!(row.contains("[DIR] src"));
        assert!(row.contains('-'));
    }
}
