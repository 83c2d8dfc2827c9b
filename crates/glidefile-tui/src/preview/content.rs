//! Preview content types and loading.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

use glidefile_core::DirectoryEntry;

use super::SyntaxHighlighter;

/// Maximum file size to attempt preview (10 MiB).
const MAX_PREVIEW_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum lines to keep for preview.
const MAX_PREVIEW_LINES: usize = 500;

/// Number of bytes to inspect for binary detection.
const BINARY_CHECK_BYTES: usize = 8000;

/// Tab size for display.
const TAB_SIZE: usize = 4;

/// Shown when nothing previewable is selected.
pub const NO_SELECTION_TEXT: &str = "Select a file to preview";

/// Shown once the vertical offset runs past the last line.
pub const END_OF_FILE_TEXT: &str = "-- End of File --";

/// Content that can be displayed in the preview pane.
#[derive(Debug, Clone)]
pub enum PreviewContent {
    /// Tab-expanded, possibly highlighted text lines.
    Text {
        lines: Vec<Line<'static>>,
        total_lines: usize,
        truncated: bool,
    },
    /// Binary file summary.
    Binary { size: u64, kind: String },
    /// File larger than the preview limit.
    TooLarge { size: u64 },
    /// Centered note for directories and empty selections.
    Placeholder(String),
    /// Error message.
    Error(String),
}

impl Default for PreviewContent {
    fn default() -> Self {
        Self::Placeholder(NO_SELECTION_TEXT.to_string())
    }
}

/// Loads preview content for entries.
pub struct PreviewLoader;

impl PreviewLoader {
    /// Load preview content for the selected entry, if any.
    pub fn load(entry: Option<&DirectoryEntry>) -> PreviewContent {
        match entry {
            None => PreviewContent::default(),
            Some(e) if e.is_parent_marker => {
                PreviewContent::Placeholder("Parent directory".to_string())
            }
            Some(e) if e.is_dir => {
                PreviewContent::Placeholder(format!("Directory '{}'", e.file_name()))
            }
            Some(e) => Self::load_file(&e.path),
        }
    }

    /// Load preview for a regular file.
    pub fn load_file(path: &Path) -> PreviewContent {
        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => return PreviewContent::Error(format!("Error reading file: {e}")),
        };
        let size = match file.metadata() {
            Ok(m) => m.len(),
            Err(e) => return PreviewContent::Error(format!("Error reading file: {e}")),
        };

        if size > MAX_PREVIEW_SIZE {
            return PreviewContent::TooLarge { size };
        }

        let mut bytes = Vec::with_capacity(size as usize);
        if let Err(e) = file.read_to_end(&mut bytes) {
            return PreviewContent::Error(format!("Error reading file: {e}"));
        }

        if is_binary(&bytes) {
            return PreviewContent::Binary {
                size,
                kind: binary_kind(path),
            };
        }

        let text = String::from_utf8_lossy(&bytes);
        let mut lines = Vec::new();
        let mut total_lines = 0;
        for line in text.lines() {
            if lines.len() < MAX_PREVIEW_LINES {
                lines.push(expand_tabs(line));
            }
            total_lines += 1;
        }

        let first_line = lines.first().map(|s| s.as_str());
        let rendered = match SyntaxHighlighter::find_syntax(path, first_line) {
            Some(syntax) => SyntaxHighlighter::highlight_lines(&lines, syntax),
            None => SyntaxHighlighter::plain_lines(&lines),
        };

        PreviewContent::Text {
            truncated: total_lines > rendered.len(),
            lines: rendered,
            total_lines,
        }
    }
}

/// Whether a sample looks like binary content.
///
/// NUL and C0 control bytes outside `7..=14` mark a file as binary.
pub fn is_binary(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .take(BINARY_CHECK_BYTES)
        .any(|&b| b < 7 || (b > 14 && b < 32))
}

fn binary_kind(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!("Binary file (.{e})"))
        .unwrap_or_else(|| "Binary file".to_string())
}

fn expand_tabs(line: &str) -> String {
    line.replace('\t', &" ".repeat(TAB_SIZE))
}

/// Drop the first `columns` display columns of a line, keeping span styles.
fn skip_columns(line: &Line<'static>, columns: usize) -> Line<'static> {
    if columns == 0 {
        return line.clone();
    }

    let mut skipped = 0;
    let mut spans = Vec::with_capacity(line.spans.len());
    for span in &line.spans {
        if skipped >= columns {
            spans.push(span.clone());
            continue;
        }
        let mut kept = String::new();
        for c in span.content.chars() {
            if skipped >= columns {
                kept.push(c);
            } else {
                skipped += c.width().unwrap_or(0);
            }
        }
        if !kept.is_empty() {
            spans.push(Span::styled(kept, span.style));
        }
    }

    Line::from(spans).style(line.style)
}

/// State for managing preview in the app.
#[derive(Debug, Default)]
pub struct PreviewState {
    /// Currently loaded preview.
    pub content: PreviewContent,
    /// Path being previewed.
    pub path: Option<PathBuf>,
    /// Lines skipped from the top.
    pub vertical: usize,
    /// Display columns skipped from the left.
    pub horizontal: usize,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload the preview for a newly selected entry and reset scrolling.
    pub fn load(&mut self, entry: Option<&DirectoryEntry>) {
        self.path = entry.filter(|e| e.is_file()).map(|e| e.path.clone());
        self.content = PreviewLoader::load(entry);
        self.vertical = 0;
        self.horizontal = 0;
    }

    /// Scroll by `delta` lines. Offsets never go negative and stop one
    /// past the last line.
    pub fn scroll_vertical(&mut self, delta: isize) {
        let max = self.line_count();
        self.vertical = self.vertical.saturating_add_signed(delta).min(max);
    }

    /// Scroll by `delta` display columns.
    pub fn scroll_horizontal(&mut self, delta: isize) {
        self.horizontal = self.horizontal.saturating_add_signed(delta);
    }

    fn line_count(&self) -> usize {
        match &self.content {
            PreviewContent::Text { lines, .. } => lines.len(),
            _ => 0,
        }
    }

    /// Visible text lines after applying both offsets.
    ///
    /// Returns `None` for non-text content. An empty window means the
    /// vertical offset is past the end of the file.
    pub fn visible_lines(&self, height: usize) -> Option<Vec<Line<'static>>> {
        let PreviewContent::Text { lines, .. } = &self.content else {
            return None;
        };

        Some(
            lines
                .iter()
                .skip(self.vertical)
                .take(height)
                .map(|line| skip_columns(line, self.horizontal))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_binary_detection() {
        assert!(!is_binary(b"plain text\twith tabs\r\n"));
        assert!(is_binary(b"abc\0def"));
        assert!(is_binary(&[b'a', 3, b'b']));
        assert!(is_binary(&[0x1b]));
        assert!(!is_binary(&[7, 8, 12, 14]));
    }

    #[test]
    fn test_binary_detection_only_samples_prefix() {
        let mut bytes = vec![b'a'; BINARY_CHECK_BYTES];
        bytes.push(0);
        assert!(!is_binary(&bytes));
    }

    #[test]
    fn test_text_preview_expands_tabs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.unknownext");
        fs::write(&path, "a\tb\nsecond\n").unwrap();

        match PreviewLoader::load_file(&path) {
            PreviewContent::Text {
                lines, total_lines, ..
            } => {
                assert_eq!(total_lines, 2);
                assert_eq!(text_of(&lines[0]), "a    b");
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_binary_file_is_summarized() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("blob.bin");
        fs::write(&path, [0u8, 1, 2, 3]).unwrap();

        assert!(matches!(
            PreviewLoader::load_file(&path),
            PreviewContent::Binary { size: 4, .. }
        ));
    }

    #[test]
    fn test_large_file_is_not_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("huge.log");
        let file = File::create(&path).unwrap();
        file.set_len(MAX_PREVIEW_SIZE + 1).unwrap();

        assert!(matches!(
            PreviewLoader::load_file(&path),
            PreviewContent::TooLarge { .. }
        ));
    }

    #[test]
    fn test_line_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("long.unknownext");
        let body: String = (0..600).map(|i| format!("line {i}\n")).collect();
        fs::write(&path, body).unwrap();

        match PreviewLoader::load_file(&path) {
            PreviewContent::Text {
                lines,
                total_lines,
                truncated,
            } => {
                assert_eq!(lines.len(), MAX_PREVIEW_LINES);
                assert_eq!(total_lines, 600);
                assert!(truncated);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn test_offsets_reset_on_load_and_never_go_negative() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.unknownext");
        fs::write(&path, "0123456789\nabcdefghij\n").unwrap();
        let entry = DirectoryEntry::from_metadata(&path, "a.unknownext", &fs::metadata(&path).unwrap());

        let mut state = PreviewState::new();
        state.load(Some(&entry));
        state.scroll_vertical(-3);
        state.scroll_horizontal(-5);
        assert_eq!((state.vertical, state.horizontal), (0, 0));

        state.scroll_vertical(1);
        state.scroll_horizontal(5);
        let visible = state.visible_lines(10).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(text_of(&visible[0]), "fghij");

        state.load(Some(&entry));
        assert_eq!((state.vertical, state.horizontal), (0, 0));
    }

    #[test]
    fn test_scrolling_past_end_yields_empty_window() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.unknownext");
        fs::write(&path, "one\ntwo\n").unwrap();

        let mut state = PreviewState::new();
        state.content = PreviewLoader::load_file(&path);
        state.scroll_vertical(10);
        assert_eq!(state.vertical, 2);
        assert!(state.visible_lines(5).unwrap().is_empty());
    }

    #[test]
    fn test_directories_get_placeholders() {
        let mut state = PreviewState::new();
        state.load(Some(&DirectoryEntry::parent_marker("/")));
        assert!(matches!(state.content, PreviewContent::Placeholder(_)));
        assert!(state.path.is_none());

        state.load(None);
        assert!(
            matches!(&state.content, PreviewContent::Placeholder(t) if t == NO_SELECTION_TEXT)
        );
    }

    #[test]
    fn test_skip_columns_handles_wide_chars() {
        let line = Line::from(vec![Span::raw("日本"), Span::raw("語x")]);
        assert_eq!(text_of(&skip_columns(&line, 2)), "本語x");
        assert_eq!(text_of(&skip_columns(&line, 6)), "x");
    }
}
