//! File preview system for the TUI.
//!
//! Provides syntax-highlighted previews for text files and short
//! summaries for binary, oversized and unreadable files.

mod content;
mod syntax;

pub use content::{END_OF_FILE_TEXT, PreviewContent, PreviewState};
use syntax::SyntaxHighlighter;
