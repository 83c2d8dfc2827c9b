//! Entry glyphs for the listing.

use glidefile_core::DirectoryEntry;

const FILE_ICON: &str = "\u{f15b}";
const FOLDER_ICON: &str = "\u{e5ff}";
const PARENT_ICON: &str = "\u{f062}";

const FILE_FALLBACK: &str = "  ";
const FOLDER_FALLBACK: &str = "[DIR]";
const PARENT_FALLBACK: &str = "[..]";

/// Glyph lookup used by the file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconSet {
    /// Nerd Font glyphs.
    #[default]
    NerdFont,
    /// ASCII markers for terminals without a patched font.
    Plain,
}

impl IconSet {
    pub fn new(use_icons: bool) -> Self {
        if use_icons { Self::NerdFont } else { Self::Plain }
    }

    /// Glyph for an entry.
    pub fn icon_for(self, entry: &DirectoryEntry) -> &'static str {
        match self {
            Self::Plain if entry.is_parent_marker => PARENT_FALLBACK,
            Self::Plain if entry.is_dir => FOLDER_FALLBACK,
            Self::Plain => FILE_FALLBACK,
            Self::NerdFont if entry.is_parent_marker => PARENT_ICON,
            Self::NerdFont if entry.is_dir => FOLDER_ICON,
            Self::NerdFont => file_icon(&entry.display_name),
        }
    }
}

fn file_icon(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    let base = lower.rsplit('/').next().unwrap_or(&lower);

    match base {
        ".gitignore" | ".gitattributes" | ".gitmodules" => return "\u{e702}",
        "dockerfile" => return "\u{f308}",
        "cargo.toml" | "cargo.lock" => return "\u{e7a8}",
        _ => {}
    }

    let Some((_, ext)) = base.rsplit_once('.') else {
        return FILE_ICON;
    };

    match ext {
        "rs" => "\u{e7a8}",
        "cs" => "\u{e73a}",
        "js" | "mjs" | "cjs" => "\u{e74e}",
        "ts" | "tsx" => "\u{e628}",
        "json" => "\u{e60b}",
        "html" | "htm" => "\u{e736}",
        "css" | "scss" => "\u{e749}",
        "py" => "\u{e73c}",
        "java" => "\u{e738}",
        "c" | "h" => "\u{e61e}",
        "cpp" | "hpp" | "cc" => "\u{e61d}",
        "go" => "\u{e627}",
        "sh" | "bash" | "zsh" => "\u{f489}",
        "md" => "\u{f48a}",
        "txt" | "log" => "\u{f15c}",
        "toml" | "ini" | "cfg" => "\u{e615}",
        "yml" | "yaml" => "\u{f481}",
        "pdf" => "\u{f1c1}",
        "doc" | "docx" => "\u{f1c2}",
        "xls" | "xlsx" | "csv" => "\u{f1c3}",
        "ppt" | "pptx" => "\u{f1c4}",
        "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" => "\u{f1c5}",
        "mp3" | "wav" | "flac" | "ogg" => "\u{f1c7}",
        "mp4" | "avi" | "mkv" | "mov" => "\u{f1c8}",
        "zip" | "rar" | "7z" | "tar" | "gz" | "xz" => "\u{f1c6}",
        "exe" | "msi" => "\u{e70f}",
        "dll" | "so" | "dylib" => "\u{f107b}",
        _ => FILE_ICON,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn file(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            path: name.into(),
            display_name: name.to_string(),
            is_dir: false,
            is_parent_marker: false,
            size: 0,
            modified: SystemTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn test_plain_markers() {
        let icons = IconSet::new(false);
        assert_eq!(icons.icon_for(&DirectoryEntry::parent_marker("/")), "[..]");
        let mut dir = file("src");
        dir.is_dir = true;
        assert_eq!(icons.icon_for(&dir), "[DIR]");
        assert_eq!(icons.icon_for(&file("main.rs")), "  ");
    }

    #[test]
    fn test_extension_lookup_is_case_insensitive() {
        let icons = IconSet::new(true);
        assert_eq!(icons.icon_for(&file("README.MD")), icons.icon_for(&file("notes.md")));
        assert_eq!(icons.icon_for(&file("unknown.zzz")), FILE_ICON);
        assert_eq!(icons.icon_for(&file("Makefile")), FILE_ICON);
    }

    #[test]
    fn test_deep_scan_names_use_last_segment() {
        let icons = IconSet::new(true);
        assert_eq!(icons.icon_for(&file("src/app/.gitignore")), "\u{e702}");
    }
}
