//! Application rendering.

use std::path::Path;

use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use glidefile_core::DirectoryEntry;

use crate::icons::IconSet;
use crate::preview::{END_OF_FILE_TEXT, PreviewContent, PreviewState};
use crate::theme::Theme;
use crate::ui::{
    AppLayout, FileList, PROGRESS_BAR_WIDTH, ProgressBar, format_size, truncate_path_left,
};

use super::filter::FilterSession;
use super::input::InputState;
use super::state::{ClipboardEntry, ClipboardMode, InputMode, StatusKind, StatusMessage, TransferJob};

/// Render context containing all the state needed for rendering.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub icons: IconSet,
    pub mode: &'a InputMode,
    pub current_path: &'a Path,
    pub entries: &'a [DirectoryEntry],
    pub selected: Option<usize>,
    pub offset: usize,
    pub preview: &'a PreviewState,
    pub status: Option<&'a StatusMessage>,
    pub clipboard: Option<&'a ClipboardEntry>,
    pub transfer: Option<&'a TransferJob>,
    pub filter: &'a FilterSession,
}

/// Main render function for the application.
pub fn render_app(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    // Fill entire area with theme background color
    let base_style = Style::default()
        .bg(ctx.theme.background)
        .fg(ctx.theme.foreground);
    buf.set_style(area, base_style);

    let layout = AppLayout::new(area);

    render_header(ctx, layout.header, buf);
    render_list(ctx, layout.list, buf);
    render_preview(ctx, layout.preview, buf);
    render_footer(ctx, layout.footer, buf);
}

fn render_header(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(" glidefile ", ctx.theme.title.add_modifier(Modifier::BOLD));
    let badge = Span::styled(
        format!(" {} ", ctx.mode),
        Style::default().fg(ctx.theme.background).bg(ctx.theme.info),
    );

    let filter = if ctx.filter.is_active() {
        format!(" [filter: {}] ", ctx.filter.query)
    } else {
        String::new()
    };

    let used = title.width() + badge.width() + filter.width() + 2;
    let path_width = (area.width as usize).saturating_sub(used);
    let path = truncate_path_left(&ctx.current_path.display().to_string(), path_width);

    let line = Line::from(vec![
        title,
        badge,
        Span::raw(" "),
        Span::styled(path, ctx.theme.header),
        Span::styled(filter, Style::default().fg(ctx.theme.warning)),
    ]);

    Paragraph::new(line).style(ctx.theme.header).render(area, buf);
}

fn render_list(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let filtered = ctx.filter.is_active();
    let title = if filtered {
        format!(" Results for '{}' ({}) ", ctx.filter.query, ctx.entries.len())
    } else {
        " Files ".to_string()
    };

    FileList::new(ctx.entries, ctx.selected, ctx.offset, ctx.icons, ctx.theme)
        .title(title)
        .empty_text(if filtered { "No matches" } else { "Empty directory" })
        .render(area, buf);
}

fn render_preview(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let name = ctx
        .preview
        .path
        .as_deref()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Preview".to_string());

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(ctx.theme.border)
        .title(Span::styled(format!(" {name} "), ctx.theme.title));

    if let PreviewContent::Text {
        total_lines,
        truncated: true,
        lines,
    } = &ctx.preview.content
    {
        block = block.title_bottom(
            Line::styled(
                format!(" first {} of {} lines ", lines.len(), total_lines),
                ctx.theme.help_desc,
            )
            .right_aligned(),
        );
    }

    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let muted = Style::default().fg(ctx.theme.muted);

    match &ctx.preview.content {
        PreviewContent::Text { .. } => {
            let mut lines = ctx
                .preview
                .visible_lines(inner.height as usize)
                .unwrap_or_default();
            if lines.is_empty() {
                centered(vec![Line::styled(END_OF_FILE_TEXT, muted)], inner, buf);
            } else {
                // The end marker follows the last line once it is in view
                if lines.len() < inner.height as usize {
                    lines.push(Line::styled(END_OF_FILE_TEXT, muted));
                }
                Paragraph::new(lines).render(inner, buf);
            }
        }
        PreviewContent::Binary { size, kind } => {
            let lines = vec![
                Line::styled("Binary File", ctx.theme.title),
                Line::styled("No preview available", muted),
                Line::raw(""),
                Line::styled(format!("{kind} · {}", format_size(*size)), ctx.theme.size),
            ];
            centered(lines, inner, buf);
        }
        PreviewContent::TooLarge { size } => {
            let lines = vec![
                Line::styled("File too large to preview", ctx.theme.title),
                Line::styled(format_size(*size), ctx.theme.size),
            ];
            centered(lines, inner, buf);
        }
        PreviewContent::Placeholder(text) => {
            centered(vec![Line::styled(text.as_str(), muted)], inner, buf);
        }
        PreviewContent::Error(message) => {
            let style = Style::default().fg(ctx.theme.error);
            centered(vec![Line::styled(message.as_str(), style)], inner, buf);
        }
    }
}

/// Render lines centered both ways.
fn centered(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let height = (lines.len() as u16).min(area.height);
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(middle, buf);
}

fn render_footer(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, ctx.theme.footer);
    let [prompt_area, hints_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    render_prompt(ctx, prompt_area, buf);

    let badge = ctx.clipboard.map(|clip| {
        let text = format!(" {} ", clip.summary());
        let width = (text.width() as u16).min(hints_area.width);
        (text, width)
    });
    let badge_width = badge.as_ref().map_or(0, |(_, w)| *w);

    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(badge_width)]).areas(hints_area);

    match ctx.transfer {
        Some(job) => render_transfer(ctx, job, left, buf),
        None => render_hints(ctx, left, buf),
    }

    if let Some((text, _)) = badge {
        Paragraph::new(Span::styled(text, ctx.theme.clipboard)).render(right, buf);
    }
}

/// First footer row: the active prompt, or the last status message.
fn render_prompt(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let line = match ctx.mode {
        InputMode::Add { input, base } => {
            let label = base
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| base.display().to_string());
            input_line(ctx, format!("Create in [{label}]: "), input, None)
        }
        InputMode::Rename { input, .. } => input_line(ctx, "Rename: ".to_string(), input, None),
        InputMode::Filter { input } => {
            let suffix = ctx
                .filter
                .scan_running
                .then(|| format!("  Searching… {} files", ctx.filter.scan_files));
            input_line(ctx, "Search: ".to_string(), input, suffix)
        }
        InputMode::DeleteConfirm { target } => Line::from(vec![
            Span::styled(
                format!("Delete '{}'? ", target.file_name()),
                Style::default().fg(ctx.theme.error).add_modifier(Modifier::BOLD),
            ),
            Span::styled("(y/n)", ctx.theme.help_key),
        ]),
        InputMode::QuitConfirm => Line::from(vec![
            Span::styled(
                "A file operation is in progress. Quit and cancel? ",
                Style::default().fg(ctx.theme.warning).add_modifier(Modifier::BOLD),
            ),
            Span::styled("(y/n)", ctx.theme.help_key),
        ]),
        InputMode::Normal | InputMode::FilteredNavigation => match ctx.status {
            Some(status) => {
                let color = match status.kind {
                    StatusKind::Info => ctx.theme.info,
                    StatusKind::Success => ctx.theme.success,
                    StatusKind::Error => ctx.theme.error,
                };
                Line::styled(format!(" {}", status.text), Style::default().fg(color))
            }
            None => Line::raw(""),
        },
    };

    Paragraph::new(line).render(area, buf);
}

/// A prompt label followed by the buffer with a block cursor.
fn input_line<'a>(
    ctx: &RenderContext,
    label: String,
    input: &'a InputState,
    suffix: Option<String>,
) -> Line<'a> {
    let text = input.buffer();
    let split = text
        .char_indices()
        .nth(input.cursor())
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    let (before, rest) = text.split_at(split);
    let mut rest_chars = rest.chars();
    let at_cursor = rest_chars
        .next()
        .map(String::from)
        .unwrap_or_else(|| " ".to_string());

    let mut spans = vec![
        Span::styled(format!(" {label}"), ctx.theme.prompt),
        Span::styled(before, ctx.theme.prompt_input),
        Span::styled(at_cursor, ctx.theme.prompt_cursor),
        Span::styled(rest_chars.as_str(), ctx.theme.prompt_input),
    ];
    if let Some(suffix) = suffix {
        spans.push(Span::styled(suffix, Style::default().fg(ctx.theme.muted)));
    }
    Line::from(spans)
}

fn render_transfer(ctx: &RenderContext, job: &TransferJob, area: Rect, buf: &mut Buffer) {
    let verb = match job.mode {
        ClipboardMode::Copy => " Copying ",
        ClipboardMode::Move => " Moving ",
    };
    let percent = job.progress.percentage();

    let verb_width = verb.width() as u16;
    let bar_width = PROGRESS_BAR_WIDTH.min(area.width.saturating_sub(verb_width));
    let [verb_area, bar_area, rest_area] = Layout::horizontal([
        Constraint::Length(verb_width),
        Constraint::Length(bar_width),
        Constraint::Min(0),
    ])
    .areas(area);

    Paragraph::new(Span::styled(verb, ctx.theme.prompt)).render(verb_area, buf);
    ProgressBar::new(percent)
        .filled_style(ctx.theme.progress_bar)
        .empty_style(ctx.theme.progress_bg)
        .render(bar_area, buf);

    let detail = Line::from(vec![
        Span::styled(format!(" {percent:>3.0}% "), ctx.theme.help_key),
        Span::styled(job.current_label(), ctx.theme.help_desc),
    ]);
    Paragraph::new(detail).render(rest_area, buf);
}

fn render_hints(ctx: &RenderContext, area: Rect, buf: &mut Buffer) {
    let keys: Vec<(&str, &str)> = match ctx.mode {
        InputMode::Add { .. } | InputMode::Rename { .. } => {
            vec![("Enter", "Confirm"), ("Esc", "Cancel")]
        }
        InputMode::Filter { .. } => {
            vec![("Enter", "Keep"), ("↑/↓", "Browse"), ("Esc", "Close"), ("^C", "Clear")]
        }
        InputMode::DeleteConfirm { .. } | InputMode::QuitConfirm => {
            vec![("y", "Yes"), ("n", "No")]
        }
        InputMode::Normal | InputMode::FilteredNavigation => {
            let mut v = vec![("j/k", "Nav"), ("Enter", "Open"), ("h", "Up"), ("s", "Search")];
            if *ctx.mode == InputMode::FilteredNavigation {
                v.push(("b", "Results"));
            }
            v.extend([("a", "Add"), ("r", "Rename"), ("d", "Del"), ("c", "Copy"), ("x", "Cut")]);
            if ctx.clipboard.is_some() {
                v.push(("p", "Paste"));
            }
            v.push(("q", "Quit"));
            v
        }
    };

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {key} "), ctx.theme.help_key),
                Span::styled(format!("{desc} "), ctx.theme.help_desc),
            ]
        })
        .collect();

    Paragraph::new(Line::from(spans)).render(area, buf);
}
