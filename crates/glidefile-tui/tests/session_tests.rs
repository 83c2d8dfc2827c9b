//! Drive a session through its public API and render it off-screen.

use std::fs;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::TempDir;

use glidefile_tui::App;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn fixture() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    fs::write(dir.path().join("readme.md"), "# Title\n\nbody\n").unwrap();
    dir
}

fn screen(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal
        .draw(|frame| frame.render_widget(app, frame.area()))
        .unwrap();

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn test_q_quits() {
    let dir = fixture();
    let mut app = App::new(dir.path().to_path_buf());

    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit());
}

#[test]
fn test_ctrl_c_quits() {
    let dir = fixture();
    let mut app = App::new(dir.path().to_path_buf());

    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}

#[test]
fn test_prompt_swallows_quit_key() {
    let dir = fixture();
    let mut app = App::new(dir.path().to_path_buf());

    app.handle_key(key(KeyCode::Char('a')));
    app.handle_key(key(KeyCode::Char('q')));
    assert!(!app.should_quit());

    app.handle_key(key(KeyCode::Esc));
    app.handle_key(key(KeyCode::Char('q')));
    assert!(app.should_quit());
    assert!(!dir.path().join("q.txt").exists());
}

#[test]
fn test_screen_shows_listing_and_preview() {
    let dir = fixture();
    let mut app = App::new(dir.path().to_path_buf());
    app.handle_key(key(KeyCode::End));

    let text = screen(&app);
    assert!(text.contains("glidefile"));
    assert!(text.contains("NORMAL"));
    assert!(text.contains("docs"));
    assert!(text.contains("readme.md"));
    assert!(text.contains("Title"));
}

#[test]
fn test_screen_shows_prompt() {
    let dir = fixture();
    let mut app = App::new(dir.path().to_path_buf());
    app.handle_key(key(KeyCode::Char('a')));
    for c in "draft".chars() {
        app.handle_key(key(KeyCode::Char(c)));
    }

    let text = screen(&app);
    assert!(text.contains("Create in ["));
    assert!(text.contains("draft"));
    assert!(text.contains("ADD"));
}

#[test]
fn test_screen_shows_binary_summary() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("blob.bin"), [0u8, 1, 2, 3, 255]).unwrap();
    let mut app = App::new(dir.path().to_path_buf());
    app.handle_key(key(KeyCode::End));

    let text = screen(&app);
    assert!(text.contains("Binary File"));
    assert!(text.contains("No preview available"));
}
