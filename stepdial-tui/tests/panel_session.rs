//! Keyboard session against the demo panel, then a save/restore cycle.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::Terminal;
use rust_decimal_macros::dec;

use stepdial_core::PanelConfig;
use stepdial_tui::{input, persistence, ui, AppState, Mode};

fn press(app: &mut AppState, code: KeyCode) {
    input::handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
}

fn demo_app(path: PathBuf) -> AppState {
    AppState::new(PanelConfig::default_panel().build().unwrap(), path)
}

#[test]
fn edits_survive_save_and_restore() {
    let dir = std::env::temp_dir().join("stepdial_tui_session");
    let path = dir.join("values.json");

    let mut app = demo_app(path.clone());
    // volume: three steps up
    for _ in 0..3 {
        press(&mut app, KeyCode::Char('l'));
    }
    // white_balance: type a value outside the slider range
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Enter);
    for _ in 0..4 {
        press(&mut app, KeyCode::Backspace);
    }
    for c in "11000".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.mode, Mode::Normal);
    press(&mut app, KeyCode::Char('s'));

    let mut restored = demo_app(path.clone());
    let loaded = persistence::load(&path);
    assert_eq!(persistence::apply(&mut restored, &loaded), 5);
    assert_eq!(restored.settings[0].snapshot().quantity, dec!(530));
    assert_eq!(restored.settings[2].snapshot().quantity, dec!(11000));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn draws_every_mode_without_panicking() {
    let mut app = demo_app(PathBuf::from("unused.json"));
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

    terminal.draw(|f| ui::draw(f, &app)).unwrap();
    press(&mut app, KeyCode::Enter);
    terminal.draw(|f| ui::draw(f, &app)).unwrap();
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('d'));
    terminal.draw(|f| ui::draw(f, &app)).unwrap();
    press(&mut app, KeyCode::Char('d'));
    press(&mut app, KeyCode::Char('e'));
    terminal.draw(|f| ui::draw(f, &app)).unwrap();

    // A tiny terminal hides the sliders instead of failing.
    let mut small = Terminal::new(TestBackend::new(30, 5)).unwrap();
    small.draw(|f| ui::draw(f, &app)).unwrap();
}
