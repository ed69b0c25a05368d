//! Input dispatch: key events by mode, mouse events on slider bars.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::app::{AppState, Mode};
use crate::persistence;
use crate::ui::settings_panel;

const BIG_STEP: u32 = 10;
const DRAG_STEP: f64 = 0.01;
const BIG_DRAG_STEP: f64 = 0.1;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    match app.mode {
        Mode::Normal => handle_normal_key(app, key),
        Mode::EditText => handle_text_key(app, key),
        Mode::Drag => handle_drag_key(app, key),
        Mode::EditExternal => handle_prompt_key(app, key),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('s') => save(app),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(),
        KeyCode::Char('h') | KeyCode::Left => step(app, false, 1),
        KeyCode::Char('l') | KeyCode::Right => step(app, true, 1),
        KeyCode::Char('H') => step(app, false, BIG_STEP),
        KeyCode::Char('L') => step(app, true, BIG_STEP),
        KeyCode::Char('-') => rescale(app, Decimal::new(5, 1)),
        KeyCode::Char('+') | KeyCode::Char('=') => rescale(app, Decimal::TWO),
        KeyCode::Char('0') => {
            if let Some(setting) = app.current_mut() {
                setting.reset_slider_range();
            }
        }
        KeyCode::Enter => {
            if app.current().is_some() {
                app.mode = Mode::EditText;
            }
        }
        KeyCode::Char('d') => {
            if let Some(setting) = app.current_mut() {
                setting.begin_drag();
                app.mode = Mode::Drag;
            }
        }
        KeyCode::Char('e') => {
            if let Some(text) = app.current().map(|s| s.external_text()) {
                app.prompt_input = text;
                app.mode = Mode::EditExternal;
            }
        }
        _ => {}
    }
}

fn handle_text_key(app: &mut AppState, key: KeyEvent) {
    let Some(setting) = app.current_mut() else {
        app.mode = Mode::Normal;
        return;
    };
    match key.code {
        KeyCode::Enter => {
            let accepted = setting.commit_text();
            let name = setting.name().to_string();
            app.mode = Mode::Normal;
            if !accepted {
                app.set_warning(format!("{name}: not a number"));
            }
        }
        KeyCode::Esc => {
            setting.revert_text();
            app.mode = Mode::Normal;
        }
        KeyCode::Backspace => {
            let mut text = setting.field_text().to_string();
            text.pop();
            setting.set_field_text(&text);
        }
        KeyCode::Char(c) => {
            let text = format!("{}{c}", setting.field_text());
            setting.set_field_text(&text);
        }
        _ => {}
    }
}

fn handle_drag_key(app: &mut AppState, key: KeyEvent) {
    let delta = match key.code {
        KeyCode::Char('h') | KeyCode::Left if key.modifiers.contains(KeyModifiers::SHIFT) => {
            -BIG_DRAG_STEP
        }
        KeyCode::Char('l') | KeyCode::Right if key.modifiers.contains(KeyModifiers::SHIFT) => {
            BIG_DRAG_STEP
        }
        KeyCode::Char('h') | KeyCode::Left => -DRAG_STEP,
        KeyCode::Char('l') | KeyCode::Right => DRAG_STEP,
        KeyCode::Char('H') => -BIG_DRAG_STEP,
        KeyCode::Char('L') => BIG_DRAG_STEP,
        KeyCode::Char('d') | KeyCode::Esc | KeyCode::Enter => {
            end_drag(app);
            return;
        }
        _ => return,
    };
    if let Some(setting) = app.current_mut() {
        let position = (setting.slider_position() + delta).clamp(0.0, 1.0);
        setting.drag_to(position);
    }
}

fn handle_prompt_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.prompt_input.clear();
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => {
            let text = std::mem::take(&mut app.prompt_input);
            app.mode = Mode::Normal;
            let Some(setting) = app.current_mut() else {
                return;
            };
            if setting.set_external_text(&text) {
                let msg = format!("{} <- {}", setting.name(), setting.external_text());
                app.set_status(msg);
            } else {
                app.set_warning(format!("not a number: {text}"));
            }
        }
        KeyCode::Backspace => {
            app.prompt_input.pop();
        }
        KeyCode::Char(c) => {
            app.prompt_input.push(c);
        }
        _ => {}
    }
}

/// Handle a mouse event. `panel` is the settings panel area inside its border.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent, panel: Rect) {
    if matches!(app.mode, Mode::EditText | Mode::EditExternal) {
        return;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let count = app.settings.len();
            let Some((index, position)) =
                settings_panel::hit_test(panel, app.selected, count, mouse.column, mouse.row)
            else {
                return;
            };
            if app.mode == Mode::Drag {
                end_drag(app);
            }
            app.selected = index;
            app.mouse_drag = Some(index);
            app.mode = Mode::Drag;
            if let Some(setting) = app.current_mut() {
                setting.begin_drag();
                setting.drag_to(position);
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let Some(index) = app.mouse_drag else {
                return;
            };
            let Some(bar) = settings_panel::slider_bar_of(panel, app.selected, index) else {
                return;
            };
            let column = mouse.column.clamp(bar.x, bar.right().saturating_sub(1));
            let position =
                crate::ui::widgets::slider::position_at(column - bar.x, bar.width);
            if let Some(setting) = app.settings.get_mut(index) {
                setting.drag_to(position);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if app.mouse_drag.is_some() {
                end_drag(app);
            }
        }
        _ => {}
    }
}

fn step(app: &mut AppState, up: bool, steps: u32) {
    if let Some(setting) = app.current_mut() {
        if up {
            setting.increment(steps);
        } else {
            setting.decrement(steps);
        }
    }
}

fn rescale(app: &mut AppState, factor: Decimal) {
    if let Some(setting) = app.current_mut() {
        setting.rescale(factor);
        let snapshot = setting.snapshot();
        debug!(
            setting = %snapshot.name,
            lower = %snapshot.slider_lower,
            upper = %snapshot.slider_upper,
            "slider rescaled"
        );
    }
}

fn end_drag(app: &mut AppState) {
    if let Some(setting) = app.current_mut() {
        setting.end_drag();
    }
    app.mouse_drag = None;
    app.mode = Mode::Normal;
}

pub fn save(app: &mut AppState) {
    let values = persistence::extract(app);
    match persistence::save(&app.values_path, &values) {
        Ok(()) => {
            info!(count = values.values.len(), "values saved");
            app.set_status(format!("Saved {} values", values.values.len()));
        }
        Err(e) => app.set_error(format!("Save failed: {e}")),
    }
}
