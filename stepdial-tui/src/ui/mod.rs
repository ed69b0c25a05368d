//! Top-level UI layout: settings panel beside the help panel, status bar below.

pub mod help_panel;
pub mod overlays;
pub mod settings_panel;
pub mod status_bar;
pub mod widgets;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::app::{AppState, Mode};
use crate::theme;

const HELP_WIDTH: u16 = 40;

/// Screen regions, shared by drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub settings: Rect,
    pub help: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(HELP_WIDTH)])
            .split(rows[0]);
        Self {
            settings: columns[0],
            help: columns[1],
            status: rows[1],
        }
    }

    /// Settings panel area inside its border.
    pub fn settings_inner(&self) -> Rect {
        panel_block("Settings", true).inner(self.settings)
    }
}

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let layout = ScreenLayout::new(f.area());

    let title = format!("Settings [{}/{}]", app.selected + 1, app.settings.len());
    f.render_widget(panel_block(&title, true), layout.settings);
    settings_panel::render(f, layout.settings_inner(), app);

    let help = panel_block("Help", false);
    let help_inner = help.inner(layout.help);
    f.render_widget(help, layout.help);
    help_panel::render(f, help_inner);

    status_bar::render(f, layout.status, app);

    if app.mode == Mode::EditExternal {
        overlays::render_external_prompt(f, layout.settings, app);
    }
}

fn panel_block(title: &str, is_active: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(is_active))
        .title(format!(" {title} "))
        .title_style(theme::panel_title(is_active))
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
