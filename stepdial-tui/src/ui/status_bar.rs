//! Bottom status bar: mode, last status message, key hints.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Mode, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(format!(" {} ", app.mode.label()), theme::selected()));
    spans.push(Span::styled(format!(" {}", hints(app.mode)), theme::muted()));

    // Separator
    spans.push(Span::raw(" | "));

    if let Some(status) = &app.status_message {
        let style = match status.level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(
            format!("[{}] ", status.at.format("%H:%M:%S")),
            theme::muted(),
        ));
        spans.push(Span::styled(status.text.as_str(), style));
    }

    let line = Line::from(spans);
    let para = Paragraph::new(line);
    f.render_widget(para, area);
}

fn hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Normal => "j/k:select h/l:step Enter:edit d:drag e:external s:save q:quit",
        Mode::EditText => "Enter:commit Esc:revert",
        Mode::Drag => "h/l:move H/L:move more d/Esc:release",
        Mode::EditExternal => "Enter:write Esc:cancel",
    }
}
