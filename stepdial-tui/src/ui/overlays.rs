//! Overlay widgets: external value prompt.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::AppState;
use crate::theme;
use crate::ui::centered_rect;

/// Prompt for writing the selected setting's external value directly,
/// as the value's owner would.
pub fn render_external_prompt(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(50, 30, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" External Value [Enter]write [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let (name, current) = app
        .current()
        .map(|s| (s.name().to_string(), s.external_text()))
        .unwrap_or_default();

    let text = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Setting: ", theme::muted()),
            Span::styled(name, theme::accent_bold()),
            Span::styled("  current: ", theme::muted()),
            Span::styled(current, theme::neutral()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("> ", theme::accent()),
            Span::styled(app.prompt_input.as_str(), theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ]),
    ];

    let para = Paragraph::new(text);
    f.render_widget(para, inner);
}
