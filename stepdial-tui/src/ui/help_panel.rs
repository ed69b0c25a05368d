//! Help panel: keyboard and mouse reference.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Settings");
    key(&mut lines, "j / k", "Select next / previous");
    key(&mut lines, "h / l", "Step down / up");
    key(&mut lines, "H / L", "Ten steps down / up");
    key(&mut lines, "- / +", "Zoom slider out / in");
    key(&mut lines, "0", "Reset slider range");
    lines.push(Line::from(""));

    section(&mut lines, "Text field");
    key(&mut lines, "Enter", "Edit, then commit");
    key(&mut lines, "Esc", "Discard the edit");
    lines.push(Line::from(""));

    section(&mut lines, "Slider");
    key(&mut lines, "d", "Grab / release");
    key(&mut lines, "h / l", "Move by 1%");
    key(&mut lines, "H / L", "Move by 10%");
    key(&mut lines, "mouse", "Click or drag the bar");
    lines.push(Line::from(""));

    section(&mut lines, "External value");
    key(&mut lines, "e", "Write it as its owner");
    lines.push(Line::from(""));

    section(&mut lines, "Session");
    key(&mut lines, "s", "Save values");
    key(&mut lines, "q", "Save and quit");

    let para = Paragraph::new(lines);
    f.render_widget(para, area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>7}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
