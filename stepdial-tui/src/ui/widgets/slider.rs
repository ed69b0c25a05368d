//! Horizontal slider bar widget.
//!
//! Position 0 maps to the leftmost cell and 1 to the rightmost. Positions
//! outside `[0, 1]` pin the knob to the nearest end and draw it in the
//! out-of-range color.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::theme;

const FILLED: &str = "━";
const EMPTY: &str = "─";
const KNOB: &str = "●";
const KNOB_BELOW: &str = "◀";
const KNOB_ABOVE: &str = "▶";

#[derive(Debug, Clone, Copy)]
pub struct Slider {
    position: f64,
    focused: bool,
    dragging: bool,
}

impl Slider {
    pub fn new(position: f64) -> Self {
        Self {
            position,
            focused: false,
            dragging: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }
}

/// Cell offset of the knob for a bar `width` cells wide.
pub fn knob_column(position: f64, width: u16) -> u16 {
    if width <= 1 || !position.is_finite() {
        return 0;
    }
    let last = f64::from(width - 1);
    (position.clamp(0.0, 1.0) * last).round() as u16
}

/// Slider position for a cell offset, the inverse of [`knob_column`].
pub fn position_at(column: u16, width: u16) -> f64 {
    if width <= 1 {
        return 0.0;
    }
    (f64::from(column) / f64::from(width - 1)).clamp(0.0, 1.0)
}

impl Widget for Slider {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let palette = theme::theme();
        let fill = Style::default().fg(palette.slider_color(self.position));
        let rest = if self.focused {
            theme::neutral()
        } else {
            theme::muted()
        };
        let knob_style = if self.dragging {
            theme::warning()
        } else if self.focused {
            theme::accent_bold()
        } else {
            fill
        };

        let knob = knob_column(self.position, area.width);
        let knob_symbol = if self.position < 0.0 {
            KNOB_BELOW
        } else if self.position > 1.0 {
            KNOB_ABOVE
        } else {
            KNOB
        };

        for offset in 0..area.width {
            let (symbol, style) = match offset.cmp(&knob) {
                std::cmp::Ordering::Less => (FILLED, fill),
                std::cmp::Ordering::Equal => (knob_symbol, knob_style),
                std::cmp::Ordering::Greater => (EMPTY, rest),
            };
            buf.set_string(area.x + offset, area.y, symbol, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(position: f64, width: u16) -> Vec<String> {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        Slider::new(position).render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn knob_tracks_position() {
        assert_eq!(knob_column(0.0, 11), 0);
        assert_eq!(knob_column(0.5, 11), 5);
        assert_eq!(knob_column(1.0, 11), 10);
        assert_eq!(knob_column(7.0, 11), 10);
        assert_eq!(knob_column(f64::NAN, 11), 0);
    }

    #[test]
    fn column_and_position_invert() {
        for column in 0..21 {
            assert_eq!(knob_column(position_at(column, 21), 21), column);
        }
        assert_eq!(position_at(30, 21), 1.0);
        assert_eq!(position_at(3, 1), 0.0);
    }

    #[test]
    fn renders_fill_knob_and_track() {
        let cells = rendered(0.5, 11);
        assert_eq!(cells[0], FILLED);
        assert_eq!(cells[4], FILLED);
        assert_eq!(cells[5], KNOB);
        assert_eq!(cells[6], EMPTY);
        assert_eq!(cells[10], EMPTY);
    }

    #[test]
    fn out_of_range_knob_is_pinned() {
        assert_eq!(rendered(2.5, 11)[10], KNOB_ABOVE);
        assert_eq!(rendered(-1.0, 11)[0], KNOB_BELOW);
    }
}
