//! Settings panel: one block per setting with text field, slider bar and
//! the read-only bound and step labels.
//!
//! ```text
//!  volume       integer                [ 530        ]
//!             0 ━━━━━━━━━━●────────────────── 1000
//!               step 10  #53  max 0..1000  ext 530
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use stepdial_core::SettingSnapshot;

use crate::app::{AppState, Mode};
use crate::theme;
use crate::ui::widgets::slider::{self, Slider};

/// Terminal rows taken by each setting, including the spacer.
pub const ROWS_PER_SETTING: u16 = 4;
/// Columns reserved on each side of the slider bar for the bound labels.
const BOUND_WIDTH: u16 = 12;
const NAME_WIDTH: usize = 16;

/// Index of the first setting drawn, so that the selection stays visible.
pub fn first_visible(area: Rect, selected: usize) -> usize {
    let visible = usize::from((area.height / ROWS_PER_SETTING).max(1));
    selected.saturating_sub(visible - 1)
}

/// Slider bar cells for the setting drawn in `slot` (0 = topmost drawn).
pub fn slider_bar(area: Rect, slot: usize) -> Option<Rect> {
    let offset = u16::try_from(slot).ok()?.checked_mul(ROWS_PER_SETTING)?;
    let y = area.y.checked_add(offset)?.checked_add(1)?;
    if y >= area.bottom() || area.width <= 2 * BOUND_WIDTH + 2 {
        return None;
    }
    Some(Rect::new(
        area.x + BOUND_WIDTH + 1,
        y,
        area.width - 2 * BOUND_WIDTH - 2,
        1,
    ))
}

/// Slider bar of setting `index` given the current selection.
pub fn slider_bar_of(area: Rect, selected: usize, index: usize) -> Option<Rect> {
    let slot = index.checked_sub(first_visible(area, selected))?;
    slider_bar(area, slot)
}

/// Setting index and slider position under a terminal cell, if the cell is
/// on a drawn slider bar.
pub fn hit_test(
    area: Rect,
    selected: usize,
    count: usize,
    column: u16,
    row: u16,
) -> Option<(usize, f64)> {
    let first = first_visible(area, selected);
    (first..count).enumerate().find_map(|(slot, index)| {
        let bar = slider_bar(area, slot)?;
        let hit = row == bar.y && column >= bar.x && column < bar.right();
        hit.then(|| (index, slider::position_at(column - bar.x, bar.width)))
    })
}

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    if app.settings.is_empty() {
        let para = Paragraph::new(Span::styled("No settings configured.", theme::muted()));
        f.render_widget(para, area);
        return;
    }

    let first = first_visible(area, app.selected);
    for (slot, index) in (first..app.settings.len()).enumerate() {
        let Some(bar) = slider_bar(area, slot) else {
            break;
        };
        let setting = &app.settings[index];
        let snapshot = setting.snapshot();
        let is_selected = index == app.selected;
        let editing = is_selected && app.mode == Mode::EditText;
        let dragging = snapshot.dragging;

        let header = Rect::new(area.x, bar.y - 1, area.width, 1);
        f.render_widget(Paragraph::new(header_line(&snapshot, is_selected, editing)), header);

        let lower = Rect::new(area.x, bar.y, BOUND_WIDTH, 1);
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("{:>width$}", snapshot.slider_lower, width = usize::from(BOUND_WIDTH)),
                theme::muted(),
            )),
            lower,
        );
        f.render_widget(
            Slider::new(snapshot.slider_position)
                .focused(is_selected)
                .dragging(dragging),
            bar,
        );
        let upper = Rect::new(bar.right() + 1, bar.y, BOUND_WIDTH, 1);
        f.render_widget(
            Paragraph::new(Span::styled(snapshot.slider_upper.clone(), theme::muted())),
            upper,
        );

        if bar.y + 1 < area.bottom() {
            let details = Rect::new(bar.x, bar.y + 1, area.width - BOUND_WIDTH - 1, 1);
            f.render_widget(
                Paragraph::new(detail_line(&snapshot, &setting.external_text())),
                details,
            );
        }
    }
}

fn header_line(snapshot: &SettingSnapshot, is_selected: bool, editing: bool) -> Line<'static> {
    let name_style = if is_selected {
        theme::selected()
    } else {
        theme::text()
    };
    // Uncommitted text differs from the quantity's own text.
    let pending = snapshot.field_text != snapshot.value;
    let field_style = if editing {
        theme::accent_bold()
    } else if pending {
        theme::warning()
    } else {
        theme::text()
    };
    let cursor = if editing { "_" } else { " " };

    Line::from(vec![
        Span::styled(format!(" {:<NAME_WIDTH$}", snapshot.name), name_style),
        Span::styled(format!("{:<10}", snapshot.kind.label()), theme::muted()),
        Span::styled("[ ", theme::muted()),
        Span::styled(format!("{}{cursor}", snapshot.field_text), field_style),
        Span::styled(" ]", theme::muted()),
    ])
}

fn detail_line(snapshot: &SettingSnapshot, external: &str) -> Line<'static> {
    let mut spans = vec![
        Span::styled("step ", theme::muted()),
        Span::styled(snapshot.step_size.clone(), theme::neutral()),
        Span::styled(format!("  #{}", snapshot.step_number), theme::muted()),
        Span::styled(format!("  max {}", snapshot.maximum_range), theme::muted()),
        Span::styled("  ext ", theme::muted()),
        Span::styled(external.to_string(), theme::accent()),
    ];
    if !snapshot.snap_to_step {
        spans.push(Span::styled("  free", theme::neutral()));
    }
    if snapshot.dragging {
        spans.push(Span::styled("  DRAG", theme::warning()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(1, 1, 60, 10)
    }

    #[test]
    fn bars_follow_the_row_layout() {
        let bar = slider_bar(area(), 0).unwrap();
        assert_eq!(bar, Rect::new(14, 2, 34, 1));
        assert_eq!(slider_bar(area(), 1).unwrap().y, 6);
        assert_eq!(slider_bar(area(), 2).unwrap().y, 10);
        assert!(slider_bar(area(), 3).is_none());
    }

    #[test]
    fn narrow_area_has_no_bar() {
        assert!(slider_bar(Rect::new(0, 0, 20, 10), 0).is_none());
    }

    #[test]
    fn selection_scrolls_into_view() {
        // Height 10 fits two full settings.
        assert_eq!(first_visible(area(), 0), 0);
        assert_eq!(first_visible(area(), 1), 0);
        assert_eq!(first_visible(area(), 4), 3);
    }

    #[test]
    fn hit_test_maps_cells_to_positions() {
        let bar = slider_bar(area(), 1).unwrap();
        let (index, position) = hit_test(area(), 0, 5, bar.x, bar.y).unwrap();
        assert_eq!(index, 1);
        assert_eq!(position, 0.0);
        let (_, position) = hit_test(area(), 0, 5, bar.right() - 1, bar.y).unwrap();
        assert_eq!(position, 1.0);
        assert!(hit_test(area(), 0, 5, bar.x, bar.y + 1).is_none());
        assert!(hit_test(area(), 0, 1, bar.x, bar.y).is_none());
    }

    #[test]
    fn bar_of_scrolled_setting() {
        let bar = slider_bar_of(area(), 4, 4).unwrap();
        assert_eq!(bar.y, 6);
        assert!(slider_bar_of(area(), 4, 0).is_none());
    }
}
