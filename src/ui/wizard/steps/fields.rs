//! Stacked form fields with scrolling to the focused one

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Span,
    widgets::Paragraph,
    Frame,
};

use crate::ui::wizard::WizardView;

/// Blank row between fields
const FIELD_GAP: u16 = 1;

impl WizardView {
    pub(crate) fn render_fields(&mut self, frame: &mut Frame, area: Rect) {
        if self.fields.is_empty() || area.height == 0 {
            return;
        }

        let focus = self.focus.min(self.fields.len() - 1);
        let heights: Vec<u16> = self
            .fields
            .iter()
            .map(|f| f.render_height() + FIELD_GAP)
            .collect();
        let start = first_visible(&heights, focus, area.height);

        let mut y = area.y;
        let mut hidden_below = false;
        for (index, field) in self.fields.iter_mut().enumerate().skip(start) {
            let height = field.render_height();
            if area.bottom().saturating_sub(y) < height {
                hidden_below = true;
                break;
            }
            let rect = Rect {
                x: area.x,
                y,
                width: area.width,
                height,
            };
            field.render(frame, rect, index == focus);
            y += height + FIELD_GAP;
        }

        let marker_style = Style::default().fg(Color::DarkGray);
        let marker_width = 8.min(area.width);
        let marker_x = area.right().saturating_sub(marker_width);
        if start > 0 {
            frame.render_widget(
                Paragraph::new(Span::styled("▲ more", marker_style)),
                Rect::new(marker_x, area.y, marker_width, 1),
            );
        }
        if hidden_below {
            frame.render_widget(
                Paragraph::new(Span::styled("▼ more", marker_style)),
                Rect::new(marker_x, area.bottom() - 1, marker_width, 1),
            );
        }
    }
}

/// Index of the first field to draw so that `focus` fits in `available` rows
fn first_visible(heights: &[u16], focus: usize, available: u16) -> usize {
    let mut start = 0;
    while start < focus {
        let needed: u32 = heights[start..=focus].iter().map(|h| u32::from(*h)).sum();
        if needed <= u32::from(available) {
            break;
        }
        start += 1;
    }
    start
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_visible_keeps_focus_on_screen() {
        let heights = [7, 7, 7, 7];
        assert_eq!(first_visible(&heights, 0, 10), 0);
        assert_eq!(first_visible(&heights, 1, 20), 0);
        assert_eq!(first_visible(&heights, 3, 14), 2);
        // A field taller than the area still becomes the first one drawn
        assert_eq!(first_visible(&heights, 2, 3), 2);
    }
}
