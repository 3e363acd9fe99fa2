//! Habit card widget
//!
//! Renders one habit as a bordered card with:
//! - Name (bold)
//! - Description (dimmed, only when non-empty)
//! - Streak label (accent)
//! - Completion indicator on the right, glyph plus label

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use super::text::truncate;
use super::UiContext;
use crate::model::Habit;

const DONE_GLYPH: &str = "●";
const OPEN_GLYPH: &str = "○";

/// Habit card widget
pub struct HabitCard<'a> {
    habit: &'a Habit,
    ctx: UiContext<'a>,
    selected: bool,
}

impl<'a> HabitCard<'a> {
    pub fn new(habit: &'a Habit, ctx: UiContext<'a>) -> Self {
        Self {
            habit,
            ctx,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Height of the card in lines, borders included
    pub fn height(habit: &Habit) -> u16 {
        let mut height = 2 + 1 + 1; // borders, name, streak
        if !habit.description.is_empty() {
            height += 1;
        }
        height
    }

    /// Glyph for the completion indicator
    pub fn indicator(done: bool) -> &'static str {
        if done {
            DONE_GLYPH
        } else {
            OPEN_GLYPH
        }
    }
}

impl Widget for HabitCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let theme = self.ctx.theme;
        let strings = self.ctx.strings;
        let bg = if self.selected { theme.selection_bg } else { theme.surface };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.card_border(self.selected).bg(bg))
            .style(Style::default().bg(bg));
        let inner = block.inner(area);
        block.render(area, buf);

        let padding_x = 1u16;
        let inner_width = inner.width.saturating_sub(padding_x * 2);
        if inner_width == 0 || inner.height == 0 {
            return;
        }

        let done = self.habit.is_completed_today;

        // Right column: glyph + accessible label, label dropped on narrow cards
        let label = strings.completion_label(done);
        let glyph = Self::indicator(done);
        let full = format!("{} {}", glyph, label);
        let indicator = if full.width() + 2 <= (inner_width as usize) / 2 {
            full
        } else {
            glyph.to_string()
        };
        let indicator_width = indicator.width() as u16;
        let indicator_style = if done {
            Style::default().fg(theme.primary).bg(bg).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dimmed).bg(bg)
        };
        let indicator_x = inner.x + padding_x + inner_width.saturating_sub(indicator_width);
        buf.set_string(indicator_x, inner.y, &indicator, indicator_style);

        let text_x = inner.x + padding_x;
        let text_width = inner_width.saturating_sub(indicator_width + 1) as usize;
        let max_y = inner.y + inner.height;
        let mut y = inner.y;

        // Line 1: Name (bold) - always rendered
        let name_style = Style::default()
            .fg(theme.foreground)
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        buf.set_string(text_x, y, truncate(&self.habit.name, text_width), name_style);
        y += 1;

        // Line 2: Description (optional)
        if !self.habit.description.is_empty() && y < max_y {
            buf.set_string(
                text_x,
                y,
                truncate(&self.habit.description, text_width),
                theme.muted_on(bg),
            );
            y += 1;
        }

        // Line 3: Streak
        if y < max_y {
            let streak = strings.streak(self.habit.current_streak);
            buf.set_string(
                text_x,
                y,
                truncate(&streak, text_width),
                Style::default().fg(theme.primary).bg(bg),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::habit;
    use crate::ui::tests::{buffer_text, TestContext};

    #[test]
    fn test_card_height() {
        let mut h = habit(1, "Run", 0, false);
        assert_eq!(HabitCard::height(&h), 4);
        h.description = "5k".to_string();
        assert_eq!(HabitCard::height(&h), 5);
    }

    #[test]
    fn test_renders_name_streak_and_state() {
        let tc = TestContext::default();
        let h = habit(1, "Run", 5, true);
        let area = Rect::new(0, 0, 40, HabitCard::height(&h));
        let mut buf = Buffer::empty(area);

        HabitCard::new(&h, tc.ctx()).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Run"));
        assert!(text.contains("streak: 5"));
        assert!(text.contains("● Completed"));
        assert!(!text.contains("○"));
    }

    #[test]
    fn test_not_completed_indicator() {
        let tc = TestContext::default();
        let h = habit(2, "Read", 0, false);
        let area = Rect::new(0, 0, 40, HabitCard::height(&h));
        let mut buf = Buffer::empty(area);

        HabitCard::new(&h, tc.ctx()).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("○ Not completed"));
        assert!(text.contains("streak: 0"));
    }

    #[test]
    fn test_description_only_when_present() {
        let tc = TestContext::default();
        let mut h = habit(1, "Run", 1, false);
        h.description = "Morning 5k".to_string();
        let area = Rect::new(0, 0, 40, HabitCard::height(&h));
        let mut buf = Buffer::empty(area);

        HabitCard::new(&h, tc.ctx()).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("Morning 5k"));
    }

    #[test]
    fn test_narrow_card_keeps_glyph() {
        let tc = TestContext::default();
        let h = habit(1, "Run", 1, true);
        let area = Rect::new(0, 0, 14, HabitCard::height(&h));
        let mut buf = Buffer::empty(area);

        HabitCard::new(&h, tc.ctx()).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("●"));
        assert!(!text.contains("Completed"));
    }
}
