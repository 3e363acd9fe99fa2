//! All habits, with the add-habit dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::{direction_for, is_activate, render_header, EmptyState, Selection};
use crate::action::Action;
use crate::model::Habit;
use crate::ui::dialog::{AddDialog, DialogOutcome, DialogView};
use crate::ui::habit_card::HabitCard;
use crate::ui::layout::{
    render_scrolled, scroll_to_visible, stack_height, stack_offsets, step, STACK_GAP,
};
use crate::ui::UiContext;

/// Rows above the list (title + gap)
const HEADER_ROWS: u16 = 2;

#[derive(Debug, Default)]
pub struct HabitsScreen {
    selection: Selection<u64>,
    offset: u16,
    dialog: Option<AddDialog>,
}

impl HabitsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn dialog(&self) -> Option<&AddDialog> {
        self.dialog.as_ref()
    }

    pub fn has_dialog(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent, habits: &[Habit]) -> Option<Action> {
        if let Some(ref mut dialog) = self.dialog {
            return match dialog.handle_key(key) {
                DialogOutcome::Pending => None,
                DialogOutcome::Dismissed => {
                    tracing::debug!("Add-habit dialog dismissed");
                    self.dialog = None;
                    None
                }
                DialogOutcome::Confirmed(action) => {
                    self.dialog = None;
                    Some(action)
                }
            };
        }

        if key.code == KeyCode::Char('a') {
            self.dialog = Some(AddDialog::habit());
            return None;
        }

        let ids: Vec<u64> = habits.iter().map(|h| h.id).collect();
        let current = self.selection.resolve(&ids)?;

        if let Some(direction) = direction_for(&key) {
            self.selection.select(&ids, step(current, ids.len(), direction));
            return None;
        }

        if is_activate(&key) {
            return Some(Action::ToggleHabit(ids[current]));
        }

        None
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: UiContext<'_>, habits: &[Habit]) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let strings = ctx.strings;

        render_header(buf, area, &strings.all_habits, ctx);
        let list_area = Rect {
            y: area.y + HEADER_ROWS.min(area.height),
            height: area.height.saturating_sub(HEADER_ROWS + 1),
            ..area
        };

        if habits.is_empty() {
            let empty =
                EmptyState::new(&strings.no_habits_yet, ctx).hint(&strings.tap_to_create_habit);
            let height = empty.height().min(list_area.height);
            empty.render(Rect { height, ..list_area }, buf);
        } else {
            let ids: Vec<u64> = habits.iter().map(|h| h.id).collect();
            let selected = self.selection.resolve(&ids);

            let heights: Vec<u16> = habits.iter().map(HabitCard::height).collect();
            let offsets = stack_offsets(&heights, STACK_GAP);
            if let Some(i) = selected {
                self.offset =
                    scroll_to_visible(self.offset, offsets[i], heights[i], list_area.height);
            }

            render_scrolled(
                buf,
                list_area,
                stack_height(&heights, STACK_GAP),
                self.offset,
                |canvas, canvas_area| {
                    for (i, habit) in habits.iter().enumerate() {
                        let rect = Rect::new(0, offsets[i], canvas_area.width, heights[i]);
                        HabitCard::new(habit, ctx)
                            .selected(selected == Some(i))
                            .render(rect, canvas);
                    }
                },
            );
        }

        render_add_action(buf, area, &strings.add_habit, ctx);

        if let Some(ref dialog) = self.dialog {
            DialogView::new(dialog, ctx).render(area, buf);
        }
    }
}

/// Bottom-right "add" affordance
pub(super) fn render_add_action(buf: &mut Buffer, area: Rect, label: &str, ctx: UiContext<'_>) {
    use ratatui::style::{Modifier, Style};
    use unicode_width::UnicodeWidthStr;

    if area.height == 0 {
        return;
    }
    let text = format!(" {} ", ctx.strings.add_action_label(label));
    let width = text.width() as u16;
    if width > area.width {
        return;
    }
    let style = Style::default()
        .fg(ctx.theme.on_primary_container)
        .bg(ctx.theme.primary_container)
        .add_modifier(Modifier::BOLD);
    buf.set_string(area.x + area.width - width, area.y + area.height - 1, text, style);
}
