//! Home dashboard: date header, daily progress, today's habits and the most
//! recent journal entries

use crossterm::event::KeyEvent;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Gauge, Widget},
};

use super::{
    direction_for, is_activate, render_header, render_section_title, EmptyState, Selection,
};
use crate::action::Action;
use crate::model::{recent_entries, DailyProgress, Habit, JournalEntry};
use crate::ui::habit_card::HabitCard;
use crate::ui::journal_card::JournalCard;
use crate::ui::layout::{
    render_scrolled, scroll_to_visible, stack_height, stack_offsets, step, STACK_GAP,
};
use crate::ui::text::truncate;
use crate::ui::UiContext;

/// Focusable things on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeItem {
    Habit(u64),
    Entry(u64),
}

/// Blocks stacked top to bottom
#[derive(Debug, Clone, Copy)]
enum HomeBlock {
    Header,
    Progress,
    HabitsTitle,
    Habit(usize),
    NoHabits,
    EntriesTitle,
    Entry(usize),
    NoEntries,
}

const HEADER_HEIGHT: u16 = 2;
const PROGRESS_HEIGHT: u16 = 5;

#[derive(Debug, Default)]
pub struct HomeScreen {
    selection: Selection<HomeItem>,
    offset: u16,
}

impl HomeScreen {
    pub fn new() -> Self {
        Self::default()
    }

    fn focusables(habits: &[Habit], recent: &[JournalEntry]) -> Vec<HomeItem> {
        habits
            .iter()
            .map(|h| HomeItem::Habit(h.id))
            .chain(recent.iter().map(|e| HomeItem::Entry(e.id)))
            .collect()
    }

    fn blocks(habits: &[Habit], recent: &[JournalEntry]) -> Vec<HomeBlock> {
        let mut blocks = vec![HomeBlock::Header, HomeBlock::Progress, HomeBlock::HabitsTitle];
        if habits.is_empty() {
            blocks.push(HomeBlock::NoHabits);
        } else {
            blocks.extend((0..habits.len()).map(HomeBlock::Habit));
        }
        blocks.push(HomeBlock::EntriesTitle);
        if recent.is_empty() {
            blocks.push(HomeBlock::NoEntries);
        } else {
            blocks.extend((0..recent.len()).map(HomeBlock::Entry));
        }
        blocks
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        ctx: UiContext<'_>,
        habits: &[Habit],
        entries: &[JournalEntry],
    ) -> Option<Action> {
        let recent = recent_entries(entries, ctx.display.recent_entries);
        let items = Self::focusables(habits, recent);
        let current = self.selection.resolve(&items)?;

        if let Some(direction) = direction_for(&key) {
            self.selection.select(&items, step(current, items.len(), direction));
            return None;
        }

        if is_activate(&key) {
            return match items[current] {
                HomeItem::Habit(id) => Some(Action::ToggleHabit(id)),
                HomeItem::Entry(id) => Some(Action::OpenEntry(id)),
            };
        }

        None
    }

    pub fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        ctx: UiContext<'_>,
        habits: &[Habit],
        entries: &[JournalEntry],
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let recent = recent_entries(entries, ctx.display.recent_entries);
        let items = Self::focusables(habits, recent);
        let selected = self.selection.resolve(&items).map(|i| items[i]);

        let strings = ctx.strings;
        let width = area.width;
        let blocks = Self::blocks(habits, recent);
        let no_habits = EmptyState::new(&strings.no_habits_message, ctx);
        let no_entries = EmptyState::new(&strings.no_journal_entries_message, ctx);

        let heights: Vec<u16> = blocks
            .iter()
            .map(|block| match *block {
                HomeBlock::Header => HEADER_HEIGHT,
                HomeBlock::Progress => PROGRESS_HEIGHT,
                HomeBlock::HabitsTitle | HomeBlock::EntriesTitle => 1,
                HomeBlock::Habit(i) => HabitCard::height(&habits[i]),
                HomeBlock::NoHabits => no_habits.height(),
                HomeBlock::Entry(i) => {
                    JournalCard::height(&recent[i], width, ctx.display.preview_lines)
                }
                HomeBlock::NoEntries => no_entries.height(),
            })
            .collect();
        let offsets = stack_offsets(&heights, STACK_GAP);
        let content_height = stack_height(&heights, STACK_GAP);

        // Keep the focused card in view
        let focused_block = blocks.iter().position(|block| match (*block, selected) {
            (HomeBlock::Habit(i), Some(HomeItem::Habit(id))) => habits[i].id == id,
            (HomeBlock::Entry(i), Some(HomeItem::Entry(id))) => recent[i].id == id,
            _ => false,
        });
        self.offset = match focused_block {
            Some(b) => scroll_to_visible(self.offset, offsets[b], heights[b], area.height),
            None => 0,
        };

        render_scrolled(buf, area, content_height, self.offset, |canvas, canvas_area| {
            for (b, block) in blocks.iter().enumerate() {
                let rect = Rect::new(0, offsets[b], canvas_area.width, heights[b]);
                match *block {
                    HomeBlock::Header => {
                        render_header(canvas, rect, &strings.today, ctx);
                        let date = ctx.today.format(&strings.date_format_full).to_string();
                        canvas.set_string(
                            0,
                            rect.y + 1,
                            truncate(&date, rect.width as usize),
                            ctx.theme.muted_on(ctx.theme.background),
                        );
                    }
                    HomeBlock::Progress => {
                        let progress = DailyProgress::from_habits(habits);
                        ProgressCard::new(progress, ctx).render(rect, canvas)
                    }
                    HomeBlock::HabitsTitle => {
                        render_section_title(canvas, rect, &strings.todays_habits, ctx)
                    }
                    HomeBlock::EntriesTitle => {
                        render_section_title(canvas, rect, &strings.recent_journal_entries, ctx)
                    }
                    HomeBlock::Habit(i) => {
                        let habit = &habits[i];
                        HabitCard::new(habit, ctx)
                            .selected(selected == Some(HomeItem::Habit(habit.id)))
                            .render(rect, canvas);
                    }
                    HomeBlock::Entry(i) => {
                        let entry = &recent[i];
                        JournalCard::new(entry, ctx)
                            .selected(selected == Some(HomeItem::Entry(entry.id)))
                            .render(rect, canvas);
                    }
                    HomeBlock::NoHabits => {
                        EmptyState::new(&strings.no_habits_message, ctx).render(rect, canvas)
                    }
                    HomeBlock::NoEntries => {
                        EmptyState::new(&strings.no_journal_entries_message, ctx)
                            .render(rect, canvas)
                    }
                }
            }
        });
    }
}

/// Daily progress summary: title, bounded gauge, "{completed}/{total}" text
struct ProgressCard<'a> {
    progress: DailyProgress,
    ctx: UiContext<'a>,
}

impl<'a> ProgressCard<'a> {
    fn new(progress: DailyProgress, ctx: UiContext<'a>) -> Self {
        Self { progress, ctx }
    }
}

impl Widget for ProgressCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let strings = self.ctx.strings;
        let bg = theme.primary_container;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.primary).bg(bg))
            .style(Style::default().bg(bg));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 3 || inner.height < 3 {
            return;
        }
        let x = inner.x + 1;
        let width = inner.width - 2;
        let text_style = Style::default().fg(theme.on_primary_container).bg(bg);

        buf.set_string(
            x,
            inner.y,
            truncate(&strings.daily_progress, width as usize),
            text_style.add_modifier(Modifier::BOLD),
        );

        Gauge::default()
            .ratio(self.progress.fraction())
            .label(format!("{}%", self.progress.percent()))
            .gauge_style(Style::default().fg(theme.primary).bg(theme.surface_variant))
            .render(Rect::new(x, inner.y + 1, width, 1), buf);

        let summary = strings.progress(self.progress.completed, self.progress.total);
        buf.set_string(x, inner.y + 2, truncate(&summary, width as usize), text_style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{entry, habit};
    use crate::ui::tests::{buffer_text, count, TestContext};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render(
        screen: &mut HomeScreen,
        tc: &TestContext,
        habits: &[Habit],
        entries: &[JournalEntry],
        height: u16,
    ) -> Buffer {
        let area = Rect::new(0, 0, 60, height);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf, tc.ctx(), habits, entries);
        buf
    }

    #[test]
    fn test_progress_scenario() {
        let tc = TestContext::default();
        let habits = vec![habit(1, "Run", 5, true), habit(2, "Read", 0, false)];
        let buf = render(&mut HomeScreen::new(), &tc, &habits, &[], 60);

        let text = buffer_text(&buf);
        assert!(text.contains("50%"));
        assert!(text.contains("1/2 completed"));
        assert!(text.contains("Run"));
        assert!(text.contains("Read"));
        assert_eq!(count(&buf, "●"), 1);
        assert_eq!(count(&buf, "○"), 1);

        // Completed card comes first
        let run = text.find("Run").unwrap();
        let read = text.find("Read").unwrap();
        assert!(run < read);
    }

    #[test]
    fn test_empty_lists_show_empty_states() {
        let tc = TestContext::default();
        let buf = render(&mut HomeScreen::new(), &tc, &[], &[], 40);

        let text = buffer_text(&buf);
        assert!(text.contains("0%"));
        assert!(text.contains("0/0 completed"));
        assert!(text.contains(&tc.strings.no_habits_message));
        assert!(text.contains(&tc.strings.no_journal_entries_message));
    }

    #[test]
    fn test_header_shows_today() {
        let tc = TestContext::default();
        let buf = render(&mut HomeScreen::new(), &tc, &[], &[], 40);
        assert!(buffer_text(&buf).contains("Sunday, March 10, 2024"));
    }

    #[test]
    fn test_recent_entries_truncated_to_limit() {
        let tc = TestContext::default();
        let entries: Vec<_> = (1..=5)
            .map(|i| entry(i, &format!("Entry{}", i), "text"))
            .collect();
        let buf = render(&mut HomeScreen::new(), &tc, &[], &entries, 80);

        let text = buffer_text(&buf);
        assert!(text.contains("Entry1"));
        assert!(text.contains("Entry2"));
        assert!(text.contains("Entry3"));
        assert!(!text.contains("Entry4"));
        assert!(!text.contains("Entry5"));
    }

    #[test]
    fn test_activate_toggles_then_opens_entry() {
        let tc = TestContext::default();
        let habits = vec![habit(1, "Run", 5, true)];
        let entries = vec![entry(9, "Day", "text")];
        let mut screen = HomeScreen::new();

        assert_eq!(
            screen.handle_key(key(KeyCode::Enter), tc.ctx(), &habits, &entries),
            Some(Action::ToggleHabit(1))
        );
        assert_eq!(screen.handle_key(key(KeyCode::Down), tc.ctx(), &habits, &entries), None);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char(' ')), tc.ctx(), &habits, &entries),
            Some(Action::OpenEntry(9))
        );
    }

    #[test]
    fn test_nothing_to_activate_when_empty() {
        let tc = TestContext::default();
        let mut screen = HomeScreen::new();
        assert_eq!(screen.handle_key(key(KeyCode::Enter), tc.ctx(), &[], &[]), None);
    }

    #[test]
    fn test_scrolls_to_focused_card() {
        let tc = TestContext::default();
        let habits: Vec<_> = (1..=10).map(|i| habit(i, &format!("Habit{}", i), 0, false)).collect();
        let mut screen = HomeScreen::new();
        for _ in 0..9 {
            screen.handle_key(key(KeyCode::Down), tc.ctx(), &habits, &[]);
        }

        let buf = render(&mut screen, &tc, &habits, &[], 20);
        let text = buffer_text(&buf);
        assert!(text.contains("Habit10"));
        assert!(!text.contains("Daily Progress"));
    }
}
