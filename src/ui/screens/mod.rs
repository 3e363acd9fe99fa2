//! Screens
//!
//! Each screen is a struct holding only view-local state (selection, scroll
//! offset, open dialog). Data comes in as slices on every call; requests go
//! out as [`Action`](crate::action::Action) values.

pub mod habits;
pub mod home;
pub mod journal;
pub mod settings;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::layout::Direction;
use super::text::truncate;
use super::UiContext;

pub use habits::HabitsScreen;
pub use home::HomeScreen;
pub use journal::JournalScreen;
pub use settings::SettingsScreen;

/// Selection tracked by entity key so it survives re-renders and reordering
#[derive(Debug, Clone)]
pub struct Selection<K> {
    key: Option<K>,
    /// Fallback when the selected key disappears
    last_index: usize,
}

impl<K> Default for Selection<K> {
    fn default() -> Self {
        Self {
            key: None,
            last_index: 0,
        }
    }
}

impl<K: Copy + PartialEq> Selection<K> {
    /// Current index in `keys`, re-anchoring when the key is gone
    pub fn resolve(&mut self, keys: &[K]) -> Option<usize> {
        if keys.is_empty() {
            self.key = None;
            return None;
        }
        if let Some(key) = self.key {
            if let Some(index) = keys.iter().position(|k| *k == key) {
                self.last_index = index;
                return Some(index);
            }
        }
        let index = self.last_index.min(keys.len() - 1);
        self.key = Some(keys[index]);
        self.last_index = index;
        Some(index)
    }

    pub fn select(&mut self, keys: &[K], index: usize) {
        if let Some(&key) = keys.get(index) {
            self.key = Some(key);
            self.last_index = index;
        }
    }

    #[cfg(test)]
    pub fn key(&self) -> Option<K> {
        self.key
    }
}

/// Arrow keys and vim keys mapped to a direction
pub fn direction_for(key: &KeyEvent) -> Option<Direction> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(Direction::Right),
        _ => None,
    }
}

/// Enter or Space on the focused item
pub fn is_activate(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

/// Screen title line
pub fn render_header(buf: &mut Buffer, area: Rect, title: &str, ctx: UiContext<'_>) {
    if area.height == 0 {
        return;
    }
    buf.set_string(
        area.x,
        area.y,
        truncate(title, area.width as usize),
        ctx.theme.header(),
    );
}

/// Section title between card groups
pub fn render_section_title(buf: &mut Buffer, area: Rect, title: &str, ctx: UiContext<'_>) {
    if area.height == 0 {
        return;
    }
    buf.set_string(
        area.x,
        area.y,
        truncate(title, area.width as usize),
        ctx.theme.section_title().add_modifier(Modifier::UNDERLINED),
    );
}

/// Placeholder card for an empty collection
pub struct EmptyState<'a> {
    title: &'a str,
    hint: Option<&'a str>,
    ctx: UiContext<'a>,
}

impl<'a> EmptyState<'a> {
    pub fn new(title: &'a str, ctx: UiContext<'a>) -> Self {
        Self {
            title,
            hint: None,
            ctx,
        }
    }

    pub fn hint(mut self, hint: &'a str) -> Self {
        self.hint = Some(hint);
        self
    }

    pub fn height(&self) -> u16 {
        2 + 1 + u16::from(self.hint.is_some())
    }
}

impl Widget for EmptyState<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let bg = theme.surface_variant;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.dimmed_alt).bg(bg))
            .style(Style::default().bg(bg));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 3 || inner.height == 0 {
            return;
        }
        let width = (inner.width - 2) as usize;
        let title_style = if self.hint.is_some() {
            theme.muted_on(bg).add_modifier(Modifier::BOLD)
        } else {
            theme.muted_on(bg)
        };
        buf.set_string(inner.x + 1, inner.y, truncate(self.title, width), title_style);

        if let Some(hint) = self.hint {
            if inner.height > 1 {
                buf.set_string(inner.x + 1, inner.y + 1, truncate(hint, width), theme.muted_on(bg));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_follows_key() {
        let mut sel = Selection::default();
        assert_eq!(sel.resolve(&[10u64, 20, 30]), Some(0));
        sel.select(&[10, 20, 30], 2);
        assert_eq!(sel.key(), Some(30));

        // Reordered input keeps the same entity selected
        assert_eq!(sel.resolve(&[30, 10, 20]), Some(0));
    }

    #[test]
    fn test_selection_falls_back_when_key_disappears() {
        let mut sel = Selection::default();
        sel.select(&[1u64, 2, 3], 2);
        assert_eq!(sel.resolve(&[1, 2]), Some(1));
        assert_eq!(sel.key(), Some(2));
        assert_eq!(sel.resolve(&[]), None);
        assert_eq!(sel.key(), None);
    }

    #[test]
    fn test_empty_state_height() {
        let tc = crate::ui::tests::TestContext::default();
        assert_eq!(EmptyState::new("x", tc.ctx()).height(), 3);
        assert_eq!(EmptyState::new("x", tc.ctx()).hint("y").height(), 4);
    }
}
