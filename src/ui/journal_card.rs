//! Journal entry card widget
//!
//! Title, a content preview clamped to a configurable number of lines, and
//! the creation date. Height follows the content, so cards in the journal
//! grid differ in size.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::text::{truncate, wrap_clamped};
use super::UiContext;
use crate::model::JournalEntry;

/// Horizontal padding inside the border
const PADDING_X: u16 = 1;

/// Journal entry card widget
pub struct JournalCard<'a> {
    entry: &'a JournalEntry,
    ctx: UiContext<'a>,
    selected: bool,
}

impl<'a> JournalCard<'a> {
    pub fn new(entry: &'a JournalEntry, ctx: UiContext<'a>) -> Self {
        Self {
            entry,
            ctx,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Width available for text in a card of the given outer width
    fn text_width(outer_width: u16) -> usize {
        outer_width.saturating_sub(2 + PADDING_X * 2) as usize
    }

    /// Content preview lines for a card of the given outer width
    pub fn preview(entry: &JournalEntry, outer_width: u16, max_lines: usize) -> Vec<String> {
        wrap_clamped(&entry.content, Self::text_width(outer_width), max_lines)
    }

    /// Card height for the given outer width, borders included
    pub fn height(entry: &JournalEntry, outer_width: u16, max_lines: usize) -> u16 {
        let preview = Self::preview(entry, outer_width, max_lines).len() as u16;
        2 + 1 + preview + 1 // borders, title, content, date
    }
}

impl Widget for JournalCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let theme = self.ctx.theme;
        let bg = if self.selected { theme.selection_bg } else { theme.surface };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.card_border(self.selected).bg(bg))
            .style(Style::default().bg(bg));
        let inner = block.inner(area);
        block.render(area, buf);

        let text_width = Self::text_width(area.width);
        if text_width == 0 || inner.height == 0 {
            return;
        }

        let x = inner.x + PADDING_X;
        let max_y = inner.y + inner.height;
        let mut y = inner.y;

        let title_style = Style::default()
            .fg(theme.foreground)
            .bg(bg)
            .add_modifier(Modifier::BOLD);
        buf.set_string(x, y, truncate(&self.entry.title, text_width), title_style);
        y += 1;

        let preview = Self::preview(self.entry, area.width, self.ctx.display.preview_lines);
        for line in preview {
            if y >= max_y {
                return;
            }
            buf.set_string(x, y, line, theme.muted_on(bg));
            y += 1;
        }

        if y < max_y {
            let date = self.entry.formatted_date(&self.ctx.strings.date_format);
            buf.set_string(
                x,
                y,
                truncate(&date, text_width),
                Style::default().fg(theme.dimmed_alt).bg(bg),
            );
        }
    }
}
