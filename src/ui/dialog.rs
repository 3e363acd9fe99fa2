//! Add-item dialogs
//!
//! A dialog is a small form drawn as a centered popup. It owns its field
//! text for as long as it is open; the owning screen keeps it in an
//! `Option` and drops it on close, so reopening always starts empty.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::layout::centered_rect;
use super::text::is_blank;
use super::UiContext;
use crate::action::Action;

/// Rows of text shown for a multi-line field
const MULTILINE_ROWS: u16 = 4;

/// One editable text field
#[derive(Debug, Clone, Default)]
pub struct TextField {
    value: String,
    multiline: bool,
}

impl TextField {
    pub fn single_line() -> Self {
        Self::default()
    }

    pub fn multi_line() -> Self {
        Self {
            value: String::new(),
            multiline: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn push(&mut self, c: char) {
        if c == '\n' && !self.multiline {
            return;
        }
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    /// Rows the field occupies inside its border
    fn rows(&self) -> u16 {
        if self.multiline {
            MULTILINE_ROWS
        } else {
            1
        }
    }
}

/// Which item the dialog creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    /// Name (required) + description (optional)
    Habit,
    /// Title (required) + multi-line content (required)
    Entry,
}

/// Result of feeding a key to a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Still open
    Pending,
    /// Closed without creating anything
    Dismissed,
    /// Closed; the action carries the field values
    Confirmed(Action),
}

/// Add-habit / add-entry dialog state
#[derive(Debug, Clone)]
pub struct AddDialog {
    kind: DialogKind,
    fields: [TextField; 2],
    focus: usize,
}

impl AddDialog {
    pub fn habit() -> Self {
        Self {
            kind: DialogKind::Habit,
            fields: [TextField::single_line(), TextField::single_line()],
            focus: 0,
        }
    }

    pub fn entry() -> Self {
        Self {
            kind: DialogKind::Entry,
            fields: [TextField::single_line(), TextField::multi_line()],
            focus: 0,
        }
    }

    #[cfg(test)]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[cfg(test)]
    pub fn field(&self, index: usize) -> &TextField {
        &self.fields[index]
    }

    /// Confirm is only offered when the required fields are non-blank
    pub fn can_confirm(&self) -> bool {
        match self.kind {
            DialogKind::Habit => !is_blank(self.fields[0].value()),
            DialogKind::Entry => {
                !is_blank(self.fields[0].value()) && !is_blank(self.fields[1].value())
            }
        }
    }

    fn confirm(&self) -> DialogOutcome {
        if !self.can_confirm() {
            return DialogOutcome::Pending;
        }
        let first = self.fields[0].value().to_string();
        let second = self.fields[1].value().to_string();
        let action = match self.kind {
            DialogKind::Habit => Action::AddHabit {
                name: first,
                description: second,
            },
            DialogKind::Entry => Action::AddEntry {
                title: first,
                content: second,
            },
        };
        DialogOutcome::Confirmed(action)
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Handle one key press
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => DialogOutcome::Dismissed,
            KeyCode::Char('s') if ctrl => self.confirm(),
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                DialogOutcome::Pending
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                DialogOutcome::Pending
            }
            KeyCode::Enter => {
                let field = &mut self.fields[self.focus];
                if field.is_multiline() {
                    field.push('\n');
                    DialogOutcome::Pending
                } else if self.focus + 1 < self.fields.len() {
                    self.focus_next();
                    DialogOutcome::Pending
                } else {
                    self.confirm()
                }
            }
            KeyCode::Backspace => {
                self.fields[self.focus].backspace();
                DialogOutcome::Pending
            }
            KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                self.fields[self.focus].push(c);
                DialogOutcome::Pending
            }
            _ => DialogOutcome::Pending,
        }
    }

    /// Popup area for this dialog inside `area`
    pub fn popup_area(&self, area: Rect) -> Rect {
        // border + per field (border + rows) + blank + buttons + hint
        let fields: u16 = self.fields.iter().map(|f| f.rows() + 2).sum();
        centered_rect(60, 40, 2 + fields + 1 + 1 + 1, area)
    }
}

/// Dialog renderer
pub struct DialogView<'a> {
    dialog: &'a AddDialog,
    ctx: UiContext<'a>,
}

impl<'a> DialogView<'a> {
    pub fn new(dialog: &'a AddDialog, ctx: UiContext<'a>) -> Self {
        Self { dialog, ctx }
    }
}

/// Tail of `s` that fits in `width` columns
fn tail_fit(s: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = s.len();
    for (i, c) in s.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = i;
    }
    &s[start..]
}

impl Widget for DialogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.ctx.theme;
        let strings = self.ctx.strings;
        let dialog = self.dialog;

        let popup = dialog.popup_area(area);
        Clear.render(popup, buf);

        let (title, labels) = match dialog.kind {
            DialogKind::Habit => (
                &strings.add_new_habit,
                [&strings.habit_name, &strings.description],
            ),
            DialogKind::Entry => (
                &strings.add_journal_entry,
                [&strings.title, &strings.content],
            ),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.primary))
            .title(format!(" {} ", title))
            .style(Style::default().bg(theme.surface).fg(theme.foreground));
        let inner = block.inner(popup);
        block.render(popup, buf);

        if inner.width < 4 || inner.height == 0 {
            return;
        }

        let max_y = inner.y + inner.height;
        let mut y = inner.y;

        for (index, field) in dialog.fields.iter().enumerate() {
            let focused = index == dialog.focus;
            let rows = field.rows();
            if y + rows + 2 > max_y {
                return;
            }
            let field_area = Rect::new(inner.x + 1, y, inner.width - 2, rows + 2);

            let field_block = Block::default()
                .borders(Borders::ALL)
                .border_style(theme.card_border(focused))
                .title(Span::styled(
                    format!(" {} ", labels[index]),
                    if focused {
                        Style::default().fg(theme.primary)
                    } else {
                        Style::default().fg(theme.dimmed)
                    },
                ));
            let text_area = field_block.inner(field_area);
            field_block.render(field_area, buf);

            // Leave one column for the cursor
            let width = text_area.width.saturating_sub(1) as usize;
            let lines: Vec<&str> = field.value().split('\n').collect();
            let skip = lines.len().saturating_sub(rows as usize);
            let text_style = Style::default().fg(theme.foreground).bg(theme.surface);
            let mut cursor = (text_area.x, text_area.y);
            for (row, line) in lines.iter().skip(skip).enumerate() {
                let shown = tail_fit(line, width);
                let line_y = text_area.y + row as u16;
                buf.set_string(text_area.x, line_y, shown, text_style);
                cursor = (text_area.x + shown.width() as u16, line_y);
            }

            if focused {
                if let Some(cell) = buf.cell_mut(cursor) {
                    cell.set_style(Style::default().add_modifier(Modifier::REVERSED));
                }
            }

            y += rows + 2;
        }

        // Buttons
        y += 1;
        if y < max_y {
            let enabled = dialog.can_confirm();
            let confirm_style = if enabled {
                Style::default()
                    .fg(theme.primary)
                    .bg(theme.surface)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
                    .fg(theme.dimmed_alt)
                    .bg(theme.surface)
                    .add_modifier(Modifier::DIM)
            };
            let buttons = Line::from(vec![
                Span::styled(format!("[ {} ]", strings.cancel), theme.muted_on(theme.surface)),
                Span::raw("  "),
                Span::styled(format!("[ {} ]", strings.add), confirm_style),
            ])
            .right_aligned();
            Paragraph::new(buttons).render(Rect::new(inner.x + 1, y, inner.width - 2, 1), buf);
            y += 1;
        }

        if y < max_y {
            let hint = match dialog.kind {
                DialogKind::Habit => &strings.dialog_hint_habit,
                DialogKind::Entry => &strings.dialog_hint_entry,
            };
            buf.set_string(
                inner.x + 1,
                y,
                super::text::truncate(hint, (inner.width - 2) as usize),
                Style::default().fg(theme.dimmed_alt).bg(theme.surface),
            );
        }
    }
}
