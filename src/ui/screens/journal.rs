//! Journal: staggered grid of entry cards, with the add-entry dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::habits::render_add_action;
use super::{direction_for, is_activate, render_header, EmptyState, Selection};
use crate::action::Action;
use crate::model::JournalEntry;
use crate::ui::dialog::{AddDialog, DialogOutcome, DialogView};
use crate::ui::journal_card::JournalCard;
use crate::ui::layout::{render_scrolled, scroll_to_visible, step, Placement, StaggeredLayout};
use crate::ui::UiContext;

const HEADER_ROWS: u16 = 2;

#[derive(Debug, Default)]
pub struct JournalScreen {
    selection: Selection<u64>,
    offset: u16,
    dialog: Option<AddDialog>,
    /// Placements from the last render, for left/right navigation
    placements: Vec<Placement>,
}

impl JournalScreen {
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

    pub fn handle_key(&mut self, key: KeyEvent, entries: &[JournalEntry]) -> Option<Action> {
        if let Some(ref mut dialog) = self.dialog {
            return match dialog.handle_key(key) {
                DialogOutcome::Pending => None,
                DialogOutcome::Dismissed => {
                    tracing::debug!("Add-entry dialog dismissed");
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
            self.dialog = Some(AddDialog::entry());
            return None;
        }

        let ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
        let current = self.selection.resolve(&ids)?;

        if let Some(direction) = direction_for(&key) {
            let next = if self.placements.len() == ids.len() {
                StaggeredLayout::neighbor(&self.placements, current, direction)
            } else {
                step(current, ids.len(), direction)
            };
            self.selection.select(&ids, next);
            return None;
        }

        if is_activate(&key) {
            return Some(Action::OpenEntry(ids[current]));
        }

        None
    }

    pub fn render(
        &mut self,
        area: Rect,
        buf: &mut Buffer,
        ctx: UiContext<'_>,
        entries: &[JournalEntry],
    ) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let strings = ctx.strings;

        render_header(buf, area, &strings.journal, ctx);
        let grid_area = Rect {
            y: area.y + HEADER_ROWS.min(area.height),
            height: area.height.saturating_sub(HEADER_ROWS + 1),
            ..area
        };

        if entries.is_empty() {
            self.placements.clear();
            let empty =
                EmptyState::new(&strings.no_entries_yet, ctx).hint(&strings.start_writing);
            let height = empty.height().min(grid_area.height);
            empty.render(Rect { height, ..grid_area }, buf);
        } else {
            let layout = StaggeredLayout::new(ctx.display.journal_columns, 1);
            let lane_width = layout.lane_width(grid_area.width);
            let heights: Vec<u16> = entries
                .iter()
                .map(|e| JournalCard::height(e, lane_width, ctx.display.preview_lines))
                .collect();
            self.placements = layout.place(&heights);

            let ids: Vec<u64> = entries.iter().map(|e| e.id).collect();
            let selected = self.selection.resolve(&ids);
            if let Some(i) = selected {
                let p = self.placements[i];
                self.offset = scroll_to_visible(self.offset, p.top, p.height, grid_area.height);
            }

            let placements = &self.placements;
            render_scrolled(
                buf,
                grid_area,
                StaggeredLayout::content_height(placements),
                self.offset,
                |canvas, canvas_area| {
                    for (i, entry) in entries.iter().enumerate() {
                        let p = placements[i];
                        let rect = Rect::new(
                            layout.lane_x(p.lane, canvas_area.width),
                            p.top,
                            lane_width,
                            p.height,
                        );
                        JournalCard::new(entry, ctx)
                            .selected(selected == Some(i))
                            .render(rect, canvas);
                    }
                },
            );
        }

        render_add_action(buf, area, &strings.add_entry, ctx);

        if let Some(ref dialog) = self.dialog {
            DialogView::new(dialog, ctx).render(area, buf);
        }
    }
}
