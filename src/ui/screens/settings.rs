//! Settings: theme toggle plus static preference and about rows

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};

use super::{is_activate, render_header, render_section_title};
use crate::action::Action;
use crate::ui::layout::{clamp_offset, render_scrolled, stack_height, stack_offsets, STACK_GAP};
use crate::ui::text::truncate;
use crate::ui::UiContext;

const HEADER_ROWS: u16 = 2;
/// Bordered card with two text lines
const TOGGLE_CARD_HEIGHT: u16 = 4;

/// Switch glyph for the theme toggle
pub fn switch_glyph(on: bool) -> &'static str {
    if on {
        "[━━●]"
    } else {
        "[○━━]"
    }
}

/// Height of a bordered card holding `rows` two-line rows with dividers
fn rows_card_height(rows: usize) -> u16 {
    let rows = rows as u16;
    2 + rows * 2 + rows.saturating_sub(1)
}

#[derive(Debug, Default)]
pub struct SettingsScreen {
    offset: u16,
}

impl SettingsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// The toggle row is the only focusable element, so activation always
    /// targets it.
    pub fn handle_key(&mut self, key: KeyEvent, is_dark: bool) -> Option<Action> {
        if is_activate(&key) {
            return Some(Action::SetDarkTheme(!is_dark));
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.offset = self.offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.offset = self.offset.saturating_add(1),
            KeyCode::Home | KeyCode::Char('g') => self.offset = 0,
            _ => {}
        }
        None
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, ctx: UiContext<'_>, is_dark: bool) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let strings = ctx.strings;

        render_header(buf, area, &strings.settings, ctx);
        let body = Rect {
            y: area.y + HEADER_ROWS.min(area.height),
            height: area.height.saturating_sub(HEADER_ROWS),
            ..area
        };

        let preferences = [
            (strings.notifications.as_str(), strings.notifications_desc.as_str()),
            (strings.backup_restore.as_str(), strings.backup_restore_desc.as_str()),
            (strings.privacy.as_str(), strings.privacy_desc.as_str()),
        ];
        let about = [
            (strings.version.as_str(), strings.version_number.as_str()),
            (strings.privacy_policy.as_str(), strings.privacy_policy_desc.as_str()),
            (strings.terms_of_service.as_str(), strings.terms_desc.as_str()),
        ];

        // Each section is a title row followed by its card
        let heights = [
            1 + TOGGLE_CARD_HEIGHT,
            1 + rows_card_height(preferences.len()),
            1 + rows_card_height(about.len()),
        ];
        let offsets = stack_offsets(&heights, STACK_GAP);
        let content_height = stack_height(&heights, STACK_GAP);
        self.offset = clamp_offset(self.offset, content_height, body.height);

        render_scrolled(buf, body, content_height, self.offset, |canvas, canvas_area| {
            let section = |i: usize| Rect::new(0, offsets[i], canvas_area.width, heights[i]);

            let appearance = section(0);
            render_section_title(canvas, appearance, &strings.appearance, ctx);
            render_toggle_card(
                canvas,
                Rect {
                    y: appearance.y + 1,
                    height: TOGGLE_CARD_HEIGHT,
                    ..appearance
                },
                is_dark,
                ctx,
            );

            let sections = [
                (1, &strings.preferences, &preferences),
                (2, &strings.about, &about),
            ];
            for (i, title, rows) in sections {
                let rect = section(i);
                render_section_title(canvas, rect, title, ctx);
                render_rows_card(
                    canvas,
                    Rect {
                        y: rect.y + 1,
                        height: rect.height - 1,
                        ..rect
                    },
                    rows,
                    ctx,
                );
            }
        });
    }
}

fn card_block(ctx: UiContext<'_>, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(ctx.theme.card_border(focused).bg(ctx.theme.surface))
        .style(Style::default().bg(ctx.theme.surface))
}

fn render_toggle_card(buf: &mut Buffer, area: Rect, is_dark: bool, ctx: UiContext<'_>) {
    let theme = ctx.theme;
    let strings = ctx.strings;
    let block = card_block(ctx, true);
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width < 3 || inner.height == 0 {
        return;
    }

    let glyph = switch_glyph(is_dark);
    let glyph_width = glyph.chars().count() as u16;
    let text_width = inner.width.saturating_sub(glyph_width + 3) as usize;

    buf.set_string(
        inner.x + 1,
        inner.y,
        truncate(&strings.dark_theme, text_width),
        Style::default()
            .fg(theme.foreground)
            .bg(theme.surface)
            .add_modifier(Modifier::BOLD),
    );
    if inner.height > 1 {
        buf.set_string(
            inner.x + 1,
            inner.y + 1,
            truncate(strings.enabled_label(is_dark), text_width),
            theme.muted_on(theme.surface),
        );
    }

    if inner.width > glyph_width + 1 {
        let color = if is_dark { theme.primary } else { theme.dimmed };
        buf.set_string(
            inner.x + inner.width - glyph_width - 1,
            inner.y,
            glyph,
            Style::default().fg(color).bg(theme.surface),
        );
    }
}

fn render_rows_card(buf: &mut Buffer, area: Rect, rows: &[(&str, &str)], ctx: UiContext<'_>) {
    let theme = ctx.theme;
    let block = card_block(ctx, false);
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width < 3 {
        return;
    }
    let width = (inner.width - 2) as usize;
    let title_style = Style::default().fg(theme.foreground).bg(theme.surface);
    let divider_style = Style::default().fg(theme.dimmed_alt).bg(theme.surface);

    let mut y = inner.y;
    let bottom = inner.y + inner.height;
    for (i, (title, desc)) in rows.iter().enumerate() {
        if i > 0 && y < bottom {
            buf.set_string(inner.x, y, "─".repeat(inner.width as usize), divider_style);
            y += 1;
        }
        if y < bottom {
            buf.set_string(inner.x + 1, y, truncate(title, width), title_style);
            y += 1;
        }
        if y < bottom {
            buf.set_string(inner.x + 1, y, truncate(desc, width), theme.muted_on(theme.surface));
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::tests::{buffer_lines, buffer_text, find, TestContext};
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn render(screen: &mut SettingsScreen, height: u16, is_dark: bool) -> Buffer {
        let tc = TestContext::default();
        let area = Rect::new(0, 0, 40, height);
        let mut buf = Buffer::empty(area);
        screen.render(area, &mut buf, tc.ctx(), is_dark);
        buf
    }

    #[test]
    fn test_toggle_emits_inverse_once() {
        let mut screen = SettingsScreen::new();
        let before = render(&mut screen, 40, false);
        assert!(buffer_text(&before).contains("Disabled"));

        assert_eq!(
            screen.handle_key(key(KeyCode::Enter), false),
            Some(Action::SetDarkTheme(true))
        );

        // No local copy: still off until the new value comes back
        let after = render(&mut screen, 40, false);
        assert!(buffer_text(&after).contains("Disabled"));
        assert!(!buffer_text(&after).contains("Enabled"));

        let updated = render(&mut screen, 40, true);
        assert!(buffer_text(&updated).contains("Enabled"));
        assert!(buffer_text(&updated).contains(switch_glyph(true)));
    }

    #[test]
    fn test_toggle_from_dark() {
        let mut screen = SettingsScreen::new();
        assert_eq!(
            screen.handle_key(key(KeyCode::Char(' ')), true),
            Some(Action::SetDarkTheme(false))
        );
    }

    #[test]
    fn test_static_sections() {
        let buf = render(&mut SettingsScreen::new(), 40, true);
        let text = buffer_text(&buf);
        let labels = [
            "Appearance",
            "Preferences",
            "About",
            "Notifications",
            "Backup & Restore",
            "Version",
        ];
        for label in labels {
            assert!(text.contains(label), "missing {label}");
        }
        assert!(text.contains(env!("CARGO_PKG_VERSION")));
        // Dividers between the three rows of each card
        let dividers = buffer_lines(&buf).iter().filter(|l| l.starts_with("│─")).count();
        assert_eq!(dividers, 4);
    }

    #[test]
    fn test_scroll_clamps_at_bottom() {
        let mut screen = SettingsScreen::new();
        for _ in 0..100 {
            assert_eq!(screen.handle_key(key(KeyCode::Char('j')), true), None);
        }
        let buf = render(&mut screen, 12, true);
        assert!(find(&buf, "Terms of Service").is_some());
        assert!(find(&buf, "Dark theme").is_none());

        screen.handle_key(key(KeyCode::Char('g')), true);
        let buf = render(&mut screen, 12, true);
        assert!(find(&buf, "Dark theme").is_some());
    }
}
