//! Frame composition
//!
//! Tab bar on top, the active screen in the middle, status bar at the
//! bottom, and the entry detail popup over everything when open.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, Tab};
use crate::model::JournalEntry;
use crate::ui::layout::{centered_rect, percent_of};
use crate::ui::text::wrap;
use crate::ui::theme::Theme;
use crate::ui::UiContext;

const POPUP_PERCENT: u16 = 70;
const POPUP_MIN_WIDTH: u16 = 40;

/// Main draw function
pub fn draw(f: &mut Frame, app: &mut App) {
    let theme = app.theme().clone();

    // Fill background with theme color
    let area = f.area();
    let bg_block =
        Block::default().style(Style::default().bg(theme.background).fg(theme.foreground));
    f.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + tabs + rule
            Constraint::Min(1),    // Active screen
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tabs(f, app, chunks[0], &theme);

    let screen_area = Rect {
        x: chunks[1].x + 1,
        width: chunks[1].width.saturating_sub(2),
        ..chunks[1]
    };
    app.render_active(screen_area, f.buffer_mut());

    draw_status_bar(f, app, chunks[2], &theme);

    if let Some(entry) = app.viewing_entry() {
        draw_entry_popup(f, entry, app.ui_context(), area);
    }
}

/// Draw the tab bar
fn draw_tabs(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let strings = &app.config().strings;
    let titles = Tab::ALL.iter().enumerate().map(|(i, tab)| {
        let label = match tab {
            Tab::Home => &strings.tab_home,
            Tab::Habits => &strings.tab_habits,
            Tab::Journal => &strings.tab_journal,
            Tab::Settings => &strings.tab_settings,
        };
        Line::from(format!("{} {}", i + 1, label))
    });

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.dimmed_alt))
                .title(Span::styled(
                    format!(" {} ", strings.app_title),
                    Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
                )),
        )
        .select(app.tab().index())
        .style(Style::default().fg(theme.dimmed).bg(theme.background))
        .highlight_style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│");

    f.render_widget(tabs, area);
}

/// Key hints for the current context
fn hints(app: &App) -> &str {
    let strings = &app.config().strings;
    if app.viewing_entry().is_some() {
        return &strings.hint_popup;
    }
    if app.has_dialog() {
        return &strings.hint_dialog;
    }
    match app.tab() {
        Tab::Home => &strings.hint_home,
        Tab::Habits => &strings.hint_habits,
        Tab::Journal => &strings.hint_journal,
        Tab::Settings => &strings.hint_settings,
    }
}

/// Draw the status bar: a transient message, else the key hints
fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let status = match app.status() {
        Some(message) => Paragraph::new(format!(" {}", message))
            .style(Style::default().fg(theme.primary).bg(theme.background)),
        None => Paragraph::new(format!(" {}", hints(app)))
            .style(Style::default().fg(theme.dimmed).bg(theme.background)),
    };
    f.render_widget(status, area);
}

/// Read-only popup with the full entry
fn draw_entry_popup(f: &mut Frame, entry: &JournalEntry, ctx: UiContext<'_>, area: Rect) {
    let theme = ctx.theme;
    let strings = ctx.strings;

    let width = percent_of(area.width, POPUP_PERCENT).max(POPUP_MIN_WIDTH).min(area.width);
    // Border + padding on each side
    let text_width = width.saturating_sub(4) as usize;
    let body = wrap(&entry.content, text_width);
    // Borders, date, blank, body, blank, close hint
    let height = (body.len() as u16).saturating_add(6);
    let popup = centered_rect(POPUP_PERCENT, POPUP_MIN_WIDTH, height, area);

    f.render_widget(Clear, popup);

    let mut lines = vec![
        Line::styled(
            entry.formatted_date(&strings.date_format_full),
            Style::default().fg(theme.dimmed),
        ),
        Line::default(),
    ];
    lines.extend(
        body.into_iter()
            .map(|l| Line::styled(l, Style::default().fg(theme.foreground))),
    );
    lines.push(Line::default());
    lines.push(Line::styled(
        format!("[ {} ]", strings.close),
        Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.primary))
        .title(Span::styled(
            format!(" {} ", entry.title),
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(theme.surface));

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::config::Config;
    use crate::store::Store;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn render_sized(app: &mut App, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        crate::ui::tests::buffer_lines(terminal.backend().buffer())
    }

    fn render(app: &mut App) -> String {
        render_sized(app, 80, 30).join("\n")
    }

    fn app() -> App {
        App::new(Config::default(), Store::in_memory()).unwrap()
    }

    #[test]
    fn test_tabs_and_hints() {
        let mut app = app();
        let text = render(&mut app);
        assert!(text.contains("1 Home"));
        assert!(text.contains("4 Settings"));
        assert!(text.contains("Daily Progress"));
        assert!(text.contains("q: quit"));
    }

    #[test]
    fn test_tab_row_sits_between_title_and_rule() {
        let mut app = app();
        let lines = render_sized(&mut app, 80, 30);
        assert!(lines[0].contains("habitflow"));
        assert!(lines[1].contains("1 Home"));
        assert!(lines[1].contains("2 Habits"));
        assert!(lines[1].contains("3 Journal"));
        assert!(lines[2].starts_with("──"));

        app.handle_key(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE));
        let lines = render_sized(&mut app, 80, 30);
        assert!(lines[1].contains("3 Journal"));
        assert!(lines[3].contains("Journal"));
    }

    #[tokio::test]
    async fn test_entry_popup_on_very_wide_terminal() {
        let mut app = app();
        app.apply(Action::AddEntry {
            title: "Wide".to_string(),
            content: "Plenty of room".to_string(),
        })
        .await;
        let id = app.snapshot().entries[0].id;
        app.apply(Action::OpenEntry(id)).await;

        let lines = render_sized(&mut app, 1000, 20);
        assert!(lines.iter().any(|l| l.contains("[ Close ]")));
    }

    #[tokio::test]
    async fn test_status_message_replaces_hints() {
        let mut app = app();
        app.apply(Action::AddHabit {
            name: "Run".to_string(),
            description: String::new(),
        })
        .await;
        let text = render(&mut app);
        assert!(text.contains("Habit added"));
        assert!(!text.contains("q: quit"));
    }

    #[tokio::test]
    async fn test_entry_popup_shows_content() {
        let mut app = app();
        app.apply(Action::AddEntry {
            title: "Morning".to_string(),
            content: "Slept well and went for a walk".to_string(),
        })
        .await;
        let id = app.snapshot().entries[0].id;
        app.apply(Action::OpenEntry(id)).await;

        let text = render(&mut app);
        assert!(text.contains("Slept well and went for a walk"));
        assert!(text.contains("[ Close ]"));

        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let text = render(&mut app);
        assert!(!text.contains("[ Close ]"));
    }
}
