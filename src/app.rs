use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect};

use crate::action::Action;
use crate::config::{Config, Strings};
use crate::model::{JournalEntry, Snapshot};
use crate::store::{self, Store, StoreError};
use crate::ui::screens::{HabitsScreen, HomeScreen, JournalScreen, SettingsScreen};
use crate::ui::{Theme, UiContext};

/// Top-level tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Home,
    Habits,
    Journal,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Habits, Tab::Journal, Tab::Settings];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `1`..`4`
    fn from_digit(c: char) -> Option<Self> {
        let index = c.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }
}

/// Application state
pub struct App {
    config: Config,
    store: Store,
    /// What the screens render; rebuilt after every applied action
    snapshot: Snapshot,
    dark_theme: Theme,
    light_theme: Theme,
    tab: Tab,
    home: HomeScreen,
    habits: HabitsScreen,
    journal: JournalScreen,
    settings: SettingsScreen,
    /// Entry shown in the detail popup
    viewing: Option<u64>,
    /// Transient message replacing the key hints
    status: Option<String>,
    should_quit: bool,
    today: NaiveDate,
}

/// Build a view context from the app's parts without borrowing the screens
fn context<'a>(config: &'a Config, theme: &'a Theme, today: NaiveDate) -> UiContext<'a> {
    UiContext {
        theme,
        strings: &config.strings,
        display: &config.display,
        today,
    }
}

/// Status text for a mutation the store refused
fn rejection_message(strings: &Strings, error: &StoreError) -> String {
    match error {
        StoreError::UnknownHabit(_) => strings.unknown_habit.clone(),
        StoreError::EmptyField(_) => strings.blank_field.clone(),
        _ => strings.save_failed.clone(),
    }
}

impl App {
    pub fn new(config: Config, store: Store) -> Result<Self> {
        let dark_theme = config.resolve_theme(true)?;
        let light_theme = config.resolve_theme(false)?;
        let today = store::today();
        let snapshot = store.snapshot(today);

        Ok(Self {
            config,
            store,
            snapshot,
            dark_theme,
            light_theme,
            tab: Tab::default(),
            home: HomeScreen::new(),
            habits: HabitsScreen::new(),
            journal: JournalScreen::new(),
            settings: SettingsScreen::new(),
            viewing: None,
            status: None,
            should_quit: false,
            today,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Entry open in the detail popup, if it still exists
    pub fn viewing_entry(&self) -> Option<&JournalEntry> {
        self.viewing.and_then(|id| self.snapshot.entry(id))
    }

    /// Whether an add dialog is open on the active tab
    pub fn has_dialog(&self) -> bool {
        match self.tab {
            Tab::Habits => self.habits.has_dialog(),
            Tab::Journal => self.journal.has_dialog(),
            Tab::Home | Tab::Settings => false,
        }
    }

    /// Theme for the persisted dark/light choice
    pub fn theme(&self) -> &Theme {
        if self.snapshot.dark_theme {
            &self.dark_theme
        } else {
            &self.light_theme
        }
    }

    pub fn ui_context(&self) -> UiContext<'_> {
        context(&self.config, self.theme(), self.today)
    }

    /// Route a key press: popup, then dialog, then global keys, then the
    /// active screen. Returns the screen's request, if any.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        self.status = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return None;
        }

        if self.viewing.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                self.viewing = None;
            }
            return None;
        }

        if !self.has_dialog() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return None;
                }
                KeyCode::Tab => {
                    self.tab = self.tab.next();
                    return None;
                }
                KeyCode::BackTab => {
                    self.tab = self.tab.prev();
                    return None;
                }
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    if let Some(tab) = Tab::from_digit(c) {
                        self.tab = tab;
                    }
                    return None;
                }
                _ => {}
            }
        }

        let theme = if self.snapshot.dark_theme {
            &self.dark_theme
        } else {
            &self.light_theme
        };
        let ctx = context(&self.config, theme, self.today);
        let snapshot = &self.snapshot;

        match self.tab {
            Tab::Home => self.home.handle_key(key, ctx, &snapshot.habits, &snapshot.entries),
            Tab::Habits => self.habits.handle_key(key, &snapshot.habits),
            Tab::Journal => self.journal.handle_key(key, &snapshot.entries),
            Tab::Settings => self.settings.handle_key(key, snapshot.dark_theme),
        }
    }

    /// Apply a screen request to the store, save, and rebuild the snapshot
    pub async fn apply(&mut self, action: Action) {
        let kind = action.kind();
        tracing::debug!("Applying {} (mutation: {})", kind, action.is_mutation());

        let strings = &self.config.strings;
        let result = match action {
            Action::OpenEntry(id) => {
                if self.snapshot.entry(id).is_some() {
                    self.viewing = Some(id);
                } else {
                    tracing::debug!("Ignoring request to open unknown entry {}", id);
                }
                return;
            }
            Action::ToggleHabit(id) => self
                .store
                .toggle_habit(id, self.today)
                .map(|_| strings.habit_updated.clone()),
            Action::AddHabit { name, description } => self
                .store
                .add_habit(&name, &description)
                .map(|_| strings.habit_added.clone()),
            Action::AddEntry { title, content } => self
                .store
                .add_entry(&title, &content)
                .map(|_| strings.entry_added.clone()),
            Action::SetDarkTheme(dark) => {
                self.store.set_dark_theme(dark);
                Ok(strings.theme_updated.clone())
            }
        };

        let message = match result {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!("Rejected {}: {}", kind, e);
                self.status = Some(rejection_message(&self.config.strings, &e));
                return;
            }
        };

        self.status = match self.store.save().await {
            Ok(()) => Some(message),
            Err(e) => {
                tracing::error!("Failed to save data: {}", e);
                Some(self.config.strings.save_failed.clone())
            }
        };
        self.refresh();
    }

    /// Rebuild the snapshot, picking up a date change
    pub fn refresh(&mut self) {
        self.today = store::today();
        self.snapshot = self.store.snapshot(self.today);
    }

    /// Render the active tab's screen into `area`
    pub fn render_active(&mut self, area: Rect, buf: &mut Buffer) {
        let theme = if self.snapshot.dark_theme {
            &self.dark_theme
        } else {
            &self.light_theme
        };
        let ctx = context(&self.config, theme, self.today);
        let snapshot = &self.snapshot;

        match self.tab {
            Tab::Home => self
                .home
                .render(area, buf, ctx, &snapshot.habits, &snapshot.entries),
            Tab::Habits => self.habits.render(area, buf, ctx, &snapshot.habits),
            Tab::Journal => self.journal.render(area, buf, ctx, &snapshot.entries),
            Tab::Settings => self.settings.render(area, buf, ctx, snapshot.dark_theme),
        }
    }
}
