use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ui::theme::{parse_hex_color, Theme};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub appearance: AppearanceConfig,
    pub display: DisplayConfig,
    pub data: DataConfig,
    pub strings: Strings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// Preset used while the dark theme is on
    pub dark_preset: String,
    /// Preset used while the dark theme is off
    pub light_preset: String,
    /// Accent override, hex (#rrggbb or #rgb)
    pub accent: Option<String>,
    /// Map colors onto the 256-color palette
    pub ansi256: bool,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            dark_preset: "darkwall".to_string(),
            light_preset: "catppuccin-latte".to_string(),
            accent: None,
            ansi256: false,
        }
    }
}

/// Presentation policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Journal entries shown on the home dashboard
    pub recent_entries: usize,
    /// Content lines shown on a journal card before the ellipsis
    pub preview_lines: usize,
    /// Lanes in the journal grid
    pub journal_columns: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            recent_entries: 3,
            preview_lines: 2,
            journal_columns: 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Data file; defaults to <data_dir>/habitflow/data.json
    pub path: Option<String>,
}

/// Every user-facing string, keyed by field name.
///
/// Templates use `{count}`, `{completed}` and `{total}` placeholders. Date
/// patterns use chrono strftime syntax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strings {
    pub app_title: String,
    pub tab_home: String,
    pub tab_habits: String,
    pub tab_journal: String,
    pub tab_settings: String,

    pub today: String,
    pub daily_progress: String,
    pub habits_completed: String,
    pub todays_habits: String,
    pub no_habits_message: String,
    pub recent_journal_entries: String,
    pub no_journal_entries_message: String,

    pub streak_format: String,
    pub completed: String,
    pub not_completed: String,

    pub all_habits: String,
    pub no_habits_yet: String,
    pub tap_to_create_habit: String,
    pub add_habit: String,
    pub add_new_habit: String,
    pub habit_name: String,
    pub description: String,

    pub journal: String,
    pub no_entries_yet: String,
    pub start_writing: String,
    pub add_entry: String,
    pub add_journal_entry: String,
    pub title: String,
    pub content: String,

    pub add: String,
    pub cancel: String,
    pub close: String,

    pub settings: String,
    pub appearance: String,
    pub dark_theme: String,
    pub enabled: String,
    pub disabled: String,
    pub preferences: String,
    pub notifications: String,
    pub notifications_desc: String,
    pub backup_restore: String,
    pub backup_restore_desc: String,
    pub privacy: String,
    pub privacy_desc: String,
    pub about: String,
    pub version: String,
    pub version_number: String,
    pub privacy_policy: String,
    pub privacy_policy_desc: String,
    pub terms_of_service: String,
    pub terms_desc: String,

    pub habit_added: String,
    pub entry_added: String,
    pub habit_updated: String,
    pub theme_updated: String,
    pub save_failed: String,
    pub unknown_habit: String,
    pub blank_field: String,

    /// Bottom-right add affordance, `{label}` is the screen's add label
    pub add_action: String,
    pub hint_home: String,
    pub hint_habits: String,
    pub hint_journal: String,
    pub hint_settings: String,
    pub hint_popup: String,
    pub hint_dialog: String,
    pub dialog_hint_habit: String,
    pub dialog_hint_entry: String,

    pub date_format: String,
    pub date_format_full: String,
}

impl Default for Strings {
    fn default() -> Self {
        fn s(v: &str) -> String {
            v.to_string()
        }

        Self {
            app_title: s("habitflow"),
            tab_home: s("Home"),
            tab_habits: s("Habits"),
            tab_journal: s("Journal"),
            tab_settings: s("Settings"),

            today: s("Today"),
            daily_progress: s("Daily Progress"),
            habits_completed: s("{completed}/{total} completed"),
            todays_habits: s("Today's Habits"),
            no_habits_message: s("No habits yet. Add one from the Habits tab."),
            recent_journal_entries: s("Recent Journal Entries"),
            no_journal_entries_message: s("No journal entries yet."),

            streak_format: s("streak: {count}"),
            completed: s("Completed"),
            not_completed: s("Not completed"),

            all_habits: s("All Habits"),
            no_habits_yet: s("No habits yet"),
            tap_to_create_habit: s("Press a to create your first habit"),
            add_habit: s("Add habit"),
            add_new_habit: s("Add New Habit"),
            habit_name: s("Habit name"),
            description: s("Description"),

            journal: s("Journal"),
            no_entries_yet: s("No entries yet"),
            start_writing: s("Press a to start writing"),
            add_entry: s("Add entry"),
            add_journal_entry: s("Add Journal Entry"),
            title: s("Title"),
            content: s("Content"),

            add: s("Add"),
            cancel: s("Cancel"),
            close: s("Close"),

            settings: s("Settings"),
            appearance: s("Appearance"),
            dark_theme: s("Dark theme"),
            enabled: s("Enabled"),
            disabled: s("Disabled"),
            preferences: s("Preferences"),
            notifications: s("Notifications"),
            notifications_desc: s("Daily reminders for your habits"),
            backup_restore: s("Backup & Restore"),
            backup_restore_desc: s("Your data lives in a single JSON file"),
            privacy: s("Privacy"),
            privacy_desc: s("Everything stays on this machine"),
            about: s("About"),
            version: s("Version"),
            version_number: s(env!("CARGO_PKG_VERSION")),
            privacy_policy: s("Privacy Policy"),
            privacy_policy_desc: s("No data is collected or sent anywhere"),
            terms_of_service: s("Terms of Service"),
            terms_desc: s("MIT licensed"),

            habit_added: s("Habit added"),
            entry_added: s("Entry saved"),
            habit_updated: s("Habit updated"),
            theme_updated: s("Theme updated"),
            save_failed: s("Could not save changes"),
            unknown_habit: s("That habit no longer exists"),
            blank_field: s("Required fields are blank"),

            add_action: s("+ {label} (a)"),
            hint_home: s("↑↓: nav | Enter: toggle/open | 1-4/Tab: switch | q: quit"),
            hint_habits: s("↑↓: nav | Enter: toggle | a: add | 1-4/Tab: switch | q: quit"),
            hint_journal: s("↑↓←→: nav | Enter: open | a: add | 1-4/Tab: switch | q: quit"),
            hint_settings: s("Enter: toggle theme | j/k: scroll | 1-4/Tab: switch | q: quit"),
            hint_popup: s("Esc/Enter: close | Ctrl+C: quit"),
            hint_dialog: s("Tab: next field | Ctrl+S: save | Esc: cancel"),
            dialog_hint_habit: s("Tab: next field · Enter/Ctrl+S: add · Esc: cancel"),
            dialog_hint_entry: s("Tab: next field · Ctrl+S: add · Esc: cancel"),

            date_format: s("%b %d, %Y"),
            date_format_full: s("%A, %B %d, %Y"),
        }
    }
}

impl Strings {
    /// "streak: 5"
    pub fn streak(&self, count: u32) -> String {
        self.streak_format.replace("{count}", &count.to_string())
    }

    /// "1/2 completed"
    pub fn progress(&self, completed: usize, total: usize) -> String {
        self.habits_completed
            .replace("{completed}", &completed.to_string())
            .replace("{total}", &total.to_string())
    }

    /// Accessible label for the completion indicator
    pub fn completion_label(&self, done: bool) -> &str {
        if done {
            &self.completed
        } else {
            &self.not_completed
        }
    }

    /// "+ Add habit (a)"
    pub fn add_action_label(&self, label: &str) -> String {
        self.add_action.replace("{label}", label)
    }

    /// Label under the theme switch
    pub fn enabled_label(&self, on: bool) -> &str {
        if on {
            &self.enabled
        } else {
            &self.disabled
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path);
        let path = Path::new(expanded.as_ref());

        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolve the theme for the current dark/light choice
    pub fn resolve_theme(&self, dark: bool) -> Result<Theme> {
        let (name, fallback) = if dark {
            (&self.appearance.dark_preset, Theme::darkwall as fn() -> Theme)
        } else {
            (&self.appearance.light_preset, Theme::catppuccin_latte as fn() -> Theme)
        };

        let mut theme = Theme::from_preset(name).unwrap_or_else(|| {
            tracing::warn!("Unknown theme preset '{}', using built-in default", name);
            fallback()
        });

        if let Some(ref accent) = self.appearance.accent {
            let color = parse_hex_color(accent)
                .with_context(|| format!("Invalid accent color '{}'", accent))?;
            theme = theme.with_primary(color);
        }

        if self.appearance.ansi256 {
            theme = theme.to_256_color();
        }

        Ok(theme)
    }

    /// Data file location, with `~` expanded
    pub fn data_path(&self) -> PathBuf {
        match self.data.path {
            Some(ref p) => PathBuf::from(shellexpand::tilde(p).as_ref()),
            None => dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("habitflow")
                .join("data.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.display.recent_entries, 3);
        assert_eq!(config.display.preview_lines, 2);
        assert_eq!(config.display.journal_columns, 2);
        assert_eq!(config.strings.streak(5), "streak: 5");
        assert_eq!(config.strings.progress(1, 2), "1/2 completed");
    }

    #[test]
    fn test_hint_strings_are_configurable() {
        let config: Config = toml::from_str(
            r##"
            [strings]
            add_action = "[{label}]"
            hint_home = "keys"
            "##,
        )
        .unwrap();

        assert_eq!(config.strings.add_action_label("New"), "[New]");
        assert_eq!(config.strings.hint_home, "keys");
        assert_eq!(config.strings.hint_popup, Strings::default().hint_popup);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r##"
            [display]
            recent_entries = 5

            [strings]
            streak_format = "{count} days"
            "##,
        )
        .unwrap();

        assert_eq!(config.display.recent_entries, 5);
        assert_eq!(config.display.preview_lines, 2);
        assert_eq!(config.strings.streak(3), "3 days");
        assert_eq!(config.strings.completed, "Completed");
        assert_eq!(config.appearance.dark_preset, "darkwall");
    }

    #[test]
    fn test_resolve_theme() {
        let mut config = Config::default();
        assert_eq!(config.resolve_theme(true).unwrap(), Theme::darkwall());
        assert_eq!(config.resolve_theme(false).unwrap(), Theme::catppuccin_latte());

        config.appearance.dark_preset = "nope".to_string();
        assert_eq!(config.resolve_theme(true).unwrap(), Theme::darkwall());

        config.appearance.accent = Some("#00ff00".to_string());
        assert_eq!(config.resolve_theme(true).unwrap().primary, Color::Rgb(0, 255, 0));

        config.appearance.accent = Some("zz".to_string());
        assert!(config.resolve_theme(true).is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/habitflow/config.toml").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[appearance]\nlight_preset = \"gruvbox-light\"\n").unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.appearance.light_preset, "gruvbox-light");
        assert_eq!(config.resolve_theme(false).unwrap(), Theme::gruvbox_light());
    }

    #[test]
    fn test_data_path_override() {
        let mut config = Config::default();
        config.data.path = Some("/tmp/habitflow.json".to_string());
        assert_eq!(config.data_path(), PathBuf::from("/tmp/habitflow.json"));
    }
}
