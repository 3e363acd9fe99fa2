//! Requests emitted by the view layer.
//!
//! # Data Flow
//!
//! ```text
//!   Snapshot (store)
//!        │
//!        ▼
//!   screen render + key handling
//!        │
//!        ▼
//!   Action (this module)
//!        │
//!        ▼
//!   App::apply → Store mutation → next Snapshot
//! ```
//!
//! Screens never touch the store. Each discrete key press yields at most one
//! `Action`, and the app applies it before the next frame is drawn.

/// A mutation or navigation request from a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Flip today's completion for a habit
    ToggleHabit(u64),
    /// Create a habit; name is non-blank
    AddHabit { name: String, description: String },
    /// Create a journal entry; title and content are non-blank
    AddEntry { title: String, content: String },
    /// Show a journal entry in full
    OpenEntry(u64),
    /// Persist the theme choice
    SetDarkTheme(bool),
}

impl Action {
    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Action::ToggleHabit(_) => "toggle_habit",
            Action::AddHabit { .. } => "add_habit",
            Action::AddEntry { .. } => "add_entry",
            Action::OpenEntry(_) => "open_entry",
            Action::SetDarkTheme(_) => "set_dark_theme",
        }
    }

    /// Whether applying this action changes persisted data
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Action::OpenEntry(_))
    }
}
