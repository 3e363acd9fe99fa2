//! Display models handed to the view layer.
//!
//! These are read-only snapshots. The store builds them fresh for every
//! frame; screens and cards only ever borrow them.

use chrono::{DateTime, Local, TimeZone};

/// One habit as the views see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Habit {
    pub id: u64,
    pub name: String,
    /// Empty means "no description shown"
    pub description: String,
    /// Consecutive completed days, computed by the store
    pub current_streak: u32,
    pub is_completed_today: bool,
}

/// One journal entry as the views see it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Epoch milliseconds
    pub created_at: i64,
}

impl JournalEntry {
    /// Creation time in the local timezone
    pub fn created_local(&self) -> Option<DateTime<Local>> {
        Local.timestamp_millis_opt(self.created_at).single()
    }

    /// Creation date rendered with a strftime pattern
    pub fn formatted_date(&self, pattern: &str) -> String {
        self.created_local()
            .map(|dt| dt.format(pattern).to_string())
            .unwrap_or_default()
    }
}

/// Today's completion summary for the home dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyProgress {
    pub completed: usize,
    pub total: usize,
}

impl DailyProgress {
    pub fn from_habits(habits: &[Habit]) -> Self {
        Self {
            completed: habits.iter().filter(|h| h.is_completed_today).count(),
            total: habits.len(),
        }
    }

    /// Completed share in `0.0..=1.0`, zero when there are no habits
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }

    /// Rounded percentage for labels
    pub fn percent(&self) -> u16 {
        (self.fraction() * 100.0).round() as u16
    }
}

/// First `limit` entries in input order
pub fn recent_entries(entries: &[JournalEntry], limit: usize) -> &[JournalEntry] {
    &entries[..entries.len().min(limit)]
}

/// Everything a frame needs from the data layer
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub habits: Vec<Habit>,
    /// Most recent first
    pub entries: Vec<JournalEntry>,
    pub dark_theme: bool,
}

impl Snapshot {
    pub fn entry(&self, id: u64) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn habit(id: u64, name: &str, streak: u32, done: bool) -> Habit {
        Habit {
            id,
            name: name.to_string(),
            description: String::new(),
            current_streak: streak,
            is_completed_today: done,
        }
    }

    pub fn entry(id: u64, title: &str, content: &str) -> JournalEntry {
        JournalEntry {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: 1_700_000_000_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_progress_empty_is_zero() {
        let progress = DailyProgress::from_habits(&[]);
        assert_eq!(progress.total, 0);
        assert_eq!(progress.fraction(), 0.0);
        assert_eq!(progress.percent(), 0);
    }

    #[test]
    fn test_progress_half() {
        let habits = vec![habit(1, "Run", 5, true), habit(2, "Read", 0, false)];
        let progress = DailyProgress::from_habits(&habits);
        assert_eq!(progress, DailyProgress { completed: 1, total: 2 });
        assert!((progress.fraction() - 0.5).abs() < f64::EPSILON);
        assert_eq!(progress.percent(), 50);
    }

    #[test]
    fn test_progress_thirds() {
        let habits = vec![
            habit(1, "a", 0, true),
            habit(2, "b", 0, false),
            habit(3, "c", 0, false),
        ];
        let progress = DailyProgress::from_habits(&habits);
        assert!((progress.fraction() - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(progress.percent(), 33);
    }

    #[test]
    fn test_recent_entries_limit() {
        let entries: Vec<_> = (1..=5).map(|i| entry(i, "t", "c")).collect();
        let recent = recent_entries(&entries, 3);
        assert_eq!(recent.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        assert_eq!(recent_entries(&entries[..2], 3).len(), 2);
        assert!(recent_entries(&[], 3).is_empty());
    }

    #[test]
    fn test_formatted_date() {
        let e = entry(1, "t", "c");
        let formatted = e.formatted_date("%Y");
        assert_eq!(formatted, "2023");
    }
}
