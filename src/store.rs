//! Habit and journal storage.
//!
//! Owns the records behind the display models, applies mutations requested
//! by the views and computes streaks. Everything lives in one JSON file.

use chrono::{Days, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::model::{Habit, JournalEntry, Snapshot};

const FILE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access data file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse data file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("unsupported data file version {0}")]
    UnsupportedVersion(u32),
    #[error("no habit with id {0}")]
    UnknownHabit(u64),
    #[error("{0} must not be blank")]
    EmptyField(&'static str),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Stored habit with its full completion history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Epoch milliseconds
    pub created_at: i64,
    #[serde(default)]
    pub completions: BTreeSet<NaiveDate>,
}

impl HabitRecord {
    /// Consecutive completed days ending today, or ending yesterday when
    /// today is still open
    pub fn streak(&self, today: NaiveDate) -> u32 {
        let mut day = if self.completions.contains(&today) {
            today
        } else {
            match today.checked_sub_days(Days::new(1)) {
                Some(d) => d,
                None => return 0,
            }
        };

        let mut count = 0;
        while self.completions.contains(&day) {
            count += 1;
            match day.checked_sub_days(Days::new(1)) {
                Some(prev) => day = prev,
                None => break,
            }
        }
        count
    }

    fn to_display(&self, today: NaiveDate) -> Habit {
        Habit {
            id: self.id,
            name: self.name.clone(),
            description: self.description.clone(),
            current_streak: self.streak(today),
            is_completed_today: self.completions.contains(&today),
        }
    }
}

/// Stored journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRecord {
    pub id: u64,
    pub title: String,
    pub content: String,
    /// Epoch milliseconds
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dark_theme: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { dark_theme: true }
    }
}

/// Data file format
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DataFile {
    version: u32,
    #[serde(default = "first_id")]
    next_id: u64,
    #[serde(default)]
    settings: Settings,
    #[serde(default)]
    habits: Vec<HabitRecord>,
    #[serde(default)]
    entries: Vec<EntryRecord>,
}

fn first_id() -> u64 {
    1
}

impl Default for DataFile {
    fn default() -> Self {
        Self {
            version: FILE_VERSION,
            next_id: first_id(),
            settings: Settings::default(),
            habits: Vec::new(),
            entries: Vec::new(),
        }
    }
}

/// Habit/journal store
pub struct Store {
    data: DataFile,
    /// None keeps everything in memory
    path: Option<PathBuf>,
}

impl Store {
    /// Store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            data: DataFile::default(),
            path: None,
        }
    }

    /// Open a file-backed store; a missing file starts empty
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let data = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let data: DataFile =
                    serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                if data.version > FILE_VERSION {
                    return Err(StoreError::UnsupportedVersion(data.version));
                }
                tracing::info!(
                    "Loaded {} habits and {} entries from {}",
                    data.habits.len(),
                    data.entries.len(),
                    path.display()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting fresh", path.display());
                DataFile::default()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let mut store = Self {
            data,
            path: Some(path),
        };
        store.repair_next_id();
        Ok(store)
    }

    /// Save to disk (no-op for in-memory stores)
    pub async fn save(&self) -> Result<()> {
        let Some(ref path) = self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let content = serde_json::to_string_pretty(&self.data)?;
        tokio::fs::write(path, content)
            .await
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            "Saved {} habits and {} entries",
            self.data.habits.len(),
            self.data.entries.len()
        );
        Ok(())
    }

    #[cfg(test)]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Build the display snapshot for `today`
    pub fn snapshot(&self, today: NaiveDate) -> Snapshot {
        let habits = self
            .data
            .habits
            .iter()
            .map(|h| h.to_display(today))
            .collect();

        let mut entries: Vec<JournalEntry> = self
            .data
            .entries
            .iter()
            .map(|e| JournalEntry {
                id: e.id,
                title: e.title.clone(),
                content: e.content.clone(),
                created_at: e.created_at,
            })
            .collect();
        // Most recent first; id breaks ties between entries from the same millisecond
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Snapshot {
            habits,
            entries,
            dark_theme: self.data.settings.dark_theme,
        }
    }

    /// Flip completion for `today`; returns the new state
    pub fn toggle_habit(&mut self, id: u64, today: NaiveDate) -> Result<bool> {
        let habit = self
            .data
            .habits
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or(StoreError::UnknownHabit(id))?;

        let done = if habit.completions.remove(&today) {
            false
        } else {
            habit.completions.insert(today);
            true
        };
        tracing::debug!("Habit {} completed today: {}", id, done);
        Ok(done)
    }

    pub fn add_habit(&mut self, name: &str, description: &str) -> Result<u64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyField("habit name"));
        }

        let id = self.allocate_id();
        self.data.habits.push(HabitRecord {
            id,
            name: name.to_string(),
            description: description.trim().to_string(),
            created_at: now_millis(),
            completions: BTreeSet::new(),
        });
        tracing::debug!("Added habit {} ({})", id, name);
        Ok(id)
    }

    pub fn add_entry(&mut self, title: &str, content: &str) -> Result<u64> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() {
            return Err(StoreError::EmptyField("entry title"));
        }
        if content.is_empty() {
            return Err(StoreError::EmptyField("entry content"));
        }

        let id = self.allocate_id();
        self.data.entries.push(EntryRecord {
            id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now_millis(),
        });
        tracing::debug!("Added journal entry {}", id);
        Ok(id)
    }

    pub fn set_dark_theme(&mut self, dark: bool) {
        self.data.settings.dark_theme = dark;
    }

    #[cfg(test)]
    pub fn dark_theme(&self) -> bool {
        self.data.settings.dark_theme
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.data.next_id;
        self.data.next_id += 1;
        id
    }

    /// Keep next_id above every stored id, in case the file was edited by hand
    fn repair_next_id(&mut self) {
        let max = self
            .data
            .habits
            .iter()
            .map(|h| h.id)
            .chain(self.data.entries.iter().map(|e| e.id))
            .max()
            .unwrap_or(0);
        if self.data.next_id <= max {
            tracing::warn!(
                "Data file next_id {} is stale, bumping to {}",
                self.data.next_id,
                max + 1
            );
            self.data.next_id = max + 1;
        }
    }
}

/// Today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
