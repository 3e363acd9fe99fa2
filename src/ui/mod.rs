//! UI module - handles all TUI rendering
//!
//! Structure:
//! - `draw.rs` - Frame composition (tabs, active screen, status bar, popups)
//! - `screens/` - Home, habits, journal and settings screens
//! - `habit_card.rs` / `journal_card.rs` - Card widgets
//! - `dialog.rs` - Add-item dialogs
//! - `layout.rs` - Stacks, staggered grid, scrolling
//! - `theme.rs` - Color themes and presets
//! - `text.rs` - Truncation and wrapping

mod draw;
pub mod dialog;
pub mod habit_card;
pub mod journal_card;
pub mod layout;
pub mod screens;
pub mod text;
pub mod theme;

use chrono::NaiveDate;

use crate::config::{DisplayConfig, Strings};

// Re-export main draw function
pub use draw::draw;

pub use theme::Theme;

/// Everything a view needs besides its data, passed down from the app root
#[derive(Debug, Clone, Copy)]
pub struct UiContext<'a> {
    pub theme: &'a Theme,
    pub strings: &'a Strings,
    pub display: &'a DisplayConfig,
    /// Date shown in the home header
    pub today: NaiveDate,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    /// Owned backing for a `UiContext` in tests
    pub struct TestContext {
        pub theme: Theme,
        pub strings: Strings,
        pub display: DisplayConfig,
        pub today: NaiveDate,
    }

    impl Default for TestContext {
        fn default() -> Self {
            Self {
                theme: Theme::default(),
                strings: Strings::default(),
                display: DisplayConfig::default(),
                today: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            }
        }
    }

    impl TestContext {
        pub fn ctx(&self) -> UiContext<'_> {
            UiContext {
                theme: &self.theme,
                strings: &self.strings,
                display: &self.display,
                today: self.today,
            }
        }
    }

    /// Buffer rows as strings
    pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
        let area = buf.area;
        (area.y..area.y + area.height)
            .map(|y| {
                (area.x..area.x + area.width)
                    .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
                    .collect()
            })
            .collect()
    }

    /// Whole buffer as newline-joined text
    pub fn buffer_text(buf: &Buffer) -> String {
        buffer_lines(buf).join("\n")
    }

    /// Position of the first cell where `needle` starts
    pub fn find(buf: &Buffer, needle: &str) -> Option<(u16, u16)> {
        let area = buf.area;
        let wanted: Vec<String> = needle.chars().map(|c| c.to_string()).collect();
        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let hit = wanted.iter().enumerate().all(|(i, s)| {
                    buf.cell((x + i as u16, y))
                        .map(|c| c.symbol() == s)
                        .unwrap_or(false)
                });
                if hit {
                    return Some((x, y));
                }
            }
        }
        None
    }

    /// Number of non-overlapping occurrences of `needle` in the buffer
    pub fn count(buf: &Buffer, needle: &str) -> usize {
        buffer_lines(buf)
            .iter()
            .map(|line| line.matches(needle).count())
            .sum()
    }
}
