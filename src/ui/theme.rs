//! Theme system for habitflow
//!
//! Provides:
//! - Theme struct with the color roles cards and screens draw with
//! - Built-in dark and light presets
//! - Hex color parsing for accent overrides
//! - 256-color fallback

use ratatui::style::{Color, Modifier, Style};
use thiserror::Error;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Main background color
    pub background: Color,
    /// Card background
    pub surface: Color,
    /// Background for empty-state and secondary cards
    pub surface_variant: Color,
    /// Primary text color
    pub foreground: Color,
    /// Secondary text (descriptions, dates, hints)
    pub dimmed: Color,
    /// Tertiary text and idle borders
    pub dimmed_alt: Color,
    /// Accent color (streaks, completion, focused borders)
    pub primary: Color,
    /// Background of the progress card
    pub primary_container: Color,
    /// Text on the progress card
    pub on_primary_container: Color,
    /// Background for the focused card
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::darkwall()
    }
}

impl Theme {
    /// Darkwall theme - default dark
    pub fn darkwall() -> Self {
        Self {
            background: Color::Rgb(13, 17, 22),           // #0d1116
            surface: Color::Rgb(17, 23, 31),              // #11171f
            surface_variant: Color::Rgb(24, 32, 44),      // #18202c
            foreground: Color::Rgb(229, 234, 241),        // #e5eaf1
            dimmed: Color::Rgb(156, 163, 175),            // #9ca3af
            dimmed_alt: Color::Rgb(107, 114, 128),        // #6b7280
            primary: Color::Rgb(180, 83, 9),              // #b45309 (amber)
            primary_container: Color::Rgb(46, 28, 12),    // #2e1c0c
            on_primary_container: Color::Rgb(253, 230, 138), // #fde68a
            selection_bg: Color::Rgb(20, 28, 42),         // #141c2a
        }
    }

    /// Catppuccin Mocha theme
    pub fn catppuccin_mocha() -> Self {
        Self {
            background: Color::Rgb(30, 30, 46),           // #1e1e2e (base)
            surface: Color::Rgb(24, 24, 37),              // #181825 (mantle)
            surface_variant: Color::Rgb(49, 50, 68),      // #313244 (surface0)
            foreground: Color::Rgb(205, 214, 244),        // #cdd6f4 (text)
            dimmed: Color::Rgb(166, 173, 200),            // #a6adc8 (subtext0)
            dimmed_alt: Color::Rgb(147, 153, 178),        // #9399b2 (overlay2)
            primary: Color::Rgb(137, 180, 250),           // #89b4fa (blue)
            primary_container: Color::Rgb(69, 71, 90),    // #45475a (surface1)
            on_primary_container: Color::Rgb(180, 190, 254), // #b4befe (lavender)
            selection_bg: Color::Rgb(49, 50, 68),         // #313244 (surface0)
        }
    }

    /// Catppuccin Latte theme (light)
    pub fn catppuccin_latte() -> Self {
        Self {
            background: Color::Rgb(239, 241, 245),        // #eff1f5 (base)
            surface: Color::Rgb(230, 233, 239),           // #e6e9ef (mantle)
            surface_variant: Color::Rgb(204, 208, 218),   // #ccd0da (surface0)
            foreground: Color::Rgb(76, 79, 105),          // #4c4f69 (text)
            dimmed: Color::Rgb(108, 111, 133),            // #6c6f85 (subtext0)
            dimmed_alt: Color::Rgb(140, 143, 161),        // #8c8fa1 (overlay2)
            primary: Color::Rgb(30, 102, 245),            // #1e66f5 (blue)
            primary_container: Color::Rgb(188, 192, 204), // #bcc0cc (surface1)
            on_primary_container: Color::Rgb(32, 159, 181), // #209fb5 (sapphire)
            selection_bg: Color::Rgb(220, 224, 232),      // #dce0e8 (crust)
        }
    }

    /// Nord theme
    pub fn nord() -> Self {
        Self {
            background: Color::Rgb(46, 52, 64),           // #2e3440 (nord0)
            surface: Color::Rgb(59, 66, 82),              // #3b4252 (nord1)
            surface_variant: Color::Rgb(67, 76, 94),      // #434c5e (nord2)
            foreground: Color::Rgb(236, 239, 244),        // #eceff4 (nord6)
            dimmed: Color::Rgb(216, 222, 233),            // #d8dee9 (nord4)
            dimmed_alt: Color::Rgb(76, 86, 106),          // #4c566a (nord3)
            primary: Color::Rgb(136, 192, 208),           // #88c0d0 (nord8)
            primary_container: Color::Rgb(67, 76, 94),    // #434c5e (nord2)
            on_primary_container: Color::Rgb(143, 188, 187), // #8fbcbb (nord7)
            selection_bg: Color::Rgb(67, 76, 94),         // #434c5e (nord2)
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            background: Color::Rgb(40, 40, 40),           // #282828 (bg)
            surface: Color::Rgb(50, 48, 47),              // #32302f (bg0_s)
            surface_variant: Color::Rgb(60, 56, 54),      // #3c3836 (bg1)
            foreground: Color::Rgb(235, 219, 178),        // #ebdbb2 (fg)
            dimmed: Color::Rgb(168, 153, 132),            // #a89984 (gray)
            dimmed_alt: Color::Rgb(146, 131, 116),        // #928374 (gray)
            primary: Color::Rgb(215, 153, 33),            // #d79921 (yellow)
            primary_container: Color::Rgb(80, 73, 69),    // #504945 (bg2)
            on_primary_container: Color::Rgb(250, 189, 47), // #fabd2f (bright yellow)
            selection_bg: Color::Rgb(60, 56, 54),         // #3c3836 (bg1)
        }
    }

    /// Gruvbox light theme
    pub fn gruvbox_light() -> Self {
        Self {
            background: Color::Rgb(251, 241, 199),        // #fbf1c7 (bg)
            surface: Color::Rgb(242, 229, 188),           // #f2e5bc (bg0_s)
            surface_variant: Color::Rgb(235, 219, 178),   // #ebdbb2 (bg1)
            foreground: Color::Rgb(60, 56, 54),           // #3c3836 (fg)
            dimmed: Color::Rgb(124, 111, 100),            // #7c6f64 (fg4)
            dimmed_alt: Color::Rgb(146, 131, 116),        // #928374 (gray)
            primary: Color::Rgb(175, 58, 3),              // #af3a03 (orange)
            primary_container: Color::Rgb(213, 196, 161), // #d5c4a1 (bg2)
            on_primary_container: Color::Rgb(121, 116, 14), // #79740e (green)
            selection_bg: Color::Rgb(235, 219, 178),      // #ebdbb2 (bg1)
        }
    }

    /// Load theme from preset name
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "darkwall" | "default" | "dark" => Some(Self::darkwall()),
            "catppuccin-mocha" | "catppuccin_mocha" | "catppuccin" => {
                Some(Self::catppuccin_mocha())
            }
            "catppuccin-latte" | "catppuccin_latte" | "light" => Some(Self::catppuccin_latte()),
            "nord" => Some(Self::nord()),
            "gruvbox" | "gruvbox-dark" | "gruvbox_dark" => Some(Self::gruvbox()),
            "gruvbox-light" | "gruvbox_light" => Some(Self::gruvbox_light()),
            _ => None,
        }
    }

    /// Replace the accent color
    pub fn with_primary(mut self, primary: Color) -> Self {
        self.primary = primary;
        self
    }

    /// Convert to 256-color approximation for limited terminals
    pub fn to_256_color(&self) -> Self {
        Self {
            background: approximate_256(self.background),
            surface: approximate_256(self.surface),
            surface_variant: approximate_256(self.surface_variant),
            foreground: approximate_256(self.foreground),
            dimmed: approximate_256(self.dimmed),
            dimmed_alt: approximate_256(self.dimmed_alt),
            primary: approximate_256(self.primary),
            primary_container: approximate_256(self.primary_container),
            on_primary_container: approximate_256(self.on_primary_container),
            selection_bg: approximate_256(self.selection_bg),
        }
    }

    /// Screen headers
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    /// Section titles between cards
    pub fn section_title(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    /// Border for a card, brighter when focused
    pub fn card_border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            Style::default().fg(self.dimmed_alt)
        }
    }

    /// Secondary text on a given background
    pub fn muted_on(&self, bg: Color) -> Style {
        Style::default().fg(self.dimmed).bg(bg)
    }
}

/// Parse hex color string to Color
/// Supports: #rrggbb, #rgb, rrggbb, rgb
pub fn parse_hex_color(s: &str) -> Result<Color, ColorError> {
    let s = s.trim().trim_start_matches('#');

    if !s.is_ascii() {
        return Err(ColorError::InvalidHex);
    }

    match s.len() {
        // #rgb -> #rrggbb
        3 => {
            let r = u8::from_str_radix(&s[0..1], 16).map_err(|_| ColorError::InvalidHex)?;
            let g = u8::from_str_radix(&s[1..2], 16).map_err(|_| ColorError::InvalidHex)?;
            let b = u8::from_str_radix(&s[2..3], 16).map_err(|_| ColorError::InvalidHex)?;
            Ok(Color::Rgb(r * 17, g * 17, b * 17))
        }
        // #rrggbb
        6 => {
            let r = u8::from_str_radix(&s[0..2], 16).map_err(|_| ColorError::InvalidHex)?;
            let g = u8::from_str_radix(&s[2..4], 16).map_err(|_| ColorError::InvalidHex)?;
            let b = u8::from_str_radix(&s[4..6], 16).map_err(|_| ColorError::InvalidHex)?;
            Ok(Color::Rgb(r, g, b))
        }
        _ => Err(ColorError::InvalidLength),
    }
}

/// Color parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("invalid color length (expected 3 or 6 hex chars)")]
    InvalidLength,
    #[error("invalid hex character")]
    InvalidHex,
}

/// Approximate RGB color to nearest 256-color palette entry
fn approximate_256(color: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            // 6x6x6 color cube starts at index 16
            // Each axis: 0, 95, 135, 175, 215, 255 -> indices 0-5
            let r_idx = if r < 48 { 0 } else { (r - 35) / 40 };
            let g_idx = if g < 48 { 0 } else { (g - 35) / 40 };
            let b_idx = if b < 48 { 0 } else { (b - 35) / 40 };
            Color::Indexed(16 + 36 * r_idx + 6 * g_idx + b_idx)
        }
        c => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        assert_eq!(parse_hex_color("#ff0000"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Ok(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#0d1116"), Ok(Color::Rgb(13, 17, 22)));
    }

    #[test]
    fn test_parse_hex_3() {
        assert_eq!(parse_hex_color("#f00"), Ok(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("0f0"), Ok(Color::Rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_hex_invalid() {
        assert_eq!(parse_hex_color("invalid"), Err(ColorError::InvalidLength));
        assert_eq!(parse_hex_color("#gg0000"), Err(ColorError::InvalidHex));
        assert!(parse_hex_color("#ff00").is_err());
    }

    #[test]
    fn test_presets() {
        assert!(Theme::from_preset("darkwall").is_some());
        assert!(Theme::from_preset("catppuccin-latte").is_some());
        assert!(Theme::from_preset("Nord").is_some());
        assert!(Theme::from_preset("gruvbox-light").is_some());
        assert!(Theme::from_preset("nonexistent").is_none());
    }

    #[test]
    fn test_256_fallback_only_touches_rgb() {
        let theme = Theme::darkwall().to_256_color();
        assert!(matches!(theme.background, Color::Indexed(_)));
        assert_eq!(approximate_256(Color::Red), Color::Red);
        assert_eq!(approximate_256(Color::Rgb(0, 0, 0)), Color::Indexed(16));
        assert_eq!(approximate_256(Color::Rgb(255, 255, 255)), Color::Indexed(231));
    }
}
