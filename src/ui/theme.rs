//! Theme color definitions for the UI
//!
//! Provides dark and light color palettes, chosen from the config.

use crate::config::Theme;
use ratatui::style::Color;

/// Complete color palette for the UI
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Main background
    pub bg: Color,
    /// Primary foreground text
    pub fg: Color,
    /// Dimmed/secondary text
    pub dim: Color,
    /// Accent color (headings, active tab)
    pub accent: Color,
    /// Key the learner should press next
    pub next: Color,
    /// Key just pressed
    pub pressed: Color,
    /// Keys typed correctly
    pub correct: Color,
    /// Keys typed wrongly
    pub incorrect: Color,
    /// Keys inside the lit zone
    pub zone: Color,
    /// Key idle background
    pub key_off: Color,
    /// Key label text (idle)
    pub key_text: Color,
    /// Key label text on a lit key
    pub key_text_on: Color,
}

impl ThemeColors {
    /// Create a color palette for the given theme variant
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(22, 22, 30),
            fg: Color::Rgb(200, 200, 210),
            dim: Color::Rgb(90, 90, 110),
            accent: Color::Rgb(80, 200, 220),
            next: Color::Rgb(240, 180, 80),
            pressed: Color::Rgb(80, 200, 220),
            correct: Color::Rgb(80, 200, 120),
            incorrect: Color::Rgb(240, 90, 100),
            zone: Color::Rgb(120, 90, 200),
            key_off: Color::Rgb(40, 40, 50),
            key_text: Color::Rgb(180, 180, 190),
            key_text_on: Color::Rgb(20, 20, 25),
        }
    }

    /// High contrast for bright terminals
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 248),
            fg: Color::Rgb(30, 30, 40),
            dim: Color::Rgb(130, 130, 150),
            accent: Color::Rgb(0, 130, 160),
            next: Color::Rgb(200, 130, 0),
            pressed: Color::Rgb(0, 130, 160),
            correct: Color::Rgb(30, 150, 70),
            incorrect: Color::Rgb(200, 50, 60),
            zone: Color::Rgb(150, 120, 230),
            key_off: Color::Rgb(220, 220, 228),
            key_text: Color::Rgb(50, 50, 60),
            key_text_on: Color::Rgb(255, 255, 255),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self::dark()
    }
}
