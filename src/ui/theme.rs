use ratatui::style::Color;

use crate::config::Theme;
use crate::security::Severity;

/// Colours for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub error: Color,
    pub safe: Color,
    pub caution: Color,
    pub critical: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::Rgb(250, 250, 250),
                foreground: Color::Rgb(30, 30, 30),
                muted: Color::Rgb(110, 110, 110),
                accent: Color::Rgb(37, 99, 235),
                error: Color::Rgb(185, 28, 28),
                safe: Color::Rgb(21, 128, 61),
                caution: Color::Rgb(180, 83, 9),
                critical: Color::Rgb(185, 28, 28),
            },
            Theme::Dark => Self {
                background: Color::Rgb(17, 24, 39),
                foreground: Color::Rgb(229, 231, 235),
                muted: Color::Rgb(156, 163, 175),
                accent: Color::Rgb(96, 165, 250),
                error: Color::Rgb(248, 113, 113),
                safe: Color::Rgb(74, 222, 128),
                caution: Color::Rgb(251, 191, 36),
                critical: Color::Rgb(248, 113, 113),
            },
        }
    }

    pub fn severity(&self, severity: Severity) -> Color {
        match severity {
            Severity::Safe => self.safe,
            Severity::Caution => self.caution,
            Severity::Critical => self.critical,
        }
    }
}
