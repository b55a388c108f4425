//! Colour palettes for the light and dark themes.

use ratatui::style::{Color, Modifier, Style};

use crate::state::{NotificationLevel, Outcome, Signal, Theme};

/// Resolved colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fg: Color,
    pub bg: Color,
    pub muted: Color,
    pub accent: Color,
    pub header: Color,
    pub bar_bg: Color,
    pub selection_bg: Color,
    pub up: Color,
    pub down: Color,
    /// Area fill under an upward sparkline.
    pub up_fill: Color,
    /// Area fill under a downward sparkline.
    pub down_fill: Color,
    pub neutral: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                fg: Color::White,
                bg: Color::Reset,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                header: Color::Yellow,
                bar_bg: Color::Rgb(30, 41, 59),
                selection_bg: Color::Rgb(51, 65, 85),
                up: Color::Green,
                down: Color::Red,
                up_fill: Color::Rgb(20, 83, 45),
                down_fill: Color::Rgb(127, 29, 29),
                neutral: Color::Gray,
            },
            Theme::Light => Self {
                fg: Color::Black,
                bg: Color::White,
                muted: Color::Gray,
                accent: Color::Blue,
                header: Color::Rgb(146, 64, 14),
                bar_bg: Color::Rgb(226, 232, 240),
                selection_bg: Color::Rgb(203, 213, 225),
                up: Color::Rgb(21, 128, 61),
                down: Color::Rgb(185, 28, 28),
                up_fill: Color::Rgb(187, 247, 208),
                down_fill: Color::Rgb(254, 202, 202),
                neutral: Color::Rgb(71, 85, 105),
            },
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.header)
            .add_modifier(Modifier::BOLD)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Green for zero or positive changes, red otherwise.
    pub fn change(&self, value: f64) -> Style {
        Style::default().fg(if value >= 0.0 { self.up } else { self.down })
    }

    pub fn signal(&self, signal: Signal) -> Style {
        let color = match signal {
            Signal::Buy => self.up,
            Signal::Hold => Color::Yellow,
            Signal::Sell => self.down,
        };
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub fn outcome(&self, outcome: Outcome) -> Style {
        let color = match outcome {
            Outcome::Win => self.up,
            Outcome::Loss => self.down,
            Outcome::Breakeven => self.neutral,
        };
        Style::default().fg(color)
    }

    pub fn level(&self, level: NotificationLevel) -> Color {
        match level {
            NotificationLevel::Info => self.accent,
            NotificationLevel::Success => self.up,
            NotificationLevel::Warning => Color::Yellow,
            NotificationLevel::Error => self.down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_colour_boundary() {
        let palette = Palette::for_theme(Theme::Dark);
        assert_eq!(palette.change(0.0).fg, Some(Color::Green));
        assert_eq!(palette.change(-0.01).fg, Some(Color::Red));
    }

    #[test]
    fn test_themes_differ() {
        assert_ne!(Palette::for_theme(Theme::Dark), Palette::for_theme(Theme::Light));
    }
}
