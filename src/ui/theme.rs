//! Colour palettes for the light and dark themes

use ratatui::style::Color;

use crate::core::Theme;
use crate::domain::Badge;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub badge_fg: Color,
    pub green: Color,
    pub amber: Color,
    pub red: Color,
    pub blue: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                bg: Color::Rgb(248, 249, 251),
                fg: Color::Rgb(31, 41, 55),
                muted: Color::Rgb(107, 114, 128),
                accent: Color::Rgb(37, 99, 235),
                border: Color::Rgb(209, 213, 219),
                selection_bg: Color::Rgb(219, 234, 254),
                selection_fg: Color::Rgb(30, 58, 138),
                badge_fg: Color::Rgb(255, 255, 255),
                green: Color::Rgb(22, 163, 74),
                amber: Color::Rgb(217, 119, 6),
                red: Color::Rgb(220, 38, 38),
                blue: Color::Rgb(37, 99, 235),
            },
            Theme::Dark => Self {
                bg: Color::Rgb(17, 24, 39),
                fg: Color::Rgb(229, 231, 235),
                muted: Color::Rgb(156, 163, 175),
                accent: Color::Rgb(96, 165, 250),
                border: Color::Rgb(55, 65, 81),
                selection_bg: Color::Rgb(30, 58, 138),
                selection_fg: Color::Rgb(239, 246, 255),
                badge_fg: Color::Rgb(17, 24, 39),
                green: Color::Rgb(74, 222, 128),
                amber: Color::Rgb(251, 191, 36),
                red: Color::Rgb(248, 113, 113),
                blue: Color::Rgb(96, 165, 250),
            },
        }
    }

    pub fn badge(&self, badge: Badge) -> Color {
        match badge {
            Badge::Green => self.green,
            Badge::Amber => self.amber,
            Badge::Red => self.red,
            Badge::Blue => self.blue,
        }
    }
}
