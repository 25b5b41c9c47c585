use crate::models::ThemeClass;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;
    pub const HIGHLIGHT: Color = Color::LightCyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Weather colors
    pub const TEMP_COLD: Color = Color::LightBlue;
    pub const TEMP_COOL: Color = Color::Cyan;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;
    pub const UV_LOW: Color = Color::Green;
    pub const UV_HIGH: Color = Color::Yellow;
    pub const UV_EXTREME: Color = Color::Magenta;

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Self::HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Self::WARNING)
    }

    pub fn error() -> Style {
        Style::default()
            .fg(Self::ERROR)
            .add_modifier(Modifier::BOLD)
    }

    pub fn temp_color(temp_c: f64) -> Color {
        if temp_c < 5.0 {
            Self::TEMP_COLD
        } else if temp_c < 15.0 {
            Self::TEMP_COOL
        } else if temp_c < 28.0 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_HOT
        }
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}

/// Colors for one `ThemeClass`. The dashboard chrome (borders, title,
/// header accent) follows the palette; data colors stay on `Theme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub border: Color,
    pub banner: Color,
    pub fg: Color,
    pub bg: Color,
}

impl Palette {
    pub fn for_class(class: ThemeClass) -> Self {
        match class {
            ThemeClass::NeutralLight => Self {
                accent: Color::Blue,
                border: Color::Gray,
                banner: Color::DarkGray,
                fg: Color::Black,
                bg: Color::White,
            },
            ThemeClass::NeutralDark => Self {
                accent: Theme::ACCENT,
                border: Theme::DIM,
                banner: Color::Gray,
                fg: Theme::FG,
                bg: Color::Reset,
            },
            ThemeClass::HazardRed => Self {
                accent: Color::LightRed,
                border: Color::Red,
                banner: Color::Red,
                fg: Theme::FG,
                bg: Color::Rgb(40, 0, 0),
            },
            ThemeClass::WarningAmber => Self {
                accent: Color::LightYellow,
                border: Color::Yellow,
                banner: Color::Yellow,
                fg: Theme::FG,
                bg: Color::Rgb(40, 28, 0),
            },
            ThemeClass::Rain => Self {
                accent: Color::LightBlue,
                border: Color::Blue,
                banner: Color::LightBlue,
                fg: Theme::FG,
                bg: Color::Rgb(8, 16, 40),
            },
            ThemeClass::Snow => Self {
                accent: Color::White,
                border: Color::Gray,
                banner: Color::LightCyan,
                fg: Theme::FG,
                bg: Color::Rgb(24, 28, 36),
            },
            ThemeClass::Clear => Self {
                accent: Color::LightYellow,
                border: Color::Cyan,
                banner: Color::LightCyan,
                fg: Theme::FG,
                bg: Color::Reset,
            },
        }
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hazard_palette_is_red() {
        let p = Palette::for_class(ThemeClass::HazardRed);
        assert_eq!(p.border, Color::Red);
        assert_eq!(p.banner, Color::Red);
    }

    #[test]
    fn calm_palette_is_light() {
        let p = Palette::for_class(ThemeClass::NeutralLight);
        assert_eq!(p.bg, Color::White);
        assert_eq!(p.fg, Color::Black);
    }
}
