use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Rgb(0x63, 0x66, 0xf1);
    pub const ACCENT_TEAL: Color = Color::Rgb(0x14, 0xb8, 0xa6);
    pub const BG_SURFACE: Color = Color::Rgb(0x1e, 0x29, 0x3b);

    pub fn border() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT_TEAL)
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn headline() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn muted() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn amount() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn warning() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn selected() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT_TEAL)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::ACCENT_TEAL).bg(Color::DarkGray)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }
}
