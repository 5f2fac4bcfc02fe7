//! Ratatui theme implementation of PresentationMapper.
//!
//! Palette colors are emitted as true-color RGB; terminals without
//! 24-bit support approximate them.

use ratatui::style::{Color, Modifier, Style};
use replay_core::{ColorKey, Rgb};
use viewer_core::{MessageLevel, PlaybackState, PresentationMapper};

/// Color of planned ant paths.
pub const PATH_COLOR: Color = Color::Yellow;
/// Outline of the examine cursor.
pub const CURSOR_COLOR: Color = Color::White;

pub struct RatatuiTheme;

const fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

impl PresentationMapper for RatatuiTheme {
    type Color = Color;
    type Style = Style;

    fn fill(&self, key: ColorKey) -> Color {
        rgb(key.swatch().fill)
    }

    fn text(&self, key: ColorKey) -> Color {
        rgb(key.swatch().text)
    }

    fn swatch(&self, key: ColorKey) -> Style {
        Style::default().fg(self.text(key)).bg(self.fill(key))
    }

    fn style_message(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Info => Style::default().fg(Color::White),
            MessageLevel::Warning => Style::default().fg(Color::Yellow),
            MessageLevel::Error => Style::default().fg(Color::LightRed),
        }
    }

    fn style_state(&self, state: PlaybackState) -> Style {
        let color = match state {
            PlaybackState::Stopped => Color::DarkGray,
            PlaybackState::Playing => Color::LightGreen,
            PlaybackState::Paused => Color::Yellow,
        };
        self.emphasize(Style::default().fg(color))
    }

    fn emphasize(&self, base: Style) -> Style {
        base.add_modifier(Modifier::BOLD)
    }
}
