//! Framework-independent styling contract.
//!
//! Front-ends implement [`PresentationMapper`] to turn palette keys, message
//! levels and playback states into their own color and style types.

use replay_core::ColorKey;

use crate::message::MessageLevel;
use crate::playback::PlaybackState;

pub trait PresentationMapper {
    /// Color type of the surface (e.g. `ratatui::style::Color`).
    type Color: Copy;
    /// Text style type of the surface (e.g. `ratatui::style::Style`).
    type Style: Clone;

    /// Fill color of a sprite.
    fn fill(&self, key: ColorKey) -> Self::Color;

    /// Label color drawn on top of [`fill`](Self::fill).
    fn text(&self, key: ColorKey) -> Self::Color;

    /// Legend swatch: label color on fill color.
    fn swatch(&self, key: ColorKey) -> Self::Style;

    fn style_message(&self, level: MessageLevel) -> Self::Style;

    fn style_state(&self, state: PlaybackState) -> Self::Style;

    fn emphasize(&self, base: Self::Style) -> Self::Style;
}
