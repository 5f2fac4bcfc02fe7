//! Application state for mode management and UI context.

use replay_core::{HexCoord, HexDirection};
use viewer_core::Viewport;

/// What a text prompt is collecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// Path of a database to load.
    Open,
    /// Turn index to jump to.
    GoTo,
}

impl PromptKind {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Open => "Open database",
            Self::GoTo => "Go to turn",
        }
    }
}

/// Top-level application mode determining input handling and UI layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppMode {
    Normal,
    /// Hex cursor for inspecting a cell.
    Examine { cursor: HexCoord },
    /// Single-line text entry.
    Prompt { kind: PromptKind, buffer: String },
}

#[derive(Clone, Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub viewport: Viewport,
    pub show_legend: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: AppMode::Normal,
            viewport: Viewport::default(),
            show_legend: true,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cell under the examine cursor, if examining.
    pub fn examine_position(&self) -> Option<HexCoord> {
        match self.mode {
            AppMode::Examine { cursor } => Some(cursor),
            _ => None,
        }
    }

    pub fn enter_examine(&mut self, start: HexCoord) {
        self.mode = AppMode::Examine { cursor: start };
    }

    pub fn move_cursor(&mut self, direction: HexDirection) {
        if let AppMode::Examine { cursor } = &mut self.mode {
            *cursor = cursor.neighbor(direction);
        }
    }

    pub fn open_prompt(&mut self, kind: PromptKind, initial: impl Into<String>) {
        self.mode = AppMode::Prompt {
            kind,
            buffer: initial.into(),
        };
    }

    pub fn prompt_push(&mut self, ch: char) {
        if let AppMode::Prompt { buffer, .. } = &mut self.mode {
            buffer.push(ch);
        }
    }

    pub fn prompt_backspace(&mut self) {
        if let AppMode::Prompt { buffer, .. } = &mut self.mode {
            buffer.pop();
        }
    }

    /// Leaves the prompt, returning what was typed.
    pub fn take_prompt(&mut self) -> Option<(PromptKind, String)> {
        match std::mem::replace(&mut self.mode, AppMode::Normal) {
            AppMode::Prompt { kind, buffer } => Some((kind, buffer)),
            other => {
                self.mode = other;
                None
            }
        }
    }

    pub fn exit_mode(&mut self) {
        self.mode = AppMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn examine_cursor_walks_hex_neighbors() {
        let mut state = AppState::new();
        assert_eq!(state.examine_position(), None);

        state.enter_examine(HexCoord::new(2, 2));
        state.move_cursor(HexDirection::North);
        state.move_cursor(HexDirection::SouthEast);
        assert_eq!(state.examine_position(), Some(HexCoord::new(3, 1)));

        state.exit_mode();
        state.move_cursor(HexDirection::North);
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn prompt_collects_text() {
        let mut state = AppState::new();
        state.open_prompt(PromptKind::GoTo, "");
        for ch in "125".chars() {
            state.prompt_push(ch);
        }
        state.prompt_backspace();
        assert_eq!(state.take_prompt(), Some((PromptKind::GoTo, "12".to_string())));
        assert_eq!(state.mode, AppMode::Normal);
    }

    #[test]
    fn take_prompt_outside_prompt_keeps_mode() {
        let mut state = AppState::new();
        state.enter_examine(HexCoord::ORIGIN);
        assert_eq!(state.take_prompt(), None);
        assert_eq!(state.examine_position(), Some(HexCoord::ORIGIN));
    }
}
