//! Keyboard bindings.
//!
//! Owns the key-to-command mapping so the event loop never inspects raw
//! `crossterm` events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use replay_core::HexDirection;
use viewer_core::PlaybackCommand;

use crate::state::{AppMode, PromptKind};

/// Turns skipped by PageUp / PageDown.
const PAGE_STEP: i64 = 10;
/// Pan distance per key press, in layout units.
const PAN_STEP: f64 = 20.0;

/// High-level outcome of processing a keyboard event.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyAction {
    Quit,
    Playback(PlaybackCommand),
    ZoomIn,
    ZoomOut,
    Pan { dx: f64, dy: f64 },
    ResetView,
    ToggleLegend,
    Examine,
    MoveCursor(HexDirection),
    OpenPrompt(PromptKind),
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    Unload,
    /// Re-read the store now instead of waiting for the poll.
    Refresh,
    /// Leave the current mode.
    Back,
    None,
}

#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key(&self, key: KeyEvent, mode: &AppMode) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }
        match mode {
            AppMode::Normal => self.normal(key),
            AppMode::Examine { .. } => self.examine(key),
            AppMode::Prompt { .. } => self.prompt(key),
        }
    }

    fn normal(&self, key: KeyEvent) -> KeyAction {
        use PlaybackCommand as Cmd;

        match key.code {
            KeyCode::Char(' ') => KeyAction::Playback(Cmd::Toggle),
            KeyCode::Left | KeyCode::Char('h') => KeyAction::Playback(Cmd::Step(-1)),
            KeyCode::Right | KeyCode::Char('l') => KeyAction::Playback(Cmd::Step(1)),
            KeyCode::Up | KeyCode::PageUp => KeyAction::Playback(Cmd::Step(PAGE_STEP)),
            KeyCode::Down | KeyCode::PageDown => KeyAction::Playback(Cmd::Step(-PAGE_STEP)),
            KeyCode::Home | KeyCode::Char('g') => KeyAction::Playback(Cmd::First),
            KeyCode::End | KeyCode::Char('G') => KeyAction::Playback(Cmd::Last),
            KeyCode::Char('>') | KeyCode::Char('.') => KeyAction::Playback(Cmd::Faster),
            KeyCode::Char('<') | KeyCode::Char(',') => KeyAction::Playback(Cmd::Slower),
            KeyCode::Char('f') => KeyAction::Playback(Cmd::ToggleFollow),
            KeyCode::Char(':') => KeyAction::OpenPrompt(PromptKind::GoTo),
            KeyCode::Char('o') => KeyAction::OpenPrompt(PromptKind::Open),
            KeyCode::Char('u') => KeyAction::Unload,
            KeyCode::Char('R') => KeyAction::Refresh,
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::ZoomIn,
            KeyCode::Char('-') => KeyAction::ZoomOut,
            KeyCode::Char('w') => KeyAction::Pan { dx: 0.0, dy: PAN_STEP },
            KeyCode::Char('s') => KeyAction::Pan { dx: 0.0, dy: -PAN_STEP },
            KeyCode::Char('a') => KeyAction::Pan { dx: PAN_STEP, dy: 0.0 },
            KeyCode::Char('d') => KeyAction::Pan { dx: -PAN_STEP, dy: 0.0 },
            KeyCode::Char('r') => KeyAction::ResetView,
            KeyCode::Char('L') => KeyAction::ToggleLegend,
            KeyCode::Char('x') => KeyAction::Examine,
            KeyCode::Char('q') => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    /// `q w e` / `a s d` surround the cursor like the six hex neighbors.
    fn examine(&self, key: KeyEvent) -> KeyAction {
        let direction = match key.code {
            KeyCode::Char('w') | KeyCode::Up => HexDirection::North,
            KeyCode::Char('s') | KeyCode::Down => HexDirection::South,
            KeyCode::Char('e') => HexDirection::NorthEast,
            KeyCode::Char('d') | KeyCode::Right => HexDirection::SouthEast,
            KeyCode::Char('q') => HexDirection::NorthWest,
            KeyCode::Char('a') | KeyCode::Left => HexDirection::SouthWest,
            KeyCode::Esc | KeyCode::Char('x') => return KeyAction::Back,
            _ => return KeyAction::None,
        };
        KeyAction::MoveCursor(direction)
    }

    fn prompt(&self, key: KeyEvent) -> KeyAction {
        match key.code {
            KeyCode::Enter => KeyAction::PromptSubmit,
            KeyCode::Esc => KeyAction::Back,
            KeyCode::Backspace => KeyAction::PromptBackspace,
            KeyCode::Char(ch) => KeyAction::PromptInput(ch),
            _ => KeyAction::None,
        }
    }
}
