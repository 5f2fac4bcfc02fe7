//! Footer widget displaying context-sensitive key bindings.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{AppMode, AppState};

/// Render the footer panel with key bindings help.
pub fn render(frame: &mut Frame, area: Rect, app_state: &AppState) {
    let line = match &app_state.mode {
        AppMode::Normal => Line::from(vec![
            Span::raw("[Space] Play/Pause | "),
            Span::raw("[h/l] Step | "),
            Span::raw("[PgUp/PgDn] ±10 | "),
            Span::raw("[g/G] First/Last | "),
            Span::raw("[:] Go to | "),
            Span::raw("[</>] Speed | "),
            Span::raw("[f/R] Follow/Refresh | "),
            Span::raw("[+/-/wasd/r] View | "),
            Span::raw("[x] Examine | "),
            Span::raw("[o/u] Open/Unload | "),
            Span::raw("[q] Quit"),
        ]),
        AppMode::Examine { .. } => Line::from(vec![
            Span::raw("[q/w/e/a/s/d] Move cursor | "),
            Span::raw("[x/ESC] Back"),
        ]),
        AppMode::Prompt { kind, buffer } => Line::from(vec![
            Span::styled(
                format!("{}: ", kind.title()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(buffer.clone()),
            Span::raw("_  "),
            Span::raw("[Enter] Confirm | [ESC] Cancel"),
        ]),
    };

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}
