//! Frame layout and panel composition.
//!
//! ```text
//! +-------------------- header ---------------------+
//! | map canvas                       | side panel   |
//! +------------------- messages --------------------+
//! +-------------------- footer ---------------------+
//! ```
use anyhow::Result;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout as Split},
};
use replay_core::Layout;
use replay_store::SnapshotStore;
use viewer_core::ReplaySession;

use crate::{
    config::UiConfig,
    presentation::{
        terminal::Tui,
        theme::RatatuiTheme,
        widgets::{footer, header, map, messages, side_panel},
    },
    state::AppState,
};

const HEADER_HEIGHT: u16 = 3;
const FOOTER_HEIGHT: u16 = 3;

pub fn render<S: SnapshotStore>(
    terminal: &mut Tui,
    session: &ReplaySession<S>,
    app_state: &AppState,
    ui: &UiConfig,
) -> Result<()> {
    terminal.draw(|frame| render_frame(frame, session, app_state, ui))?;
    Ok(())
}

fn render_frame<S: SnapshotStore>(
    frame: &mut Frame,
    session: &ReplaySession<S>,
    app_state: &AppState,
    ui: &UiConfig,
) {
    let theme = RatatuiTheme;
    let chunks = Split::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(ui.message_panel_height),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(frame.area());

    let body = Split::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
        .split(chunks[1]);

    let layout = app_state.viewport.apply(session.layout());
    // Same zoom without the pan offset: frames the map independently of panning.
    let anchor = Layout {
        origin: session.layout().origin,
        ..layout
    };
    let view = session.frame(&layout);

    header::render(frame, chunks[0], session, app_state, &theme);
    map::render(
        frame,
        body[0],
        map::MapContext {
            view: view.as_ref(),
            layout,
            anchor,
            cursor: app_state.examine_position(),
            show_tile_labels: ui.show_tile_labels,
        },
        &theme,
    );
    side_panel::render(frame, body[1], session, app_state, &theme);
    messages::render(frame, chunks[2], session.messages(), &theme);
    footer::render(frame, chunks[3], app_state);
}
