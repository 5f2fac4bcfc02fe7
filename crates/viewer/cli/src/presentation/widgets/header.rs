//! Header widget: playback state and turn position.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use replay_store::SnapshotStore;
use viewer_core::{PlaybackState, PresentationMapper, ReplaySession};

use crate::state::{AppMode, AppState};

pub fn render<S, T>(
    frame: &mut Frame,
    area: Rect,
    session: &ReplaySession<S>,
    app_state: &AppState,
    theme: &T,
) where
    S: SnapshotStore,
    T: PresentationMapper<Style = Style>,
{
    let playback = session.playback();
    let mut spans = vec![Span::styled(
        playback.state().as_str(),
        theme.style_state(playback.state()),
    )];

    if let Some(position) = session.position() {
        spans.push(Span::raw(" | Turn: "));
        spans.push(Span::styled(
            format!("{position}/{}", playback.turn_count().saturating_sub(1)),
            Style::default().fg(Color::Yellow),
        ));
        if let Some(game_turn) = session.current().and_then(|snapshot| snapshot.game_turn) {
            spans.push(Span::raw(" | Game turn: "));
            spans.push(Span::raw(game_turn.to_string()));
        }
        if let Some(player) = session.current().and_then(|snapshot| snapshot.player.as_deref()) {
            spans.push(Span::raw(" | Player: "));
            spans.push(Span::styled(
                player.to_string(),
                theme.emphasize(Style::default().fg(Color::Cyan)),
            ));
        }
    }

    spans.push(Span::raw(" | Speed: "));
    spans.push(Span::styled(
        format!("{}x", playback.speed_level() + 1),
        Style::default().fg(Color::LightGreen),
    ));
    spans.push(Span::raw(format!(" | Zoom: {:.1}", app_state.viewport.zoom())));
    if session.is_following() {
        spans.push(Span::styled(
            " | FOLLOW",
            theme.emphasize(Style::default().fg(Color::LightBlue)),
        ));
    }

    let mode_text = match app_state.mode {
        AppMode::Normal => "",
        AppMode::Examine { .. } => " [EXAMINE]",
        AppMode::Prompt { .. } => " [INPUT]",
    };
    spans.push(Span::styled(
        mode_text,
        theme.emphasize(Style::default().fg(Color::Magenta)),
    ));

    let title = match session.summary() {
        Some(summary) if playback.state() != PlaybackState::Stopped => {
            format!("Replay: {}", summary.source)
        }
        _ => "Replay".to_string(),
    };
    let paragraph =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(paragraph, area);
}
