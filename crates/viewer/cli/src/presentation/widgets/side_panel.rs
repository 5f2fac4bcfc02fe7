//! Side panel: turn statistics, cell inspector and color legend.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use replay_core::{Snapshot, legend};
use replay_store::SnapshotStore;
use viewer_core::{PresentationMapper, ReplaySession, describe_cell};

use crate::state::AppState;

const STATS_HEIGHT: u16 = 11;

pub fn render<S, T>(
    frame: &mut Frame,
    area: Rect,
    session: &ReplaySession<S>,
    app_state: &AppState,
    theme: &T,
) where
    S: SnapshotStore,
    T: PresentationMapper<Color = Color, Style = Style>,
{
    let legend_height = if app_state.show_legend {
        Constraint::Percentage(45)
    } else {
        Constraint::Length(0)
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(STATS_HEIGHT), Constraint::Min(0), legend_height])
        .split(area);

    render_stats(frame, chunks[0], session.current());
    render_examine(frame, chunks[1], session.current(), app_state);
    if app_state.show_legend {
        render_legend(frame, chunks[2], theme);
    }
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::White)),
        Span::raw(value),
    ])
}

fn render_stats(frame: &mut Frame, area: Rect, snapshot: Option<&Snapshot>) {
    let lines = match snapshot {
        None => vec![Line::from("No turn on screen")],
        Some(snapshot) => {
            let stats = snapshot.stats();
            vec![
                stat_line(
                    "Score: ",
                    stats.score.map_or_else(|| "-".to_string(), |s| s.to_string()),
                ),
                stat_line("Ants: ", stats.ants.to_string()),
                stat_line("Enemies: ", stats.enemies.to_string()),
                stat_line(
                    "Food: ",
                    format!("{} on {} cells", stats.food_amount, stats.food_cells),
                ),
                stat_line("Carried: ", stats.carried_food.to_string()),
                stat_line("Home cells: ", stats.home_cells.to_string()),
                stat_line("Tiles: ", stats.tiles.to_string()),
                stat_line(
                    "Next turn in: ",
                    snapshot
                        .next_turn_in
                        .map_or_else(|| "-".to_string(), |s| format!("{s:.1}s")),
                ),
                stat_line(
                    "Recorded: ",
                    snapshot.recorded_at.clone().unwrap_or_else(|| "-".to_string()),
                ),
            ]
        }
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Turn"));
    frame.render_widget(paragraph, area);
}

fn render_examine(
    frame: &mut Frame,
    area: Rect,
    snapshot: Option<&Snapshot>,
    app_state: &AppState,
) {
    let lines: Vec<Line> = match (snapshot, app_state.examine_position()) {
        (Some(snapshot), Some(cursor)) => describe_cell(snapshot, cursor)
            .into_iter()
            .map(Line::from)
            .collect(),
        (None, Some(_)) => vec![Line::from("No turn on screen")],
        (_, None) => vec![Line::from("Press [x] to inspect a cell")],
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Examine"));
    frame.render_widget(paragraph, area);
}

fn render_legend<T>(frame: &mut Frame, area: Rect, theme: &T)
where
    T: PresentationMapper<Color = Color, Style = Style>,
{
    let mut lines = Vec::new();
    for (section, keys) in legend() {
        lines.push(Line::from(Span::styled(
            section.to_string(),
            theme.emphasize(Style::default()),
        )));
        for key in keys {
            lines.push(Line::from(vec![
                Span::styled("  ", Style::default().bg(theme.fill(key))),
                Span::raw(format!(" {}", key.name())),
            ]));
        }
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Legend"));
    frame.render_widget(paragraph, area);
}
