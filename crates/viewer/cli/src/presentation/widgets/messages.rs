//! Messages widget displaying recent status and error lines.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListDirection, ListItem},
};
use viewer_core::{MessageEntry, MessageLog, PresentationMapper};

/// Render the message log panel, newest at the bottom.
pub fn render<T: PresentationMapper<Style = Style>>(
    frame: &mut Frame,
    area: Rect,
    log: &MessageLog,
    theme: &T,
) {
    let rows = area.height.saturating_sub(2) as usize;
    let mut items: Vec<ListItem> = log
        .recent(rows)
        .map(|entry| ListItem::new(format_message(entry)).style(theme.style_message(entry.level)))
        .collect();

    // Pad with empty lines to maintain consistent height
    while items.len() < rows {
        items.push(ListItem::new(""));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Messages"))
        .direction(ListDirection::BottomToTop);

    frame.render_widget(list, area);
}

/// Format a message entry with the turn it was raised on.
fn format_message(entry: &MessageEntry) -> String {
    match entry.turn {
        Some(turn) => format!("[turn {turn}] {}", entry.text),
        None => entry.text.clone(),
    }
}
