//! Terminal presentation components used by the CLI viewer.
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod widgets;
