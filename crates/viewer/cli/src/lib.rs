//! Terminal front-end for the ants replay viewer.
//!
//! Draws each turn on a ratatui canvas and maps key presses to playback
//! commands. All replay logic lives in `viewer-core`; this crate only owns
//! the terminal, the input bindings and the widgets.

mod app;
mod config;
mod event;
mod input;
pub mod logging;
mod presentation;
mod state;

pub use app::CliApp;
pub use config::{CliConfig, UiConfig};
