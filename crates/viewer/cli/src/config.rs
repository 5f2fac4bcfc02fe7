//! CLI-specific configuration for the terminal UI.
use std::env;
use std::path::PathBuf;

use viewer_core::config::parse_bool;

#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub ui: UiConfig,
    /// Directory for rolling log files; platform data dir when unset.
    pub log_dir: Option<PathBuf>,
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CLI_MESSAGE_PANEL_HEIGHT` - Message panel height in lines (default: 6)
    /// - `CLI_SHOW_TILE_LABELS` - Print coordinates on tiles (default: false)
    /// - `REPLAY_LOG_DIR` - Log file directory
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(height) = lookup("CLI_MESSAGE_PANEL_HEIGHT").and_then(|v| v.parse::<u16>().ok())
        {
            config.ui.message_panel_height = height.max(3);
        }
        if let Some(show) = lookup("CLI_SHOW_TILE_LABELS").as_deref().and_then(parse_bool) {
            config.ui.show_tile_labels = show;
        }
        config.log_dir = lookup("REPLAY_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        config
    }
}

/// UI layout and display configuration.
#[derive(Clone, Debug)]
pub struct UiConfig {
    /// Height of message panel in lines (including borders).
    pub message_panel_height: u16,
    pub show_tile_labels: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            message_panel_height: 6,
            show_tile_labels: false,
        }
    }
}
