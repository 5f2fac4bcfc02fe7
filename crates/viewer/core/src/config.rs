//! Viewer configuration structures and loaders.
//!
//! Settings shared by every front-end: where the replay lives, how fast it
//! plays, and how cells are laid out.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use replay_core::{Layout, Orientation};

use crate::playback::SPEED_MULTIPLIERS;

/// Store opened when no path is given.
pub const DEFAULT_DB_PATH: &str = "./movie3.db";

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub db_path: PathBuf,
    pub playback: PlaybackConfig,
    pub layout: LayoutConfig,
    pub messages: MessageConfig,
    pub follow: FollowConfig,
    /// Number of decoded snapshots kept for scrubbing.
    pub frame_cache: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            playback: PlaybackConfig::default(),
            layout: LayoutConfig::default(),
            messages: MessageConfig::default(),
            follow: FollowConfig::default(),
            frame_cache: 16,
        }
    }
}

impl ViewerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `REPLAY_DB` - Snapshot database path (default: ./movie3.db)
    /// - `REPLAY_TICK_INTERVAL_MS` - Base playback interval (default: 2000)
    /// - `REPLAY_SPEED_LEVEL` - Initial speed index into 3x/6x/9x (default: 1)
    /// - `REPLAY_CELL_SIZE` - Hex size in layout units (default: 20)
    /// - `REPLAY_ORIENTATION` - `flat` or `pointy` (default: flat)
    /// - `REPLAY_FRAME_CACHE` - Cached snapshots (default: 16)
    /// - `REPLAY_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    /// - `REPLAY_FOLLOW` - Start in live follow mode (default: false)
    /// - `REPLAY_FOLLOW_INTERVAL_MS` - Store polling interval (default: 2000)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("REPLAY_DB").filter(|p| !p.trim().is_empty()) {
            config.db_path = PathBuf::from(path);
        }

        if let Some(ms) = parse::<u64>(&lookup, "REPLAY_TICK_INTERVAL_MS") {
            config.playback.base_interval = Duration::from_millis(ms.max(1));
        }
        if let Some(level) = parse::<usize>(&lookup, "REPLAY_SPEED_LEVEL") {
            config.playback.speed_level = level.min(SPEED_MULTIPLIERS.len() - 1);
        }

        if let Some(size) = parse::<f64>(&lookup, "REPLAY_CELL_SIZE") {
            if size.is_finite() && size > 0.0 {
                config.layout.cell_size = size;
            }
        }
        if let Some(orientation) = parse::<Orientation>(&lookup, "REPLAY_ORIENTATION") {
            config.layout.orientation = orientation;
        }

        if let Some(capacity) = parse::<usize>(&lookup, "REPLAY_FRAME_CACHE") {
            config.frame_cache = capacity;
        }
        if let Some(capacity) = parse::<usize>(&lookup, "REPLAY_MESSAGE_CAPACITY") {
            config.messages.capacity = capacity.max(1);
        }

        if let Some(enabled) = lookup("REPLAY_FOLLOW").as_deref().and_then(parse_bool) {
            config.follow.enabled = enabled;
        }
        if let Some(ms) = parse::<u64>(&lookup, "REPLAY_FOLLOW_INTERVAL_MS") {
            config.follow.interval = Duration::from_millis(ms.max(1));
        }

        config
    }
}

#[derive(Clone, Debug)]
pub struct PlaybackConfig {
    /// Interval at multiplier 1; the effective delay is divided by the speed.
    pub base_interval: Duration,
    pub speed_level: usize,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_interval: Duration::from_millis(2000),
            speed_level: 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LayoutConfig {
    pub cell_size: f64,
    pub orientation: Orientation,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: 20.0,
            orientation: Orientation::FlatTop,
        }
    }
}

impl LayoutConfig {
    pub fn layout(&self) -> Layout {
        Layout::new(self.orientation, self.cell_size)
    }
}

#[derive(Clone, Debug)]
pub struct MessageConfig {
    pub capacity: usize,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self { capacity: 64 }
    }
}

/// Live mode: poll the store and jump to new turns as they are recorded.
#[derive(Clone, Debug)]
pub struct FollowConfig {
    pub enabled: bool,
    pub interval: Duration,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: Duration::from_millis(2000),
        }
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

/// Accepts `true/1/yes/on` and `false/0/no/off`, case-insensitively.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> ViewerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ViewerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config_from(&[]);
        assert_eq!(config.db_path, PathBuf::from("./movie3.db"));
        assert_eq!(config.playback.base_interval, Duration::from_millis(2000));
        assert_eq!(config.playback.speed_level, 1);
        assert_eq!(config.layout.orientation, Orientation::FlatTop);
        assert_eq!(config.frame_cache, 16);
        assert_eq!(config.messages.capacity, 64);
        assert!(!config.follow.enabled);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("REPLAY_DB", "/tmp/game.db"),
            ("REPLAY_TICK_INTERVAL_MS", "900"),
            ("REPLAY_SPEED_LEVEL", "2"),
            ("REPLAY_CELL_SIZE", "12.5"),
            ("REPLAY_ORIENTATION", "pointy"),
            ("REPLAY_FOLLOW", "yes"),
            ("REPLAY_FOLLOW_INTERVAL_MS", "500"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/game.db"));
        assert_eq!(config.playback.base_interval, Duration::from_millis(900));
        assert_eq!(config.playback.speed_level, 2);
        assert_eq!(config.layout.cell_size, 12.5);
        assert_eq!(config.layout.orientation, Orientation::PointyTop);
        assert!(config.follow.enabled);
        assert_eq!(config.follow.interval, Duration::from_millis(500));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("REPLAY_SPEED_LEVEL", "99"),
            ("REPLAY_CELL_SIZE", "-4"),
            ("REPLAY_ORIENTATION", "round"),
            ("REPLAY_MESSAGE_CAPACITY", "0"),
            ("REPLAY_FOLLOW", "maybe"),
            ("REPLAY_TICK_INTERVAL_MS", "fast"),
        ]);
        assert_eq!(config.playback.speed_level, 2);
        assert_eq!(config.layout.cell_size, 20.0);
        assert_eq!(config.layout.orientation, Orientation::FlatTop);
        assert_eq!(config.messages.capacity, 1);
        assert!(!config.follow.enabled);
        assert_eq!(config.playback.base_interval, Duration::from_millis(2000));
    }
}
