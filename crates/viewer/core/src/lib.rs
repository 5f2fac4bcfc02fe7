//! Playback orchestration shared by every viewer front-end.
//!
//! Owns the playback position and turns stored snapshots into frames:
//! - [`Playback`]: the `Stopped` / `Playing` / `Paused` state machine.
//! - [`ReplaySession`]: binds a [`SnapshotStore`](replay_store::SnapshotStore)
//!   to a playback and keeps the last presented frame.
//! - [`FrameView`]: sprites in pixel space, ready for a drawing surface.
pub mod cache;
pub mod config;
pub mod frame;
pub mod frontend;
pub mod message;
pub mod playback;
pub mod presentation;
pub mod session;
pub mod viewport;

pub use cache::FrameCache;
pub use config::{FollowConfig, LayoutConfig, MessageConfig, PlaybackConfig, ViewerConfig};
pub use frame::{DrawCall, FrameView, Sprite, describe_cell};
pub use frontend::FrontendApp;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use playback::{Playback, PlaybackCommand, PlaybackState, SPEED_MULTIPLIERS};
pub use presentation::PresentationMapper;
pub use session::ReplaySession;
pub use viewport::Viewport;
