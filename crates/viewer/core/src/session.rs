//! A loaded replay: store, playback position and the frame on screen.

use std::num::NonZeroU64;
use std::sync::Arc;
use std::time::Duration;

use replay_core::{Layout, Snapshot};
use replay_store::{SnapshotStore, StoreError, StoreSummary};

use crate::cache::FrameCache;
use crate::config::ViewerConfig;
use crate::frame::FrameView;
use crate::message::MessageLog;
use crate::playback::{Playback, PlaybackCommand, PlaybackState};

/// Owns the playback position and the last presented snapshot.
///
/// Every data-layer failure halts playback, keeps the previous frame, and
/// lands in [`messages`](Self::messages) before being returned.
pub struct ReplaySession<S> {
    store: Option<S>,
    summary: Option<StoreSummary>,
    playback: Playback,
    current: Option<Arc<Snapshot>>,
    cache: FrameCache,
    messages: MessageLog,
    layout: Layout,
    base_interval: Duration,
    follow: bool,
}

impl<S: SnapshotStore> ReplaySession<S> {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            store: None,
            summary: None,
            playback: Playback::new(config.playback.speed_level),
            current: None,
            cache: FrameCache::new(config.frame_cache),
            messages: MessageLog::new(config.messages.capacity),
            layout: config.layout.layout(),
            base_interval: config.playback.base_interval,
            follow: config.follow.enabled,
        }
    }

    /// Replaces the current replay with `store`.
    ///
    /// On success playback is `Paused` at turn 0. A store that fails
    /// validation is dropped and the session stays `Stopped`.
    pub async fn load(&mut self, store: S) -> Result<StoreSummary, StoreError> {
        self.unload();
        let source = store.source();

        let summary = match store.validate().await {
            Ok(summary) => summary,
            Err(error) => {
                tracing::warn!(%source, %error, "Rejected snapshot store");
                self.messages
                    .error(None, format!("Cannot load {source}: {error}"));
                return Err(error);
            }
        };
        let Some(turns) = NonZeroU64::new(summary.turn_count) else {
            let error = StoreError::NotFound(format!("{source} holds no turns"));
            self.messages.error(None, error.to_string());
            return Err(error);
        };

        tracing::info!(%source, turns = turns.get(), "Loaded replay");
        self.messages
            .info(Some(0), format!("Loaded {source} ({turns} turns)"));
        self.store = Some(store);
        self.summary = Some(summary.clone());
        self.playback.load(turns);
        self.present().await?;
        Ok(summary)
    }

    /// Drops the store and returns to `Stopped`.
    pub fn unload(&mut self) {
        if let Some(store) = self.store.take() {
            tracing::debug!(source = %store.source(), "Unloaded replay");
        }
        self.summary = None;
        self.current = None;
        self.cache.clear();
        self.playback.unload();
    }

    pub async fn handle(&mut self, command: PlaybackCommand) -> Result<(), StoreError> {
        let before = self.playback.position();
        match command {
            PlaybackCommand::Play => {
                self.playback.play();
            }
            PlaybackCommand::Pause => {
                self.playback.pause();
            }
            PlaybackCommand::Toggle => {
                self.playback.toggle();
            }
            PlaybackCommand::Step(delta) => {
                self.playback.step(delta);
            }
            PlaybackCommand::Scrub(turn) => {
                self.playback.scrub(turn);
            }
            PlaybackCommand::First => {
                self.playback.first();
            }
            PlaybackCommand::Last => {
                self.playback.last();
            }
            PlaybackCommand::Faster => {
                if self.playback.faster() {
                    self.announce_speed();
                }
            }
            PlaybackCommand::Slower => {
                if self.playback.slower() {
                    self.announce_speed();
                }
            }
            PlaybackCommand::ToggleFollow => {
                self.follow = !self.follow;
                let text = if self.follow {
                    "Following new turns"
                } else {
                    "Stopped following"
                };
                self.messages.info(self.position(), text);
            }
        }

        if self.playback.state() != PlaybackState::Stopped
            && (self.playback.position() != before || self.current.is_none())
        {
            self.present().await?;
        }
        Ok(())
    }

    /// One playback tick; idle unless playing.
    pub async fn tick(&mut self) -> Result<(), StoreError> {
        if self.playback.tick().is_some() {
            self.present().await?;
            if !self.playback.is_playing() {
                self.messages.info(self.position(), "Reached the last turn");
            }
        }
        Ok(())
    }

    /// Re-reads the turn count and, in follow mode, jumps to the newest turn.
    ///
    /// Growth drops cached frames, since a late row ordered by date can shift
    /// existing turn indices; a paused session re-reads its current turn.
    /// Returns whether new turns were found.
    pub async fn refresh(&mut self) -> Result<bool, StoreError> {
        let Some(store) = &self.store else {
            return Ok(false);
        };
        let result = store.turn_count().await;
        let count = match result {
            Ok(count) => count,
            Err(error) => return Err(self.halt(error)),
        };
        if !self.playback.extend(count) {
            return Ok(false);
        }

        tracing::debug!(turns = count, "Store grew");
        self.cache.clear();
        if !self.playback.is_playing() {
            if self.follow {
                self.playback.last();
            }
            self.present().await?;
        }
        Ok(true)
    }

    /// Delay until the next tick, or `None` when nothing should be scheduled.
    pub fn tick_interval(&self) -> Option<Duration> {
        self.playback
            .is_playing()
            .then(|| self.playback.tick_delay(self.base_interval))
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Playback position while a replay is loaded.
    pub fn position(&self) -> Option<u64> {
        (self.playback.state() != PlaybackState::Stopped).then(|| self.playback.position())
    }

    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_deref()
    }

    pub fn summary(&self) -> Option<&StoreSummary> {
        self.summary.as_ref()
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn is_following(&self) -> bool {
        self.follow
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn messages(&self) -> &MessageLog {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageLog {
        &mut self.messages
    }

    /// Projects the current snapshot through `layout`.
    pub fn frame(&self, layout: &Layout) -> Option<FrameView> {
        self.current
            .as_deref()
            .map(|snapshot| FrameView::project(snapshot, layout))
    }

    /// Fetches the snapshot at the playback position and makes it current.
    async fn present(&mut self) -> Result<(), StoreError> {
        let turn = self.playback.position();
        if let Some(snapshot) = self.cache.get(turn) {
            self.current = Some(snapshot);
            return Ok(());
        }

        let Some(store) = &self.store else {
            return Ok(());
        };
        let result = store.snapshot(turn as i64).await;
        match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.cache.insert(Arc::clone(&snapshot));
                self.current = Some(snapshot);
                Ok(())
            }
            Err(error) => Err(self.halt(error)),
        }
    }

    fn halt(&mut self, error: StoreError) -> StoreError {
        self.playback.pause();
        let turn = self.position();
        tracing::warn!(?turn, %error, kind = error.kind().as_str(), "Playback halted");
        self.messages.error(turn, error.to_string());
        error
    }

    fn announce_speed(&mut self) {
        let level = self.playback.speed_level() + 1;
        self.messages.info(self.position(), format!("Speed {level}x"));
    }
}
