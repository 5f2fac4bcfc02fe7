//! Event loop orchestrating playback ticks, follow polling, input and rendering.
//!
//! Three sources race in one `tokio::select!`:
//! - the playback deadline, armed only while playing
//! - the follow poll, re-reading the turn count on a fixed interval
//! - a short input poll against the terminal
use anyhow::Result;
use crossterm::event::{self as term_event, Event as TermEvent, KeyEvent, KeyEventKind};
use replay_core::{EntityCategory, HexCoord};
use replay_store::SqliteSnapshotStore;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use viewer_core::{PlaybackCommand, ReplaySession};

use crate::{
    config::UiConfig,
    input::{InputHandler, KeyAction},
    presentation::{terminal::Tui, ui},
    state::{AppState, PromptKind},
};

const FRAME_INTERVAL_MS: u64 = 16;

pub struct EventLoop {
    session: ReplaySession<SqliteSnapshotStore>,
    input: InputHandler,
    app_state: AppState,
    ui: UiConfig,
    poll_interval: Duration,
}

impl EventLoop {
    pub fn new(
        session: ReplaySession<SqliteSnapshotStore>,
        ui: UiConfig,
        poll_interval: Duration,
    ) -> Self {
        Self {
            session,
            input: InputHandler::new(),
            app_state: AppState::new(),
            ui,
            poll_interval,
        }
    }

    pub async fn run(mut self, terminal: &mut Tui) -> Result<()> {
        self.render(terminal)?;

        let mut poll = time::interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut deadline = self.reschedule(None);

        loop {
            tokio::select! {
                _ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    if let Err(error) = self.session.tick().await {
                        tracing::debug!(%error, "Tick failed");
                    }
                    self.render(terminal)?;
                }
                _ = poll.tick() => {
                    if self.poll_store().await {
                        self.render(terminal)?;
                    }
                }
                _ = time::sleep(Duration::from_millis(FRAME_INTERVAL_MS)) => {
                    if self.handle_input_tick(terminal).await? {
                        break;
                    }
                }
            }
            deadline = self.reschedule(deadline);
        }

        if let Some(store) = self.session.store() {
            store.close().await;
        }
        tracing::info!("Viewer closed");
        Ok(())
    }

    /// Keeps a pending deadline, arms a new one when playback just started,
    /// and clears it whenever playback is not running.
    fn reschedule(&self, deadline: Option<Instant>) -> Option<Instant> {
        let interval = self.session.tick_interval()?;
        Some(deadline.unwrap_or_else(|| Instant::now() + interval))
    }

    /// Picks up turns appended since the last poll; returns whether to redraw.
    async fn poll_store(&mut self) -> bool {
        if !self.session.is_following() {
            return false;
        }
        match self.session.refresh().await {
            Ok(grew) => grew,
            Err(error) => {
                tracing::debug!(%error, "Refresh failed");
                true
            }
        }
    }

    async fn handle_input_tick(&mut self, terminal: &mut Tui) -> Result<bool> {
        if !term_event::poll(Duration::from_millis(0))? {
            return Ok(false);
        }

        match term_event::read()? {
            TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                self.handle_key_press(key, terminal).await
            }
            TermEvent::Resize(_, _) => {
                self.render(terminal)?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    async fn handle_key_press(&mut self, key: KeyEvent, terminal: &mut Tui) -> Result<bool> {
        let action = self.input.handle_key(key, &self.app_state.mode);
        if action == KeyAction::None {
            return Ok(false);
        }
        if action == KeyAction::Quit {
            return Ok(true);
        }

        self.apply(action).await;
        self.render(terminal)?;
        Ok(false)
    }

    async fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Playback(command) => self.command(command).await,
            KeyAction::ZoomIn => self.app_state.viewport.zoom_in(),
            KeyAction::ZoomOut => self.app_state.viewport.zoom_out(),
            KeyAction::Pan { dx, dy } => self.app_state.viewport.pan_by(dx, dy),
            KeyAction::ResetView => self.app_state.viewport.reset(),
            KeyAction::ToggleLegend => self.app_state.show_legend = !self.app_state.show_legend,
            KeyAction::Examine => {
                let start = self.examine_start();
                self.app_state.enter_examine(start);
            }
            KeyAction::MoveCursor(direction) => self.app_state.move_cursor(direction),
            KeyAction::OpenPrompt(kind) => {
                let initial = match kind {
                    PromptKind::Open => self
                        .session
                        .store()
                        .map(|store| store.path().display().to_string())
                        .unwrap_or_default(),
                    PromptKind::GoTo => String::new(),
                };
                self.app_state.open_prompt(kind, initial);
            }
            KeyAction::PromptInput(ch) => self.app_state.prompt_push(ch),
            KeyAction::PromptBackspace => self.app_state.prompt_backspace(),
            KeyAction::PromptSubmit => {
                if let Some((kind, text)) = self.app_state.take_prompt() {
                    self.submit(kind, text.trim()).await;
                }
            }
            KeyAction::Unload => {
                if self.session.store().is_some() {
                    self.session.unload();
                    self.app_state.exit_mode();
                    self.session.messages_mut().info(None, "Replay unloaded");
                }
            }
            KeyAction::Refresh => self.refresh_now().await,
            KeyAction::Back => self.app_state.exit_mode(),
            KeyAction::Quit | KeyAction::None => {}
        }
    }

    async fn command(&mut self, command: PlaybackCommand) {
        // Failures are already in the message log.
        if let Err(error) = self.session.handle(command).await {
            tracing::debug!(?command, %error, "Playback command failed");
        }
    }

    async fn refresh_now(&mut self) {
        if self.session.store().is_none() {
            return;
        }
        match self.session.refresh().await {
            Ok(grew) => {
                let position = self.session.position();
                let text = if grew {
                    format!("{} turns stored", self.session.playback().turn_count())
                } else {
                    "No new turns".to_string()
                };
                self.session.messages_mut().info(position, text);
            }
            Err(error) => tracing::debug!(%error, "Manual refresh failed"),
        }
    }

    async fn submit(&mut self, kind: PromptKind, text: &str) {
        if text.is_empty() {
            return;
        }
        match kind {
            PromptKind::GoTo => match text.parse::<i64>() {
                Ok(turn) => self.command(PlaybackCommand::Scrub(turn)).await,
                Err(_) => {
                    let position = self.session.position();
                    self.session
                        .messages_mut()
                        .warn(position, format!("Not a turn number: {text}"));
                }
            },
            PromptKind::Open => match SqliteSnapshotStore::open(text).await {
                Ok(store) => {
                    self.app_state.viewport.reset();
                    if let Err(error) = self.session.load(store).await {
                        if self.session.store().is_some() {
                            tracing::warn!(
                                path = text,
                                %error,
                                "Replay loaded but its first turn is unreadable"
                            );
                        } else {
                            tracing::warn!(path = text, %error, "Failed to load replay");
                        }
                    }
                }
                Err(error) => {
                    tracing::warn!(path = text, %error, "Failed to open replay");
                    self.session
                        .messages_mut()
                        .error(None, format!("Cannot open {text}: {error}"));
                }
            },
        }
    }

    /// Main anthill cell, else the first ant, else the origin.
    fn examine_start(&self) -> HexCoord {
        let Some(snapshot) = self.session.current() else {
            return HexCoord::ORIGIN;
        };
        snapshot
            .spot
            .or_else(|| {
                snapshot
                    .entities_of(EntityCategory::Ant)
                    .next()
                    .map(|ant| ant.position)
            })
            .unwrap_or(HexCoord::ORIGIN)
    }

    fn render(&self, terminal: &mut Tui) -> Result<()> {
        ui::render(terminal, &self.session, &self.app_state, &self.ui)
    }
}
