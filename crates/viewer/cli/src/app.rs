//! Glue code tying the replay session and terminal UI together.
use anyhow::Result;
use async_trait::async_trait;
use replay_store::SqliteSnapshotStore;
use viewer_core::{FrontendApp, ReplaySession, ViewerConfig};

use crate::config::CliConfig;
use crate::event::EventLoop;
use crate::presentation::terminal;

pub struct CliApp {
    viewer: ViewerConfig,
    cli: CliConfig,
    store: Option<SqliteSnapshotStore>,
}

impl CliApp {
    pub fn new(viewer: ViewerConfig, cli: CliConfig) -> Self {
        Self {
            viewer,
            cli,
            store: None,
        }
    }

    /// Replay loaded before the first frame is drawn.
    #[must_use]
    pub fn with_store(mut self, store: SqliteSnapshotStore) -> Self {
        self.store = Some(store);
        self
    }

    pub async fn execute(self) -> Result<()> {
        tracing::info!("Viewer starting...");

        let CliApp { viewer, cli, store } = self;

        let mut session = ReplaySession::new(&viewer);
        match store {
            Some(store) => {
                // Either failure stays visible in the message log.
                if let Err(error) = session.load(store).await {
                    if session.store().is_some() {
                        tracing::warn!(%error, "Replay loaded but its first turn is unreadable");
                    } else {
                        tracing::warn!(%error, "Initial replay rejected");
                    }
                }
            }
            None => session
                .messages_mut()
                .info(None, "Press [o] to open a replay database"),
        }

        let mut terminal = terminal::init()?;
        let _guard = terminal::TerminalGuard;

        let event_loop = EventLoop::new(session, cli.ui, viewer.follow.interval);
        let outcome = event_loop.run(&mut terminal).await;

        terminal::restore()?;
        tracing::info!("Viewer exiting");

        outcome
    }
}

#[async_trait]
impl FrontendApp for CliApp {
    async fn run(self) -> Result<()> {
        self.execute().await
    }
}
