//! Trait describing a runnable viewer front-end.
use anyhow::Result;
use async_trait::async_trait;

/// A front-end that drives a replay until the user quits.
///
/// Implementations own their drawing surface and their
/// [`ReplaySession`](crate::ReplaySession); the binary only constructs and
/// runs them.
///
/// # Implementations
///
/// - `CliApp`: terminal UI (ratatui + crossterm)
#[async_trait]
pub trait FrontendApp: Send {
    async fn run(self) -> Result<()>
    where
        Self: Sized;
}
