//! Contract for reading recorded snapshots.

use async_trait::async_trait;
use replay_core::Snapshot;

use crate::error::{Result, StoreError};

/// Outcome of a successful [`SnapshotStore::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreSummary {
    pub source: String,
    pub turn_count: u64,
    pub first_recorded_at: Option<String>,
    pub last_recorded_at: Option<String>,
}

/// Read-only access to turn snapshots, keyed by 0-based turn index.
///
/// Implementations hold no playback state; callers own the position.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Number of stored turns.
    ///
    /// Fails with [`StoreError::NotFound`] when the store is missing or empty.
    async fn turn_count(&self) -> Result<u64>;

    /// Snapshot at `turn`.
    ///
    /// Fails with [`StoreError::OutOfRange`] unless `0 <= turn < turn_count()`,
    /// and with [`StoreError::CorruptRecord`] when the row cannot be decoded.
    async fn snapshot(&self, turn: i64) -> Result<Snapshot>;

    /// Checks the schema and that at least one turn exists. Never repairs.
    async fn validate(&self) -> Result<StoreSummary>;

    /// Human-readable origin, for status lines.
    fn source(&self) -> String;

    async fn is_valid(&self) -> bool {
        self.validate().await.is_ok()
    }

    /// Most recent snapshot.
    async fn latest(&self) -> Result<Snapshot> {
        let count = self.turn_count().await?;
        self.snapshot(count as i64 - 1).await
    }
}

/// Maps `turn` to an index below `count`.
pub(crate) fn checked_turn(turn: i64, count: u64) -> Result<u64> {
    u64::try_from(turn)
        .ok()
        .filter(|&index| index < count)
        .ok_or(StoreError::OutOfRange { turn, count })
}
