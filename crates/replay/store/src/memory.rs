//! In-memory [`SnapshotStore`] for tests and demos.

use std::sync::RwLock;

use async_trait::async_trait;
use replay_core::Snapshot;

use crate::codec::{CodecError, decode_record};
use crate::error::{Result, StoreError};
use crate::traits::{SnapshotStore, StoreSummary, checked_turn};

/// One stored row: timestamp and raw body.
#[derive(Clone, Debug)]
struct RawRecord {
    recorded_at: Option<String>,
    body: Option<String>,
}

/// Raw records kept in insertion order and decoded on read.
///
/// Records can be appended while a viewer holds the store, which mirrors a
/// database still being written by the game client.
pub struct InMemorySnapshotStore {
    name: String,
    records: RwLock<Vec<RawRecord>>,
}

impl InMemorySnapshotStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: RwLock::new(Vec::new()),
        }
    }

    /// Builds a store from JSON bodies, one per turn.
    pub fn from_bodies<I, S>(name: impl Into<String>, bodies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new(name);
        if let Ok(mut records) = store.records.write() {
            records.extend(bodies.into_iter().map(|body| RawRecord {
                recorded_at: None,
                body: Some(body.into()),
            }));
        }
        store
    }

    pub fn push(&self, recorded_at: Option<String>, body: impl Into<String>) -> Result<()> {
        self.push_raw(recorded_at, Some(body.into()))
    }

    /// Inserts a row at `index`, shifting later turns up by one.
    ///
    /// Models a late write carrying an earlier timestamp, which lands in the
    /// middle of a date-ordered table. `index` is clamped to the row count.
    pub fn insert(
        &self,
        index: usize,
        recorded_at: Option<String>,
        body: impl Into<String>,
    ) -> Result<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let index = index.min(records.len());
        records.insert(
            index,
            RawRecord {
                recorded_at,
                body: Some(body.into()),
            },
        );
        Ok(())
    }

    /// Appends a row whose body is not text.
    pub fn push_binary(&self, recorded_at: Option<String>) -> Result<()> {
        self.push_raw(recorded_at, None)
    }

    fn push_raw(&self, recorded_at: Option<String>, body: Option<String>) -> Result<()> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.push(RawRecord { recorded_at, body });
        Ok(())
    }

    fn len(&self) -> Result<u64> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.len() as u64)
    }
}

fn poisoned() -> StoreError {
    StoreError::Io(std::io::Error::other("in-memory store lock was poisoned"))
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn turn_count(&self) -> Result<u64> {
        match self.len()? {
            0 => Err(StoreError::NotFound(format!("{} holds no turns", self.name))),
            count => Ok(count),
        }
    }

    async fn snapshot(&self, turn: i64) -> Result<Snapshot> {
        self.turn_count().await?;
        let (index, record) = {
            let records = self.records.read().map_err(|_| poisoned())?;
            let index = checked_turn(turn, records.len() as u64)?;
            (index, records[index as usize].clone())
        };
        let body = record
            .body
            .ok_or_else(|| StoreError::corrupt(index, CodecError::NotText))?;
        decode_record(index, record.recorded_at, &body).map_err(|e| StoreError::corrupt(index, e))
    }

    async fn validate(&self) -> Result<StoreSummary> {
        let records = self.records.read().map_err(|_| poisoned())?;
        let (Some(first), Some(last)) = (records.first(), records.last()) else {
            return Err(StoreError::NotFound(format!("{} holds no turns", self.name)));
        };
        Ok(StoreSummary {
            source: self.name.clone(),
            turn_count: records.len() as u64,
            first_recorded_at: first.recorded_at.clone(),
            last_recorded_at: last.recorded_at.clone(),
        })
    }

    fn source(&self) -> String {
        self.name.clone()
    }
}
