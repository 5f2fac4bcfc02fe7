//! SQLite-backed [`SnapshotStore`].
//!
//! The game client appends one row per turn to `Areas(Date, Json)`. Turn
//! index `N` is the `N`-th row in `Date` order, ties broken by `rowid`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use replay_core::Snapshot;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::codec::{CodecError, decode_record};
use crate::error::{Result, StoreError};
use crate::traits::{SnapshotStore, StoreSummary, checked_turn};

/// Table holding one arena document per turn.
pub const TABLE_NAME: &str = "Areas";

const REQUIRED_COLUMNS: [&str; 2] = ["Date", "Json"];

/// Read-only reader over a SQLite snapshot file.
///
/// Uses a single pooled connection; queries run one at a time.
pub struct SqliteSnapshotStore {
    path: PathBuf,
    pool: SqlitePool,
}

impl SqliteSnapshotStore {
    /// Opens `path` read-only.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if the file does not exist and
    /// [`StoreError::Database`] if SQLite refuses to open it.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !tokio::fs::try_exists(&path).await? {
            return Err(StoreError::NotFound(path.display().to_string()));
        }

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .read_only(true)
            .create_if_missing(false);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        tracing::debug!(path = %path.display(), "Opened snapshot store");
        Ok(Self { path, pool })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the underlying connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    async fn has_table(&self) -> Result<bool> {
        let name: Option<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
        )
        .bind(TABLE_NAME)
        .fetch_optional(&self.pool)
        .await?;
        Ok(name.is_some())
    }

    async fn columns(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("PRAGMA table_info(Areas)")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(StoreError::from))
            .collect()
    }

    async fn row_count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Areas")
            .fetch_one(&self.pool)
            .await?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    /// Timestamp of the first (`ascending`) or last row.
    async fn edge_timestamp(&self, ascending: bool) -> Result<Option<String>> {
        let sql = if ascending {
            "SELECT CAST(Date AS TEXT) FROM Areas ORDER BY Date ASC, rowid ASC LIMIT 1"
        } else {
            "SELECT CAST(Date AS TEXT) FROM Areas ORDER BY Date DESC, rowid DESC LIMIT 1"
        };
        let stamp: Option<Option<String>> = sqlx::query_scalar(sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(stamp.flatten())
    }
}

#[async_trait]
impl SnapshotStore for SqliteSnapshotStore {
    async fn turn_count(&self) -> Result<u64> {
        if !self.has_table().await? {
            return Err(StoreError::NotFound(format!(
                "{} has no {TABLE_NAME} table",
                self.path.display()
            )));
        }
        match self.row_count().await? {
            0 => Err(StoreError::NotFound(format!(
                "{} holds no turns",
                self.path.display()
            ))),
            count => Ok(count),
        }
    }

    async fn snapshot(&self, turn: i64) -> Result<Snapshot> {
        let count = self.turn_count().await?;
        let index = checked_turn(turn, count)?;

        let row = sqlx::query(
            "SELECT CAST(Date AS TEXT) AS recorded_at,
                    CASE WHEN typeof(Json) = 'text' THEN Json END AS body
             FROM Areas
             ORDER BY Date ASC, rowid ASC
             LIMIT 1 OFFSET ?1",
        )
        .bind(index as i64)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::OutOfRange { turn, count })?;

        let recorded_at: Option<String> = row.try_get("recorded_at")?;
        let body: Option<String> = row.try_get("body")?;
        let body = body.ok_or_else(|| StoreError::corrupt(index, CodecError::NotText))?;

        decode_record(index, recorded_at, &body).map_err(|error| {
            tracing::warn!(turn = index, %error, "Corrupt snapshot record");
            StoreError::corrupt(index, error)
        })
    }

    async fn validate(&self) -> Result<StoreSummary> {
        if !tokio::fs::try_exists(&self.path).await? {
            return Err(StoreError::NotFound(self.path.display().to_string()));
        }
        if !self.has_table().await? {
            return Err(StoreError::SchemaMismatch(format!(
                "missing table {TABLE_NAME}"
            )));
        }

        let columns = self.columns().await?;
        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c.eq_ignore_ascii_case(required)) {
                return Err(StoreError::SchemaMismatch(format!(
                    "{TABLE_NAME} has no {required} column"
                )));
            }
        }

        let turn_count = self.row_count().await?;
        if turn_count == 0 {
            return Err(StoreError::NotFound(format!(
                "{} holds no turns",
                self.path.display()
            )));
        }

        let summary = StoreSummary {
            source: self.source(),
            turn_count,
            first_recorded_at: self.edge_timestamp(true).await?,
            last_recorded_at: self.edge_timestamp(false).await?,
        };
        tracing::info!(source = %summary.source, turns = turn_count, "Validated snapshot store");
        Ok(summary)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}
