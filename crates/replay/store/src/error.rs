//! Error types raised by snapshot stores.

use thiserror::Error;

use crate::codec::CodecError;

/// Errors surfaced by [`SnapshotStore`](crate::SnapshotStore) implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store not found: {0}")]
    NotFound(String),

    #[error("turn {turn} is out of range (store holds {count} turns)")]
    OutOfRange { turn: i64, count: u64 },

    #[error("turn {turn} is corrupt: {reason}")]
    CorruptRecord { turn: u64, reason: String },

    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Coarse classification shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    OutOfRange,
    CorruptData,
    Io,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not found",
            Self::OutOfRange => "out of range",
            Self::CorruptData => "corrupt data",
            Self::Io => "I/O",
        }
    }
}

impl StoreError {
    pub(crate) fn corrupt(turn: u64, error: CodecError) -> Self {
        Self::CorruptRecord {
            turn,
            reason: error.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::CorruptRecord { .. } | Self::SchemaMismatch(_) => ErrorKind::CorruptData,
            Self::Io(_) => ErrorKind::Io,
            Self::Database(error) => match error {
                sqlx::Error::RowNotFound => ErrorKind::NotFound,
                sqlx::Error::ColumnDecode { .. }
                | sqlx::Error::Decode(_)
                | sqlx::Error::TypeNotFound { .. }
                | sqlx::Error::ColumnNotFound(_) => ErrorKind::CorruptData,
                _ => ErrorKind::Io,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_variants() {
        assert_eq!(StoreError::NotFound("x".into()).kind(), ErrorKind::NotFound);
        assert_eq!(
            StoreError::OutOfRange { turn: -1, count: 3 }.kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            StoreError::SchemaMismatch("no Json column".into()).kind(),
            ErrorKind::CorruptData
        );
        assert_eq!(
            StoreError::Database(sqlx::Error::RowNotFound).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            StoreError::Database(sqlx::Error::PoolTimedOut).kind(),
            ErrorKind::Io
        );
    }

    #[test]
    fn messages_name_the_turn() {
        let error = StoreError::OutOfRange { turn: 12, count: 12 };
        assert_eq!(
            error.to_string(),
            "turn 12 is out of range (store holds 12 turns)"
        );
    }
}
