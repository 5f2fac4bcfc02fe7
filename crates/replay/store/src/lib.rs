//! Read-only access to recorded arena snapshots.
//!
//! [`SnapshotStore`] is the contract the viewer depends on. Two readers
//! implement it:
//! - [`SqliteSnapshotStore`]: the `Areas(Date, Json)` table of a SQLite file.
//! - [`InMemorySnapshotStore`]: raw records held in memory (tests, demos).
//!
//! Both decode the stored JSON with the same [`codec`].

pub mod codec;
mod error;
mod memory;
mod sqlite;
mod traits;

pub use codec::{CodecError, decode_record};
pub use error::{ErrorKind, Result, StoreError};
pub use memory::InMemorySnapshotStore;
pub use sqlite::{SqliteSnapshotStore, TABLE_NAME};
pub use traits::{SnapshotStore, StoreSummary};
