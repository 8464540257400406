//! Profile storage
//!
//! Durable per-player profiles behind one [`ProfileStore`] trait, with a
//! relational backend (SQLite), a spreadsheet-style workbook file, an
//! in-memory store and an always-offline placeholder.
//!
//! ```text
//! SessionController ──► ProfileStore ──► codec ──► rows / cells
//!        Leaderboard ──┘
//! ```
//!
//! `create` is idempotent and `update` is last-write-wins. Nothing here
//! retries.

pub mod codec;
mod memory;
mod offline;
mod sheet;
mod sqlite;

pub use codec::{Decoded, FieldIssue, ProfileRow};
pub use memory::MemoryProfileStore;
pub use offline::OfflineStore;
pub use sheet::SheetProfileStore;
pub use sqlite::SqliteProfileStore;

use tracing::warn;

use crate::domain::Profile;

/// Store failures. All of them are recoverable at the session level.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection, I/O, lock or backing-file parse failure
    #[error("{backend} backend unavailable: {reason}")]
    Unavailable {
        backend: &'static str,
        reason: String,
    },
}

impl StoreError {
    pub fn unavailable(backend: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            backend,
            reason: reason.to_string(),
        }
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Durable key-value access to profiles by player name, plus ranking
pub trait ProfileStore: Send + Sync {
    /// Short backend label for logs and warnings
    fn backend(&self) -> &'static str;

    /// Look a profile up by name (case-insensitive)
    fn find(&self, name: &str) -> StoreResult<Option<Profile>>;

    /// Insert a new profile. An existing row for the same name is left as it
    /// is and still counts as success.
    fn create(&self, profile: &Profile) -> StoreResult<()>;

    /// Insert or overwrite the profile's row
    fn update(&self, profile: &Profile) -> StoreResult<()>;

    /// Up to `n` profiles, points descending, ties in insertion order
    fn top_n(&self, n: usize) -> StoreResult<Vec<Profile>>;

    /// Number of stored profiles with strictly more points than `points`
    fn count_ahead_of(&self, points: u64) -> StoreResult<u64>;

    /// Number of stored profiles
    fn count(&self) -> StoreResult<u64>;

    /// 1-based rank by points. A player without a row gets a zero-point row
    /// first.
    fn rank(&self, name: &str) -> StoreResult<u64> {
        let points = match self.find(name)? {
            Some(profile) => profile.points,
            None => {
                self.create(&Profile::new(name))?;
                0
            }
        };
        Ok(self.count_ahead_of(points)? + 1)
    }
}

/// Decode a stored row, logging any fields that had to be defaulted
pub(crate) fn decode_logged(backend: &'static str, row: &ProfileRow) -> Profile {
    let Decoded { profile, issues } = codec::decode(row);
    for issue in &issues {
        warn!(backend, player = %profile.name, "malformed profile field: {}", issue);
    }
    profile
}
