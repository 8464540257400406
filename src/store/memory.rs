//! In-memory profile store
//!
//! Rows go through the codec exactly like the durable backends, so this
//! store behaves the same way minus durability.

use std::sync::{Mutex, MutexGuard};

use super::codec::{self, ProfileRow};
use super::{ProfileStore, StoreError, StoreResult, decode_logged};
use crate::domain::{Profile, name_key};

const BACKEND: &str = "memory";

/// Profiles held in process memory, in insertion order
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    rows: Mutex<Vec<ProfileRow>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with rows, e.g. for tests or demos
    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let rows = profiles.into_iter().map(|p| codec::encode(&p)).collect();
        Self {
            rows: Mutex::new(rows),
        }
    }

    fn rows(&self) -> StoreResult<MutexGuard<'_, Vec<ProfileRow>>> {
        self.rows
            .lock()
            .map_err(|_| StoreError::unavailable(BACKEND, "store lock poisoned"))
    }
}

fn position(rows: &[ProfileRow], name: &str) -> Option<usize> {
    let key = name_key(name);
    rows.iter().position(|row| name_key(&row.name) == key)
}

impl ProfileStore for MemoryProfileStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn find(&self, name: &str) -> StoreResult<Option<Profile>> {
        let rows = self.rows()?;
        Ok(position(&rows, name).map(|idx| decode_logged(BACKEND, &rows[idx])))
    }

    fn create(&self, profile: &Profile) -> StoreResult<()> {
        let mut rows = self.rows()?;
        if position(&rows, &profile.name).is_none() {
            rows.push(codec::encode(profile));
        }
        Ok(())
    }

    fn update(&self, profile: &Profile) -> StoreResult<()> {
        let mut rows = self.rows()?;
        let row = codec::encode(profile);
        match position(&rows, &profile.name) {
            Some(idx) => rows[idx] = row,
            None => rows.push(row),
        }
        Ok(())
    }

    fn top_n(&self, n: usize) -> StoreResult<Vec<Profile>> {
        let rows = self.rows()?;
        let mut profiles: Vec<Profile> = rows.iter().map(|r| decode_logged(BACKEND, r)).collect();
        // stable: ties keep insertion order
        profiles.sort_by(|a, b| b.points.cmp(&a.points));
        profiles.truncate(n);
        Ok(profiles)
    }

    fn count_ahead_of(&self, points: u64) -> StoreResult<u64> {
        let rows = self.rows()?;
        Ok(rows
            .iter()
            .map(|r| codec::decode(r).profile.points)
            .filter(|p| *p > points)
            .count() as u64)
    }

    fn count(&self) -> StoreResult<u64> {
        Ok(self.rows()?.len() as u64)
    }
}
