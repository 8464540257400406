//! Shared test utilities for store and session tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arcade_progress::domain::Profile;
use arcade_progress::store::{MemoryProfileStore, ProfileStore, StoreError, StoreResult};

pub fn profile(name: &str, points: u64) -> Profile {
    let mut p = Profile::new(name);
    p.points = points;
    p
}

/// Memory store with the leaderboard fixture loaded
pub fn seeded_store(entries: &[(&str, u64)]) -> MemoryProfileStore {
    MemoryProfileStore::with_profiles(entries.iter().map(|(n, p)| profile(n, *p)))
}

/// A memory store that can be switched off mid-test
pub struct FlakyStore {
    inner: Arc<MemoryProfileStore>,
    down: Arc<AtomicBool>,
}

/// Test-side handle to a [`FlakyStore`] owned by a session
#[derive(Clone)]
pub struct FlakyHandle {
    pub inner: Arc<MemoryProfileStore>,
    down: Arc<AtomicBool>,
}

impl FlakyHandle {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

impl FlakyStore {
    pub fn new() -> (Self, FlakyHandle) {
        let inner = Arc::new(MemoryProfileStore::new());
        let down = Arc::new(AtomicBool::new(false));
        let handle = FlakyHandle {
            inner: Arc::clone(&inner),
            down: Arc::clone(&down),
        };
        (Self { inner, down }, handle)
    }

    fn check(&self) -> StoreResult<()> {
        if self.down.load(Ordering::SeqCst) {
            Err(StoreError::unavailable("flaky", "connection refused"))
        } else {
            Ok(())
        }
    }
}

impl ProfileStore for FlakyStore {
    fn backend(&self) -> &'static str {
        "flaky"
    }

    fn find(&self, name: &str) -> StoreResult<Option<Profile>> {
        self.check()?;
        self.inner.find(name)
    }

    fn create(&self, profile: &Profile) -> StoreResult<()> {
        self.check()?;
        self.inner.create(profile)
    }

    fn update(&self, profile: &Profile) -> StoreResult<()> {
        self.check()?;
        self.inner.update(profile)
    }

    fn top_n(&self, n: usize) -> StoreResult<Vec<Profile>> {
        self.check()?;
        self.inner.top_n(n)
    }

    fn count_ahead_of(&self, points: u64) -> StoreResult<u64> {
        self.check()?;
        self.inner.count_ahead_of(points)
    }

    fn count(&self) -> StoreResult<u64> {
        self.check()?;
        self.inner.count()
    }
}
