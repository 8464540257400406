//! Placeholder store used when no backend is configured or reachable

use super::{ProfileStore, StoreError, StoreResult};
use crate::domain::Profile;

/// A store that refuses every call. Sessions bound to it play locally.
#[derive(Debug, Clone)]
pub struct OfflineStore {
    reason: String,
}

impl OfflineStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn fail<T>(&self) -> StoreResult<T> {
        Err(StoreError::unavailable(self.backend(), &self.reason))
    }
}

impl ProfileStore for OfflineStore {
    fn backend(&self) -> &'static str {
        "offline"
    }

    fn find(&self, _name: &str) -> StoreResult<Option<Profile>> {
        self.fail()
    }

    fn create(&self, _profile: &Profile) -> StoreResult<()> {
        self.fail()
    }

    fn update(&self, _profile: &Profile) -> StoreResult<()> {
        self.fail()
    }

    fn top_n(&self, _n: usize) -> StoreResult<Vec<Profile>> {
        self.fail()
    }

    fn count_ahead_of(&self, _points: u64) -> StoreResult<u64> {
        self.fail()
    }

    fn count(&self) -> StoreResult<u64> {
        self.fail()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_call_fails_with_reason() {
        let store = OfflineStore::new("saving disabled");
        let err = store.update(&Profile::new("x")).unwrap_err();
        assert_eq!(err.to_string(), "offline backend unavailable: saving disabled");
        assert!(store.rank("x").is_err());
    }
}
