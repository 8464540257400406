//! Session counters kept between processes
//!
//! One JSON object keyed by player key. Written under an fs2 lock through a
//! temp file, the same way the config file is saved.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use tracing::{debug, warn};

use crate::domain::{SessionTally, name_key};

pub struct TallyFile {
    path: PathBuf,
}

impl TallyFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Counters for `name`. A missing or unreadable file starts a fresh session.
    pub fn load(&self, name: &str) -> SessionTally {
        match self.read_all() {
            Ok(mut all) => all.remove(&name_key(name)).unwrap_or_default(),
            Err(e) => {
                warn!(path = %self.path.display(), "Ignoring session file: {:#}", e);
                SessionTally::default()
            }
        }
    }

    pub fn save(&self, name: &str, tally: &SessionTally) -> Result<()> {
        self.rewrite(|all| {
            all.insert(name_key(name), *tally);
        })
    }

    /// Forget the counters for `name`. Returns whether there were any.
    pub fn clear(&self, name: &str) -> Result<bool> {
        let mut removed = false;
        self.rewrite(|all| removed = all.remove(&name_key(name)).is_some())?;
        Ok(removed)
    }

    fn read_all(&self) -> Result<BTreeMap<String, SessionTally>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", self.path.display()))
    }

    fn rewrite(&self, change: impl FnOnce(&mut BTreeMap<String, SessionTally>)) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory: {}", parent.display())
            })?;
        }

        let lock_path = self.path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .with_context(|| "Failed to acquire session lock")?;

        // a garbled file is replaced rather than blocking play
        let mut all = self.read_all().unwrap_or_default();
        change(&mut all);
        let content =
            serde_json::to_string_pretty(&all).with_context(|| "Failed to serialize session")?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;
        temp_file
            .write_all(content.as_bytes())
            .with_context(|| "Failed to write session file")?;
        temp_file
            .sync_all()
            .with_context(|| "Failed to sync session file")?;

        std::fs::rename(&temp_path, &self.path).with_context(|| {
            format!("Failed to rename session file: {}", self.path.display())
        })?;
        debug!(path = %self.path.display(), players = all.len(), "session file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tally(total_wins: u32, consecutive_wins: u32) -> SessionTally {
        SessionTally {
            total_wins,
            consecutive_wins,
            secret_unlocked: false,
        }
    }

    #[test]
    fn test_missing_file_is_fresh_session() {
        let dir = tempdir().unwrap();
        let file = TallyFile::new(dir.path().join("nested/session.json"));
        assert_eq!(file.load("Ana"), SessionTally::default());
    }

    #[test]
    fn test_counters_are_per_player() {
        let dir = tempdir().unwrap();
        let file = TallyFile::new(dir.path().join("session.json"));
        file.save("Ana", &tally(4, 2)).unwrap();
        file.save("Bo", &tally(1, 1)).unwrap();

        let reopened = TallyFile::new(file.path());
        assert_eq!(reopened.load(" ANA "), tally(4, 2));
        assert_eq!(reopened.load("bo"), tally(1, 1));
        assert_eq!(reopened.load("Cy"), SessionTally::default());
    }

    #[test]
    fn test_clear_resets_one_player() {
        let dir = tempdir().unwrap();
        let file = TallyFile::new(dir.path().join("session.json"));
        file.save("Ana", &tally(4, 2)).unwrap();
        file.save("Bo", &tally(1, 1)).unwrap();

        assert!(file.clear("ana").unwrap());
        assert!(!file.clear("ana").unwrap());
        assert_eq!(file.load("Ana"), SessionTally::default());
        assert_eq!(file.load("Bo"), tally(1, 1));
    }

    #[test]
    fn test_garbled_file_is_replaced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let file = TallyFile::new(&path);
        assert_eq!(file.load("Ana"), SessionTally::default());
        file.save("Ana", &tally(1, 1)).unwrap();
        assert_eq!(file.load("Ana"), tally(1, 1));
    }
}
