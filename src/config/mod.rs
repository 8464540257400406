//! Configuration loading and management

mod io;
mod settings;

pub use settings::{
    BackendKind, LeaderboardSettings, PlayerSettings, SessionSettings, StoreSettings,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::session::TallyFile;
use crate::store::{
    MemoryProfileStore, OfflineStore, ProfileStore, SheetProfileStore, SqliteProfileStore,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Where profiles live
    #[serde(default)]
    pub store: StoreSettings,

    /// Default player
    #[serde(default)]
    pub player: PlayerSettings,

    #[serde(default)]
    pub leaderboard: LeaderboardSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl Config {
    /// Open the configured profile store.
    ///
    /// Never fails: a backend that cannot be opened is replaced by an
    /// [`OfflineStore`] and the session plays without saving.
    pub fn open_store(&self) -> Box<dyn ProfileStore> {
        let path = self.store.resolved_path();
        let opened: anyhow::Result<Box<dyn ProfileStore>> = match (self.store.backend, path) {
            (BackendKind::None, _) => {
                return Box::new(OfflineStore::new("no profile store configured"));
            }
            (BackendKind::Memory, _) => Ok(Box::new(MemoryProfileStore::new())),
            (BackendKind::Sqlite, Some(path)) => {
                debug!(path = %path.display(), "opening sqlite store");
                SqliteProfileStore::open(&path).map(|s| Box::new(s) as Box<dyn ProfileStore>)
            }
            (BackendKind::Sheet, Some(path)) => {
                debug!(path = %path.display(), "opening sheet store");
                SheetProfileStore::open(&path).map(|s| Box::new(s) as Box<dyn ProfileStore>)
            }
            (backend, None) => Err(anyhow::anyhow!("no path for {:?} store", backend)),
        };

        match opened {
            Ok(store) => store,
            Err(e) => {
                warn!("Profile store unavailable, progress will not be saved: {:#}", e);
                Box::new(OfflineStore::new(format!("{:#}", e)))
            }
        }
    }
    pub fn tally_file(&self) -> TallyFile {
        TallyFile::new(self.session.resolved_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_sections_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.store.backend, BackendKind::Sqlite);
        assert_eq!(config.leaderboard.size, 10);
        assert!(config.player.name.is_none());
    }

    #[test]
    fn test_parse_sections() {
        let config: Config = toml::from_str(
            r#"
            [store]
            backend = "sheet"
            path = "/srv/arcade/profiles.json"

            [player]
            name = "Lou"

            [leaderboard]
            size = 3

            [session]
            file = "/tmp/arcade-session.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.backend, BackendKind::Sheet);
        assert_eq!(
            config.store.resolved_path().unwrap(),
            std::path::PathBuf::from("/srv/arcade/profiles.json")
        );
        assert_eq!(config.player.name.as_deref(), Some("Lou"));
        assert_eq!(config.leaderboard.size, 3);
        assert_eq!(
            config.tally_file().path(),
            std::path::Path::new("/tmp/arcade-session.json")
        );
    }

    #[test]
    fn test_default_paths_live_under_arcade_dir() {
        let sqlite = StoreSettings::default().resolved_path().unwrap();
        assert!(sqlite.ends_with(".arcade/profiles.db"));
        let memory = StoreSettings {
            backend: BackendKind::Memory,
            path: None,
        };
        assert!(memory.resolved_path().is_none());
        let session = SessionSettings::default().resolved_file();
        assert!(session.ends_with(".arcade/session.json"));
    }

    #[test]
    fn test_open_store_by_backend() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();

        config.store.backend = BackendKind::None;
        assert_eq!(config.open_store().backend(), "offline");

        config.store.backend = BackendKind::Memory;
        assert_eq!(config.open_store().backend(), "memory");

        config.store.backend = BackendKind::Sqlite;
        config.store.path = Some(dir.path().join("p.db"));
        assert_eq!(config.open_store().backend(), "sqlite");

        config.store.backend = BackendKind::Sheet;
        config.store.path = Some(dir.path().join("p.json"));
        assert_eq!(config.open_store().backend(), "sheet");
    }

    #[test]
    fn test_unopenable_store_falls_back_offline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "not a workbook").unwrap();

        let config = Config {
            store: StoreSettings {
                backend: BackendKind::Sheet,
                path: Some(path),
            },
            ..Default::default()
        };
        let store = config.open_store();
        assert_eq!(store.backend(), "offline");
        assert!(store.count().is_err());
    }
}
