//! Configuration sections

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Config;

/// Which profile store to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Local SQLite database
    #[default]
    Sqlite,
    /// Shared workbook file, one row per player
    Sheet,
    /// Nothing persists past the process
    Memory,
    /// Play without saving
    None,
}

impl BackendKind {
    fn default_file(&self) -> Option<&'static str> {
        match self {
            Self::Sqlite => Some("profiles.db"),
            Self::Sheet => Some("profiles.json"),
            Self::Memory | Self::None => None,
        }
    }
}

/// `[store]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: BackendKind,

    /// Database or workbook path; defaults to a file under ~/.arcade/
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl StoreSettings {
    /// Path the backend reads and writes, if it uses a file at all
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }
        self.backend
            .default_file()
            .map(|file| Config::global_config_dir().join(file))
    }
}

/// `[player]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSettings {
    /// Player used when `--player` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// `[leaderboard]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    /// Rows shown by `arcade leaderboard`
    #[serde(default = "default_leaderboard_size")]
    pub size: usize,
}

fn default_leaderboard_size() -> usize {
    10
}

impl Default for LeaderboardSettings {
    fn default() -> Self {
        Self {
            size: default_leaderboard_size(),
        }
    }
}

/// `[session]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Win counters carried between commands; defaults to ~/.arcade/session.json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl SessionSettings {
    pub fn resolved_file(&self) -> PathBuf {
        self.file
            .clone()
            .unwrap_or_else(|| Config::global_config_dir().join("session.json"))
    }
}
