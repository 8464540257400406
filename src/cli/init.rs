//! Init command implementation

use anyhow::{Result, bail};
use std::path::PathBuf;

use arcade_progress::config::Config;

/// Default configuration content for arcade init
pub const DEFAULT_CONFIG: &str = r#"# Arcade Progress Configuration
# =============================

# ============================================================================
# STORE - Where player profiles are kept
# ============================================================================
#
# Available options:
#   backend - "sqlite" (default), "sheet", "memory" or "none"
#             sheet: a JSON workbook, one row per player, safe to share
#             memory: nothing survives the process
#             none: play without saving
#   path    - Database or workbook file
#             (default: ~/.arcade/profiles.db, or ~/.arcade/profiles.json for sheet)

[store]
backend = "sqlite"
# path = "/path/to/profiles.db"

# ============================================================================
# PLAYER
# ============================================================================
#
# Used when --player is not given

[player]
# name = "your name"

# ============================================================================
# LEADERBOARD
# ============================================================================

[leaderboard]
size = 10

# ============================================================================
# SESSION
# ============================================================================
#
# Win counters and streaks carry over between commands until `arcade end`.
#   file - (default: ~/.arcade/session.json)

[session]
# file = "/path/to/session.json"
"#;

/// Write the default configuration.
/// By default creates the global config at ~/.arcade/config.toml
/// Use --config to specify a custom path
pub fn init_command(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(Config::global_config_path);

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
