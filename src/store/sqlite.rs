//! SQLite profile store
//!
//! One row per player in the `profiles` table. The autoincrement id keeps
//! insertion order for leaderboard ties; `name_key` makes lookups
//! case-insensitive.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::debug;

use super::codec::{self, ProfileRow};
use super::{ProfileStore, StoreError, StoreResult, decode_logged};
use crate::domain::{Profile, name_key};

const BACKEND: &str = "sqlite";

/// Current schema version
const SCHEMA_VERSION: i32 = 2;

const SELECT_COLUMNS: &str = r#"
    name, CAST(points AS TEXT), consumables, has_permanent_bonus, inventory_log,
    achievements, companion_stage, CAST(companion_xp AS TEXT), COALESCE(legend_awarded, '')
"#;

/// Relational profile store
#[derive(Clone)]
pub struct SqliteProfileStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteProfileStore {
    /// Open or create the profile database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open profile db: {}", path.display()))?;

        // WAL lets a second session read while another writes
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::init(conn)
    }

    /// Private in-memory database, for tests and throwaway sessions
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory profile db")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::unavailable(BACKEND, "connection lock poisoned"))
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        drop(conn);
        self.run_migrations()?;
        Ok(())
    }

    /// Run any pending migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        let version: i32 = conn
            .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .unwrap_or(0);

        // Migration 2: one-time legend payout flag
        if version < 2 {
            let has_legend_awarded: bool = conn
                .prepare("SELECT COUNT(*) FROM pragma_table_info('profiles') WHERE name = 'legend_awarded'")
                .and_then(|mut s| s.query_row([], |r| r.get::<_, i32>(0)))
                .map(|c| c > 0)
                .unwrap_or(false);

            if !has_legend_awarded {
                // Left NULL for existing rows; the codec derives it from achievements
                conn.execute_batch("ALTER TABLE profiles ADD COLUMN legend_awarded TEXT;")?;
            }

            conn.execute("INSERT OR REPLACE INTO schema_version VALUES (2)", [])?;
            debug!("profile db migrated to schema version {}", SCHEMA_VERSION);
        }

        Ok(())
    }

    /// Highest applied schema version
    pub fn schema_version(&self) -> StoreResult<i32> {
        let conn = self.conn()?;
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))
            .map_err(db_err)
    }
}

fn db_err(e: rusqlite::Error) -> StoreError {
    StoreError::unavailable(BACKEND, e)
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

fn read_row(r: &Row<'_>) -> rusqlite::Result<ProfileRow> {
    Ok(ProfileRow {
        name: r.get(0)?,
        points: r.get::<_, Option<String>>(1)?.unwrap_or_default(),
        consumables: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
        has_permanent_bonus: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
        inventory_log: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
        achievements: r.get::<_, Option<String>>(5)?.unwrap_or_default(),
        companion_stage: r.get::<_, Option<String>>(6)?.unwrap_or_default(),
        companion_xp: r.get::<_, Option<String>>(7)?.unwrap_or_default(),
        legend_awarded: r.get(8)?,
    })
}

impl ProfileStore for SqliteProfileStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn find(&self, name: &str) -> StoreResult<Option<Profile>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM profiles WHERE name_key = ?1", SELECT_COLUMNS),
                [name_key(name)],
                read_row,
            )
            .optional()
            .map_err(db_err)?;
        Ok(row.map(|r| decode_logged(BACKEND, &r)))
    }

    fn create(&self, profile: &Profile) -> StoreResult<()> {
        let row = codec::encode(profile);
        let now = now_ms();
        let conn = self.conn()?;
        let inserted = conn
            .execute(
                r#"INSERT INTO profiles
                   (name_key, name, points, consumables, has_permanent_bonus, inventory_log,
                    achievements, companion_stage, companion_xp, legend_awarded, created_at, updated_at)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
                   ON CONFLICT(name_key) DO NOTHING"#,
                rusqlite::params![
                    profile.key(), row.name, row.points, row.consumables, row.has_permanent_bonus,
                    row.inventory_log, row.achievements, row.companion_stage, row.companion_xp,
                    row.legend_awarded, now,
                ],
            )
            .map_err(db_err)?;
        if inserted == 0 {
            debug!(player = %profile.name, "profile row already exists, create skipped");
        }
        Ok(())
    }

    fn update(&self, profile: &Profile) -> StoreResult<()> {
        let row = codec::encode(profile);
        let now = now_ms();
        let conn = self.conn()?;
        conn.execute(
            r#"INSERT INTO profiles
               (name_key, name, points, consumables, has_permanent_bonus, inventory_log,
                achievements, companion_stage, companion_xp, legend_awarded, created_at, updated_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)
               ON CONFLICT(name_key) DO UPDATE SET
                   name = ?2, points = ?3, consumables = ?4, has_permanent_bonus = ?5,
                   inventory_log = ?6, achievements = ?7, companion_stage = ?8,
                   companion_xp = ?9, legend_awarded = ?10, updated_at = ?11"#,
            rusqlite::params![
                profile.key(), row.name, row.points, row.consumables, row.has_permanent_bonus,
                row.inventory_log, row.achievements, row.companion_stage, row.companion_xp,
                row.legend_awarded, now,
            ],
        )
        .map_err(db_err)?;
        Ok(())
    }

    fn top_n(&self, n: usize) -> StoreResult<Vec<Profile>> {
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {} FROM profiles ORDER BY points DESC, id ASC LIMIT ?1",
                SELECT_COLUMNS
            ))
            .map_err(db_err)?;
        let rows = stmt
            .query_map([limit], read_row)
            .map_err(db_err)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(db_err)?;
        Ok(rows.iter().map(|r| decode_logged(BACKEND, r)).collect())
    }

    fn count_ahead_of(&self, points: u64) -> StoreResult<u64> {
        let points = i64::try_from(points).unwrap_or(i64::MAX);
        let conn = self.conn()?;
        conn.query_row(
            "SELECT COUNT(*) FROM profiles WHERE points > ?1",
            [points],
            |r| r.get(0),
        )
        .map_err(db_err)
    }

    fn count(&self) -> StoreResult<u64> {
        let conn = self.conn()?;
        conn.query_row("SELECT COUNT(*) FROM profiles", [], |r| r.get(0))
            .map_err(db_err)
    }
}

/// SQL schema for the profile database
const SCHEMA_SQL: &str = r#"
-- One row per player
CREATE TABLE IF NOT EXISTS profiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name_key TEXT NOT NULL UNIQUE,
    name TEXT NOT NULL,
    points INTEGER NOT NULL DEFAULT 0,
    consumables TEXT NOT NULL DEFAULT '{}',
    has_permanent_bonus TEXT NOT NULL DEFAULT 'false',
    inventory_log TEXT NOT NULL DEFAULT '[]',
    achievements TEXT NOT NULL DEFAULT '[]',
    companion_stage TEXT NOT NULL DEFAULT 'none',
    companion_xp INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_profiles_points ON profiles(points);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
INSERT OR IGNORE INTO schema_version VALUES (1);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn profile(name: &str, points: u64) -> Profile {
        let mut p = Profile::new(name);
        p.points = points;
        p
    }

    #[test]
    fn test_open_and_migrate() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("profiles.db");
        let store = SqliteProfileStore::open(&db_path).unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);

        // reopening is a no-op
        drop(store);
        let store = SqliteProfileStore::open(&db_path).unwrap();
        assert_eq!(store.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("profiles.db");
        {
            let store = SqliteProfileStore::open(&db_path).unwrap();
            let mut p = profile("Grace", 77);
            p.consumables.retry = 2;
            p.achievements.insert("five_wins".into());
            store.update(&p).unwrap();
        }
        let store = SqliteProfileStore::open(&db_path).unwrap();
        let loaded = store.find("grace").unwrap().unwrap();
        assert_eq!(loaded.name, "Grace");
        assert_eq!(loaded.points, 77);
        assert_eq!(loaded.consumables.retry, 2);
        assert!(loaded.achievements.contains("five_wins"));
    }

    #[test]
    fn test_create_then_update() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        store.create(&profile("Ann", 0)).unwrap();
        store.create(&profile("ANN", 50)).unwrap();
        assert_eq!(store.count().unwrap(), 1);
        assert_eq!(store.find("ann").unwrap().unwrap().points, 0);

        store.update(&profile("Ann", 12)).unwrap();
        assert_eq!(store.find("Ann").unwrap().unwrap().points, 12);
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_legacy_row_without_legend_flag() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        {
            let conn = store.conn().unwrap();
            conn.execute(
                r#"INSERT INTO profiles (name_key, name, points, achievements, companion_stage,
                       companion_xp, created_at, updated_at)
                   VALUES ('old', 'Old', 40, '["living_legend"]', 'legendary', 1500, 0, 0)"#,
                [],
            )
            .unwrap();
        }
        let loaded = store.find("old").unwrap().unwrap();
        assert!(loaded.legend_awarded);
        assert_eq!(loaded.companion_xp, 1500);
    }

    #[test]
    fn test_ranking_queries() {
        let store = SqliteProfileStore::open_in_memory().unwrap();
        store.update(&profile("A", 50)).unwrap();
        store.update(&profile("B", 80)).unwrap();
        store.update(&profile("C", 10)).unwrap();
        store.update(&profile("D", 50)).unwrap();

        let names: Vec<String> = store.top_n(3).unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["B", "A", "D"]);
        assert_eq!(store.rank("C").unwrap(), 4);
        assert_eq!(store.rank("D").unwrap(), 2);

        // unknown player gets a zero-point row and ranks last
        assert_eq!(store.rank("Newcomer").unwrap(), 5);
        assert_eq!(store.count().unwrap(), 5);
    }
}
