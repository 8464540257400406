//! Spreadsheet-style profile store
//!
//! A workbook file holds one worksheet: a header row and rows of text cells.
//! Columns are found by header name, so a sheet edited by hand (columns
//! reordered, notes added in extra columns) keeps working. Updates only
//! touch the columns the codec knows.
//!
//! The file is re-read on every call so several sessions sharing it see each
//! other's writes. Writes happen under an exclusive lock and land through a
//! temp file + rename.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::codec::{self, COL_NAME, COLUMNS, ProfileRow};
use super::{ProfileStore, StoreError, StoreResult, decode_logged};
use crate::domain::{Profile, name_key};

const BACKEND: &str = "sheet";

/// Header row plus data rows, all cells text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worksheet {
    #[serde(default)]
    pub header: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl Worksheet {
    fn column(&self, name: &str) -> Option<usize> {
        self.header
            .iter()
            .position(|h| codec::canonical_column(h) == Some(name))
    }

    /// Write the header if the sheet has none, and append any codec column
    /// an older sheet is missing
    fn ensure_header(&mut self) {
        if self.column(COL_NAME).is_none() {
            self.header = COLUMNS.iter().map(|c| c.to_string()).collect();
            return;
        }
        for column in COLUMNS {
            if self.column(column).is_none() {
                self.header.push(column.to_string());
            }
        }
    }

    fn find_row(&self, name: &str) -> Option<usize> {
        let col = self.column(COL_NAME)?;
        let key = name_key(name);
        self.rows
            .iter()
            .position(|cells| cells.get(col).is_some_and(|cell| name_key(cell) == key))
    }

    /// Rows with a non-blank name, in sheet order
    fn profile_rows(&self) -> Vec<ProfileRow> {
        let Some(col) = self.column(COL_NAME) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter(|cells| cells.get(col).is_some_and(|cell| !cell.trim().is_empty()))
            .map(|cells| ProfileRow::from_cells(&self.header, cells))
            .collect()
    }

    fn append(&mut self, profile: &Profile) {
        let mut cells = vec![String::new(); self.header.len()];
        codec::encode(profile).write_cells(&self.header, &mut cells);
        self.rows.push(cells);
    }
}

/// Profiles stored as rows of a worksheet file
#[derive(Debug, Clone)]
pub struct SheetProfileStore {
    path: PathBuf,
}

impl SheetProfileStore {
    /// Use the workbook at `path`; it is created on first write
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    anyhow::anyhow!("Failed to create sheet dir {}: {}", parent.display(), e)
                })?;
            }
        }
        let store = Self {
            path: path.to_path_buf(),
        };
        // fail early on an unreadable workbook
        store.read_sheet()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self, exclusive: bool) -> StoreResult<File> {
        let lock_path = self.path.with_extension("json.lock");
        let lock_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| StoreError::unavailable(BACKEND, format!("lock file: {}", e)))?;
        let locked = if exclusive {
            lock_file.lock_exclusive()
        } else {
            lock_file.lock_shared()
        };
        locked.map_err(|e| StoreError::unavailable(BACKEND, format!("lock: {}", e)))?;
        Ok(lock_file)
    }

    fn read_sheet(&self) -> StoreResult<Worksheet> {
        if !self.path.exists() {
            return Ok(Worksheet::default());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            StoreError::unavailable(BACKEND, format!("read {}: {}", self.path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Ok(Worksheet::default());
        }
        serde_json::from_str(&content).map_err(|e| {
            StoreError::unavailable(BACKEND, format!("parse {}: {}", self.path.display(), e))
        })
    }

    fn write_sheet(&self, sheet: &Worksheet) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(sheet)
            .map_err(|e| StoreError::unavailable(BACKEND, e))?;

        let temp_path = self.path.with_extension("json.tmp");
        let mut temp_file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| StoreError::unavailable(BACKEND, format!("temp file: {}", e)))?;
        temp_file
            .write_all(content.as_bytes())
            .and_then(|_| temp_file.sync_all())
            .map_err(|e| StoreError::unavailable(BACKEND, format!("write: {}", e)))?;

        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| StoreError::unavailable(BACKEND, format!("rename: {}", e)))
    }

    /// Read under a shared lock
    fn read<T>(&self, f: impl FnOnce(&Worksheet) -> T) -> StoreResult<T> {
        let _lock = self.lock(false)?;
        let sheet = self.read_sheet()?;
        Ok(f(&sheet))
    }

    /// Read-modify-write under an exclusive lock; `f` returns whether to save
    fn modify(&self, f: impl FnOnce(&mut Worksheet) -> bool) -> StoreResult<()> {
        let _lock = self.lock(true)?;
        let mut sheet = self.read_sheet()?;
        if f(&mut sheet) {
            self.write_sheet(&sheet)?;
        }
        Ok(())
    }
}

impl ProfileStore for SheetProfileStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    fn find(&self, name: &str) -> StoreResult<Option<Profile>> {
        self.read(|sheet| {
            sheet.find_row(name).map(|idx| {
                let row = ProfileRow::from_cells(&sheet.header, &sheet.rows[idx]);
                decode_logged(BACKEND, &row)
            })
        })
    }

    fn create(&self, profile: &Profile) -> StoreResult<()> {
        self.modify(|sheet| {
            if sheet.find_row(&profile.name).is_some() {
                debug!(player = %profile.name, "sheet row already exists, create skipped");
                return false;
            }
            sheet.ensure_header();
            sheet.append(profile);
            true
        })
    }

    fn update(&self, profile: &Profile) -> StoreResult<()> {
        self.modify(|sheet| {
            sheet.ensure_header();
            match sheet.find_row(&profile.name) {
                Some(idx) => {
                    let header = sheet.header.clone();
                    codec::encode(profile).write_cells(&header, &mut sheet.rows[idx]);
                }
                None => sheet.append(profile),
            }
            true
        })
    }

    fn top_n(&self, n: usize) -> StoreResult<Vec<Profile>> {
        self.read(|sheet| {
            let mut profiles: Vec<Profile> = sheet
                .profile_rows()
                .iter()
                .map(|row| decode_logged(BACKEND, row))
                .collect();
            profiles.sort_by(|a, b| b.points.cmp(&a.points));
            profiles.truncate(n);
            profiles
        })
    }

    fn count_ahead_of(&self, points: u64) -> StoreResult<u64> {
        self.read(|sheet| {
            sheet
                .profile_rows()
                .iter()
                .filter(|row| codec::decode(row).profile.points > points)
                .count() as u64
        })
    }

    fn count(&self) -> StoreResult<u64> {
        self.read(|sheet| sheet.profile_rows().len() as u64)
    }
}
