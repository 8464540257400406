//! Profile codec - flat text rows to and from [`Profile`]
//!
//! Every backend stores a profile as the same set of named text fields.
//! Collections are compact JSON, booleans are `true`/`false`.
//!
//! Decoding works field by field: a garbled cell costs that one field its
//! value (it falls back to the zero value and is reported as a
//! [`FieldIssue`]) and never the rest of the profile.

use std::collections::BTreeSet;
use std::fmt;

use serde_json::Value;

use crate::domain::{AchievementId, CompanionStage, ConsumableKind, Consumables, Profile};

pub const COL_NAME: &str = "name";
pub const COL_POINTS: &str = "points";
pub const COL_CONSUMABLES: &str = "consumables";
pub const COL_PERMANENT_BONUS: &str = "has_permanent_bonus";
pub const COL_INVENTORY_LOG: &str = "inventory_log";
pub const COL_ACHIEVEMENTS: &str = "achievements";
pub const COL_COMPANION_STAGE: &str = "companion_stage";
pub const COL_COMPANION_XP: &str = "companion_xp";
pub const COL_LEGEND_AWARDED: &str = "legend_awarded";

/// Column order used when a backend creates its own header
pub const COLUMNS: [&str; 9] = [
    COL_NAME,
    COL_POINTS,
    COL_CONSUMABLES,
    COL_PERMANENT_BONUS,
    COL_INVENTORY_LOG,
    COL_ACHIEVEMENTS,
    COL_COMPANION_STAGE,
    COL_COMPANION_XP,
    COL_LEGEND_AWARDED,
];

/// Map a header cell to its codec column.
///
/// Matching is trimmed and case-insensitive. Headers written by the older
/// workbook layout (`Nom`, `HasHat`, `InventoryList`, `Pet`, `PetXP`) map
/// onto the same columns.
pub fn canonical_column(header: &str) -> Option<&'static str> {
    let header = header.trim().to_ascii_lowercase();
    if let Some(column) = COLUMNS.iter().copied().find(|c| *c == header) {
        return Some(column);
    }
    match header.as_str() {
        "nom" => Some(COL_NAME),
        "hashat" => Some(COL_PERMANENT_BONUS),
        "inventorylist" => Some(COL_INVENTORY_LOG),
        "pet" => Some(COL_COMPANION_STAGE),
        "petxp" => Some(COL_COMPANION_XP),
        _ => None,
    }
}

/// A profile as stored: one text value per column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileRow {
    pub name: String,
    pub points: String,
    pub consumables: String,
    pub has_permanent_bonus: String,
    pub inventory_log: String,
    pub achievements: String,
    pub companion_stage: String,
    pub companion_xp: String,
    pub legend_awarded: String,
}

impl ProfileRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        let value = match column {
            COL_NAME => &self.name,
            COL_POINTS => &self.points,
            COL_CONSUMABLES => &self.consumables,
            COL_PERMANENT_BONUS => &self.has_permanent_bonus,
            COL_INVENTORY_LOG => &self.inventory_log,
            COL_ACHIEVEMENTS => &self.achievements,
            COL_COMPANION_STAGE => &self.companion_stage,
            COL_COMPANION_XP => &self.companion_xp,
            COL_LEGEND_AWARDED => &self.legend_awarded,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn get_mut(&mut self, column: &str) -> Option<&mut String> {
        match column {
            COL_NAME => Some(&mut self.name),
            COL_POINTS => Some(&mut self.points),
            COL_CONSUMABLES => Some(&mut self.consumables),
            COL_PERMANENT_BONUS => Some(&mut self.has_permanent_bonus),
            COL_INVENTORY_LOG => Some(&mut self.inventory_log),
            COL_ACHIEVEMENTS => Some(&mut self.achievements),
            COL_COMPANION_STAGE => Some(&mut self.companion_stage),
            COL_COMPANION_XP => Some(&mut self.companion_xp),
            COL_LEGEND_AWARDED => Some(&mut self.legend_awarded),
            _ => None,
        }
    }

    /// Read a row from cells laid out under `header`.
    ///
    /// Columns are matched with [`canonical_column`]; unknown columns are
    /// ignored and absent ones stay empty.
    pub fn from_cells(header: &[String], cells: &[String]) -> Self {
        let mut row = Self::default();
        for (column, cell) in header.iter().zip(cells) {
            let Some(column) = canonical_column(column) else {
                continue;
            };
            if let Some(slot) = row.get_mut(column) {
                *slot = cell.clone();
            }
        }
        row
    }

    /// Write this row's values into `cells` under `header`, leaving columns
    /// this codec does not know untouched.
    pub fn write_cells(&self, header: &[String], cells: &mut Vec<String>) {
        if cells.len() < header.len() {
            cells.resize(header.len(), String::new());
        }
        for (idx, column) in header.iter().enumerate() {
            if let Some(value) = canonical_column(column).and_then(|c| self.get(c)) {
                cells[idx] = value.to_string();
            }
        }
    }
}

/// One field that could not be decoded and fell back to its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (value: {:?})", self.field, self.reason, self.value)
    }
}

/// Result of decoding a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub profile: Profile,
    pub issues: Vec<FieldIssue>,
}

/// Encode a profile into its stored representation
pub fn encode(profile: &Profile) -> ProfileRow {
    let achievements: Vec<&String> = profile.achievements.iter().collect();
    ProfileRow {
        name: profile.name.clone(),
        points: profile.points.to_string(),
        consumables: serde_json::to_string(&profile.consumables)
            .unwrap_or_else(|_| "{}".to_string()),
        has_permanent_bonus: encode_bool(profile.has_permanent_bonus),
        inventory_log: serde_json::to_string(&profile.inventory_log)
            .unwrap_or_else(|_| "[]".to_string()),
        achievements: serde_json::to_string(&achievements).unwrap_or_else(|_| "[]".to_string()),
        companion_stage: profile.companion_stage.as_str().to_string(),
        companion_xp: profile.companion_xp.to_string(),
        legend_awarded: encode_bool(profile.legend_awarded),
    }
}

/// Decode a stored row, defaulting any field that is missing or malformed
pub fn decode(row: &ProfileRow) -> Decoded {
    let mut issues = Vec::new();
    let mut profile = Profile::new(row.name.trim());

    if profile.name.is_empty() {
        issues.push(issue(COL_NAME, &row.name, "empty player name"));
    }

    profile.points = decode_count(COL_POINTS, &row.points, &mut issues);
    profile.consumables = decode_consumables(&row.consumables, &mut issues);
    profile.has_permanent_bonus =
        decode_bool(COL_PERMANENT_BONUS, &row.has_permanent_bonus, &mut issues).unwrap_or(false);
    profile.inventory_log = dedup(decode_strings(COL_INVENTORY_LOG, &row.inventory_log, &mut issues));
    profile.achievements = decode_strings(COL_ACHIEVEMENTS, &row.achievements, &mut issues)
        .into_iter()
        .collect::<BTreeSet<_>>();
    profile.companion_stage = decode_stage(&row.companion_stage, &mut issues);
    profile.companion_xp = decode_count(COL_COMPANION_XP, &row.companion_xp, &mut issues);

    // Rows written before the flag existed: the achievement proves the payout
    let legend_earned = profile.has_achievement(AchievementId::LivingLegend);
    profile.legend_awarded = decode_bool(COL_LEGEND_AWARDED, &row.legend_awarded, &mut issues)
        .unwrap_or(legend_earned);

    Decoded { profile, issues }
}

fn issue(field: &'static str, value: &str, reason: impl Into<String>) -> FieldIssue {
    FieldIssue {
        field,
        value: value.to_string(),
        reason: reason.into(),
    }
}

fn encode_bool(value: bool) -> String {
    let token = if value { "true" } else { "false" };
    token.to_string()
}

/// `None` when the cell is empty or unreadable
fn decode_bool(field: &'static str, raw: &str, issues: &mut Vec<FieldIssue>) -> Option<bool> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => {
            issues.push(issue(field, raw, "expected true or false"));
            None
        }
    }
}

fn decode_count(field: &'static str, raw: &str, issues: &mut Vec<FieldIssue>) -> u64 {
    let value = raw.trim();
    if value.is_empty() {
        return 0;
    }
    if let Ok(n) = value.parse::<u64>() {
        return n;
    }
    // Spreadsheets like to hand integers back as "42.0"
    match value.parse::<f64>() {
        Ok(f) if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => f as u64,
        _ => {
            issues.push(issue(field, raw, "expected a non-negative integer"));
            0
        }
    }
}

fn decode_consumables(raw: &str, issues: &mut Vec<FieldIssue>) -> Consumables {
    let mut consumables = Consumables::default();
    if raw.trim().is_empty() {
        return consumables;
    }

    let map = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            issues.push(issue(COL_CONSUMABLES, raw, "expected a JSON object"));
            return consumables;
        }
        Err(e) => {
            issues.push(issue(COL_CONSUMABLES, raw, e.to_string()));
            return consumables;
        }
    };

    for (key, value) in &map {
        let Some(kind) = ConsumableKind::parse(key) else {
            issues.push(issue(COL_CONSUMABLES, raw, format!("unknown item {:?}", key)));
            continue;
        };
        match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
            Some(n) => *consumables.get_mut(kind) = n,
            None => issues.push(issue(
                COL_CONSUMABLES,
                raw,
                format!("count for {} is not a non-negative integer", kind),
            )),
        }
    }

    consumables
}

fn decode_strings(field: &'static str, raw: &str, issues: &mut Vec<FieldIssue>) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let items = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            issues.push(issue(field, raw, "expected a JSON array"));
            return Vec::new();
        }
        Err(e) => {
            issues.push(issue(field, raw, e.to_string()));
            return Vec::new();
        }
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(s) => out.push(s),
            other => issues.push(issue(field, raw, format!("skipped non-string entry {}", other))),
        }
    }
    out
}

fn decode_stage(raw: &str, issues: &mut Vec<FieldIssue>) -> CompanionStage {
    if raw.trim().is_empty() {
        return CompanionStage::None;
    }
    CompanionStage::parse(raw).unwrap_or_else(|| {
        issues.push(issue(COL_COMPANION_STAGE, raw, "unknown companion stage"));
        CompanionStage::None
    })
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
