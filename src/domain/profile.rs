//! Player profile: the durable progression record, plus the per-session tally

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::achievement::AchievementId;
use super::companion::CompanionStage;
use super::item::ConsumableKind;

/// Normalized lookup key for a player name (trimmed, lowercased)
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Per-kind consumable counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consumables {
    pub hint: u32,
    pub code_hint: u32,
    pub retry: u32,
    pub companion_boost: u32,
}

impl Consumables {
    pub fn get(&self, kind: ConsumableKind) -> u32 {
        match kind {
            ConsumableKind::Hint => self.hint,
            ConsumableKind::CodeHint => self.code_hint,
            ConsumableKind::Retry => self.retry,
            ConsumableKind::CompanionBoost => self.companion_boost,
        }
    }

    pub fn get_mut(&mut self, kind: ConsumableKind) -> &mut u32 {
        match kind {
            ConsumableKind::Hint => &mut self.hint,
            ConsumableKind::CodeHint => &mut self.code_hint,
            ConsumableKind::Retry => &mut self.retry,
            ConsumableKind::CompanionBoost => &mut self.companion_boost,
        }
    }

    /// Counts in fixed kind order
    pub fn iter(&self) -> impl Iterator<Item = (ConsumableKind, u32)> + '_ {
        ConsumableKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    pub fn total(&self) -> u64 {
        self.iter().map(|(_, n)| n as u64).sum()
    }
}

/// Durable per-player progression record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display name, case preserved
    pub name: String,
    pub points: u64,
    pub consumables: Consumables,
    /// Magic hat owned (+1 point per award); never reverts
    pub has_permanent_bonus: bool,
    /// Display names of everything ever acquired, first acquisition first
    pub inventory_log: Vec<String>,
    /// Unlocked achievement identifiers
    pub achievements: BTreeSet<String>,
    pub companion_stage: CompanionStage,
    pub companion_xp: u64,
    /// Set once the living-legend bonus has been paid out
    pub legend_awarded: bool,
}

impl Profile {
    /// A fresh profile with all-default values
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            points: 0,
            consumables: Consumables::default(),
            has_permanent_bonus: false,
            inventory_log: Vec::new(),
            achievements: BTreeSet::new(),
            companion_stage: CompanionStage::None,
            companion_xp: 0,
            legend_awarded: false,
        }
    }

    pub fn key(&self) -> String {
        name_key(&self.name)
    }

    pub fn has_achievement(&self, id: AchievementId) -> bool {
        self.achievements.contains(id.as_str())
    }

    /// Insert an achievement; returns true if it was not there before
    pub(crate) fn insert_achievement(&mut self, id: AchievementId) -> bool {
        self.achievements.insert(id.as_str().to_string())
    }

    /// Append to the inventory log unless the display name is already listed
    pub(crate) fn log_acquisition(&mut self, display_name: &str) {
        if !self.inventory_log.iter().any(|n| n == display_name) {
            self.inventory_log.push(display_name.to_string());
        }
    }

    /// Current holdings, one line per item, for the status bar
    pub fn inventory_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.has_permanent_bonus {
            lines.push("🎩 Magic Hat".to_string());
        }
        for (kind, count) in self.consumables.iter() {
            if count > 0 {
                lines.push(format!("{} x{}", kind.display_name(), count));
            }
        }
        if self.companion_stage.is_owned() {
            lines.push(self.companion_stage.label().to_string());
        }
        lines
    }
}

/// Session counters. Reset whenever a player is identified; never part of
/// the stored profile. The CLI keeps them in a small side file so a session
/// can span several commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionTally {
    pub total_wins: u32,
    pub consecutive_wins: u32,
    /// Hidden mini-game unlocked (100 points reached this session)
    pub secret_unlocked: bool,
}

/// Everything the progression engine transforms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    pub profile: Profile,
    pub tally: SessionTally,
}

impl PlayerState {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            tally: SessionTally::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_key_is_case_insensitive() {
        assert_eq!(name_key("  Tom "), "tom");
        assert_eq!(Profile::new("TOM").key(), Profile::new("tom").key());
        assert_eq!(Profile::new(" Tom ").name, "Tom");
    }

    #[test]
    fn test_log_acquisition_suppresses_duplicates() {
        let mut profile = Profile::new("a");
        profile.log_acquisition("Retry Token");
        profile.log_acquisition("Magic Hat");
        profile.log_acquisition("Retry Token");
        assert_eq!(profile.inventory_log, vec!["Retry Token", "Magic Hat"]);
    }

    #[test]
    fn test_inventory_lines() {
        let mut profile = Profile::new("a");
        assert!(profile.inventory_lines().is_empty());

        profile.has_permanent_bonus = true;
        profile.consumables.retry = 2;
        profile.companion_stage = CompanionStage::Egg;
        assert_eq!(
            profile.inventory_lines(),
            vec!["🎩 Magic Hat", "Retry Token x2", "Companion egg"]
        );
    }

    #[test]
    fn test_consumables_accessors() {
        let mut c = Consumables::default();
        *c.get_mut(ConsumableKind::CodeHint) += 3;
        assert_eq!(c.get(ConsumableKind::CodeHint), 3);
        assert_eq!(c.total(), 3);
    }
}
