//! Achievement definitions and metadata
//!
//! Profiles store achievements as plain string identifiers so that ids
//! written by newer builds survive a round trip through older ones.

/// Unique identifier for each achievement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AchievementId {
    // Win achievements
    FiveWins,
    ThreeStreak,

    // Companion achievements
    CompanionHatched,
    CompanionGrown,
    CompanionLegendary,
    LivingLegend,

    // Game achievements
    WordMaster,
    CodeMaster,
    Decoder,
}

impl AchievementId {
    /// Get the string ID for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FiveWins => "five_wins",
            Self::ThreeStreak => "three_streak",
            Self::CompanionHatched => "companion_hatched",
            Self::CompanionGrown => "companion_grown",
            Self::CompanionLegendary => "companion_legendary",
            Self::LivingLegend => "living_legend",
            Self::WordMaster => "word_master",
            Self::CodeMaster => "code_master",
            Self::Decoder => "decoder",
        }
    }

    /// Parse from a stored string
    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|id| id.as_str() == s)
    }

    /// Get all achievement IDs
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FiveWins,
            Self::ThreeStreak,
            Self::CompanionHatched,
            Self::CompanionGrown,
            Self::CompanionLegendary,
            Self::LivingLegend,
            Self::WordMaster,
            Self::CodeMaster,
            Self::Decoder,
        ]
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Achievement category for grouping in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AchievementCategory {
    Wins,
    Companion,
    Games,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wins => "Wins",
            Self::Companion => "Companion",
            Self::Games => "Games",
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[Achievement] = &[
    // === WINS ===
    Achievement {
        id: AchievementId::FiveWins,
        name: "Winner x5",
        description: "Win 5 games in one session",
        icon: "🥇",
        category: AchievementCategory::Wins,
    },
    Achievement {
        id: AchievementId::ThreeStreak,
        name: "Hat Trick",
        description: "Win 3 games in a row",
        icon: "🔥",
        category: AchievementCategory::Wins,
    },
    // === COMPANION ===
    Achievement {
        id: AchievementId::CompanionHatched,
        name: "It's Alive",
        description: "Hatch your companion egg",
        icon: "🐣",
        category: AchievementCategory::Companion,
    },
    Achievement {
        id: AchievementId::CompanionGrown,
        name: "All Grown Up",
        description: "Raise your companion to adulthood",
        icon: "🐶",
        category: AchievementCategory::Companion,
    },
    Achievement {
        id: AchievementId::CompanionLegendary,
        name: "Legendary Companion",
        description: "Your companion reached its final form",
        icon: "👑",
        category: AchievementCategory::Companion,
    },
    Achievement {
        id: AchievementId::LivingLegend,
        name: "Living Legend",
        description: "Earn 1000 companion XP",
        icon: "🏆",
        category: AchievementCategory::Companion,
    },
    // === GAMES ===
    Achievement {
        id: AchievementId::WordMaster,
        name: "Word Master",
        description: "Win a game of hangman",
        icon: "🔤",
        category: AchievementCategory::Games,
    },
    Achievement {
        id: AchievementId::CodeMaster,
        name: "Code Master",
        description: "Crack the code breaker",
        icon: "🎯",
        category: AchievementCategory::Games,
    },
    Achievement {
        id: AchievementId::Decoder,
        name: "Decoder",
        description: "Unscramble a word",
        icon: "🧩",
        category: AchievementCategory::Games,
    },
];

impl Achievement {
    /// Get achievement definition by ID
    pub fn get(id: AchievementId) -> Option<&'static Achievement> {
        ACHIEVEMENTS.iter().find(|a| a.id == id)
    }

    /// Look up a stored identifier, if it belongs to this build
    pub fn lookup(stored: &str) -> Option<&'static Achievement> {
        AchievementId::parse(stored).and_then(Self::get)
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_id_is_defined() {
        for id in AchievementId::all() {
            assert!(Achievement::get(*id).is_some(), "{} has no definition", id);
            assert_eq!(AchievementId::parse(id.as_str()), Some(*id));
        }
        assert_eq!(Achievement::total_count(), AchievementId::all().len());
    }

    #[test]
    fn test_unknown_stored_id() {
        assert!(Achievement::lookup("speed_demon").is_none());
    }
}
