//! Companion stages and evolution thresholds

use serde::{Deserialize, Serialize};

use super::achievement::AchievementId;

/// XP at which the legendary bonus is granted
pub const LEGEND_XP: u64 = 1000;

/// One-time points bonus for reaching [`LEGEND_XP`]
pub const LEGEND_BONUS_POINTS: u64 = 20;

/// Stage of the virtual companion. Ordering follows evolution order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CompanionStage {
    #[default]
    None,
    Egg,
    Juvenile,
    Adult,
    Legendary,
}

impl CompanionStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Egg => "egg",
            Self::Juvenile => "juvenile",
            Self::Adult => "adult",
            Self::Legendary => "legendary",
        }
    }

    /// Parse a stored token. Older workbooks wrote `puppy` and `legend`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "egg" => Some(Self::Egg),
            "juvenile" | "puppy" => Some(Self::Juvenile),
            "adult" => Some(Self::Adult),
            "legendary" | "legend" => Some(Self::Legendary),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "No companion",
            Self::Egg => "Companion egg",
            Self::Juvenile => "Companion (juvenile)",
            Self::Adult => "Companion (adult)",
            Self::Legendary => "Companion (legendary)",
        }
    }

    /// Whether a companion is owned at all
    pub fn is_owned(&self) -> bool {
        *self != Self::None
    }

    /// The XP-gated step out of this stage: `(xp_required, next_stage)`.
    ///
    /// `None` has no step: hatching the egg is a shop action, not XP.
    pub fn evolution(&self) -> Option<(u64, CompanionStage)> {
        match self {
            Self::Egg => Some((10, Self::Juvenile)),
            Self::Juvenile => Some((30, Self::Adult)),
            Self::Adult => Some((100, Self::Legendary)),
            Self::None | Self::Legendary => None,
        }
    }

    /// Achievement unlocked on entering this stage
    pub fn achievement(&self) -> Option<AchievementId> {
        match self {
            Self::Juvenile => Some(AchievementId::CompanionHatched),
            Self::Adult => Some(AchievementId::CompanionGrown),
            Self::Legendary => Some(AchievementId::CompanionLegendary),
            Self::None | Self::Egg => None,
        }
    }
}

impl std::fmt::Display for CompanionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds_strictly_ordered() {
        let mut stage = CompanionStage::Egg;
        let mut last = 0;
        while let Some((xp, next)) = stage.evolution() {
            assert!(xp > last);
            assert!(next > stage);
            last = xp;
            stage = next;
        }
        assert_eq!(stage, CompanionStage::Legendary);
    }

    #[test]
    fn test_no_xp_path_out_of_none() {
        assert!(CompanionStage::None.evolution().is_none());
        assert!(!CompanionStage::None.is_owned());
    }

    #[test]
    fn test_parse_roundtrip_tokens() {
        for stage in [
            CompanionStage::None,
            CompanionStage::Egg,
            CompanionStage::Juvenile,
            CompanionStage::Adult,
            CompanionStage::Legendary,
        ] {
            assert_eq!(CompanionStage::parse(stage.as_str()), Some(stage));
        }
        assert_eq!(CompanionStage::parse("dragon"), None);
    }

    #[test]
    fn test_parse_legacy_tokens() {
        assert_eq!(CompanionStage::parse("puppy"), Some(CompanionStage::Juvenile));
        assert_eq!(CompanionStage::parse("Legend"), Some(CompanionStage::Legendary));
    }
}
