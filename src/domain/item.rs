//! Inventory item kinds
//!
//! Consumables are counted, the hat and the companion egg are unique.

use serde::{Deserialize, Serialize};

/// Single-use items, each spent to unlock an in-game advantage
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumableKind {
    /// Reveals one letter in hangman
    Hint,
    /// Reveals one correct position in the code breaker
    CodeHint,
    /// Restarts a lost game without penalty
    Retry,
    /// Grants companion XP
    CompanionBoost,
}

impl ConsumableKind {
    pub const ALL: [ConsumableKind; 4] = [
        Self::Hint,
        Self::CodeHint,
        Self::Retry,
        Self::CompanionBoost,
    ];

    /// Key used in the persisted consumables mapping
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hint => "hint",
            Self::CodeHint => "code_hint",
            Self::Retry => "retry",
            Self::CompanionBoost => "companion_boost",
        }
    }

    /// Parse a persisted key or a CLI spelling (`code-hint` works too).
    /// Keys from older workbooks are accepted as well.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "hint" | "indice_pendu" => Some(Self::Hint),
            "code_hint" | "aide_mastermind" => Some(Self::CodeHint),
            "retry" | "rejouer" => Some(Self::Retry),
            "companion_boost" | "boost" | "boost_animal" => Some(Self::CompanionBoost),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Hint => "Hangman Hint",
            Self::CodeHint => "Code Breaker Hint",
            Self::Retry => "Retry Token",
            Self::CompanionBoost => "Companion Boost",
        }
    }
}

impl std::fmt::Display for ConsumableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything that can be acquired, usually from the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Consumable(ConsumableKind),
    /// Magic hat: +1 point on every award, forever
    PermanentBonus,
    /// Starts the companion at the egg stage
    CompanionEgg,
}

impl ItemKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Consumable(kind) => kind.display_name(),
            Self::PermanentBonus => "Magic Hat",
            Self::CompanionEgg => "Companion Egg",
        }
    }

    /// Unique items can be owned at most once
    pub fn is_unique(&self) -> bool {
        !matches!(self, Self::Consumable(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Consumable(kind) => kind.as_str(),
            Self::PermanentBonus => "hat",
            Self::CompanionEgg => "egg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hat" | "magic_hat" | "magic-hat" | "bonus" => Some(Self::PermanentBonus),
            "egg" | "companion_egg" | "companion-egg" => Some(Self::CompanionEgg),
            other => ConsumableKind::parse(other).map(Self::Consumable),
        }
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumable_parse_accepts_cli_spelling() {
        assert_eq!(ConsumableKind::parse("code-hint"), Some(ConsumableKind::CodeHint));
        assert_eq!(ConsumableKind::parse("HINT"), Some(ConsumableKind::Hint));
        assert_eq!(ConsumableKind::parse("boost"), Some(ConsumableKind::CompanionBoost));
        assert_eq!(ConsumableKind::parse("potion"), None);
    }

    #[test]
    fn test_consumable_parse_accepts_old_workbook_keys() {
        assert_eq!(ConsumableKind::parse("indice_pendu"), Some(ConsumableKind::Hint));
        assert_eq!(ConsumableKind::parse("aide_mastermind"), Some(ConsumableKind::CodeHint));
        assert_eq!(ConsumableKind::parse("Rejouer"), Some(ConsumableKind::Retry));
        assert_eq!(
            ConsumableKind::parse("boost_animal"),
            Some(ConsumableKind::CompanionBoost)
        );
    }

    #[test]
    fn test_item_parse() {
        assert_eq!(ItemKind::parse("hat"), Some(ItemKind::PermanentBonus));
        assert_eq!(ItemKind::parse("egg"), Some(ItemKind::CompanionEgg));
        assert_eq!(
            ItemKind::parse("retry"),
            Some(ItemKind::Consumable(ConsumableKind::Retry))
        );
        assert!(ItemKind::PermanentBonus.is_unique());
        assert!(!ItemKind::Consumable(ConsumableKind::Hint).is_unique());
    }
}
