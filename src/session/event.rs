use crate::domain::{AchievementId, ConsumableKind, ItemKind};
use crate::games::MiniGame;

/// Something a mini-game or the player did that changes progression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// Raw award; positive amounts count as wins
    AwardPoints { amount: i64, reason: String },
    ConsumeItem(ConsumableKind),
    AcquireItem { item: ItemKind, count: u32 },
    UnlockAchievement(AchievementId),
    /// +1 companion XP
    PetCompanion,
    UseCompanionBoost,
    /// A win reported by name; paid out from the reward table
    GameWon(MiniGame),
}

impl GameEvent {
    pub fn award(amount: i64, reason: impl Into<String>) -> Self {
        Self::AwardPoints {
            amount,
            reason: reason.into(),
        }
    }
}
