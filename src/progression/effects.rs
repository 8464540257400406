//! User-facing results of a progression step

use crate::domain::{
    Achievement, AchievementId, CompanionStage, ConsumableKind, ItemKind, PlayerState,
};

/// A single stage transition of the companion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evolution {
    pub from: CompanionStage,
    pub to: CompanionStage,
}

/// Everything a step changed that the player should hear about
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects {
    /// Points added by the award itself (base + bonus)
    pub points_granted: i64,
    pub reason: Option<String>,
    pub achievements_unlocked: Vec<AchievementId>,
    /// Stage transitions in ascending order
    pub evolutions: Vec<Evolution>,
    /// Points paid out by the one-time legend bonus
    pub legend_bonus: Option<u64>,
    /// The hidden mini-game became available in this step
    pub secret_unlocked: bool,
    pub acquired: Vec<ItemKind>,
    pub consumed: Option<ConsumableKind>,
    pub companion_xp_gained: u64,
}

impl Effects {
    pub(crate) fn unlocked(&mut self, id: AchievementId) {
        if !self.achievements_unlocked.contains(&id) {
            self.achievements_unlocked.push(id);
        }
    }

    /// Fold the effects of a later step into this one
    pub fn merge(&mut self, other: Effects) {
        self.points_granted += other.points_granted;
        if other.reason.is_some() {
            self.reason = other.reason;
        }
        for id in other.achievements_unlocked {
            self.unlocked(id);
        }
        self.evolutions.extend(other.evolutions);
        self.legend_bonus = self.legend_bonus.or(other.legend_bonus);
        self.secret_unlocked |= other.secret_unlocked;
        self.acquired.extend(other.acquired);
        self.consumed = self.consumed.or(other.consumed);
        self.companion_xp_gained += other.companion_xp_gained;
    }

    /// Human-readable notification lines
    pub fn messages(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.points_granted != 0 {
            match &self.reason {
                Some(reason) => lines.push(format!("{:+} points ({})", self.points_granted, reason)),
                None => lines.push(format!("{:+} points", self.points_granted)),
            }
        }
        if let Some(kind) = self.consumed {
            lines.push(format!("Used {}", kind.display_name()));
        }
        for item in &self.acquired {
            lines.push(format!("Acquired {}", item.display_name()));
        }
        if self.companion_xp_gained > 0 {
            lines.push(format!("+{} companion XP", self.companion_xp_gained));
        }
        for evolution in &self.evolutions {
            lines.push(format!(
                "Your companion evolved: {} -> {}",
                evolution.from, evolution.to
            ));
        }
        for id in &self.achievements_unlocked {
            match Achievement::get(*id) {
                Some(a) => lines.push(format!("{} Achievement unlocked: {}", a.icon, a.name)),
                None => lines.push(format!("Achievement unlocked: {}", id)),
            }
        }
        if let Some(bonus) = self.legend_bonus {
            lines.push(format!("Legendary bonus: +{} points", bonus));
        }
        if self.secret_unlocked {
            lines.push("Secret mini-game unlocked!".to_string());
        }

        lines
    }
}

/// Result of a successful progression step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub state: PlayerState,
    pub effects: Effects,
}

/// Rejected progression steps. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressionError {
    #[error("no {kind} left in the inventory")]
    InsufficientInventory { kind: ConsumableKind },

    #[error("no companion to receive XP; buy an egg first")]
    NoCompanion,
}
