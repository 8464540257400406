//! Progression engine - the player state machine
//!
//! Every operation is a pure function of the current [`PlayerState`]: it
//! clones, mutates the copy and returns it with the resulting [`Effects`].
//! No storage access happens here.

use tracing::debug;

use super::checker::check_win_achievements;
use super::effects::{Applied, Effects, Evolution, ProgressionError};
use super::rewards::{Rewards, apply_delta};
use crate::domain::{
    AchievementId, ConsumableKind, ItemKind, LEGEND_BONUS_POINTS, LEGEND_XP, PlayerState, Profile,
};

/// Applies game outcomes to a player's state
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressionEngine;

impl ProgressionEngine {
    pub fn new() -> Self {
        Self
    }

    // ========================================
    // POINTS
    // ========================================

    /// Award points for a game outcome.
    ///
    /// A positive `base_amount` counts as a win; anything else breaks the
    /// streak. The hat bonus is added to the points but never to companion XP.
    pub fn award_points(&self, state: &PlayerState, base_amount: i64, reason: &str) -> Applied {
        let mut next = state.clone();
        let mut effects = Effects {
            reason: Some(reason.to_string()),
            ..Default::default()
        };

        let bonus = if next.profile.has_permanent_bonus {
            Rewards::PERMANENT_BONUS
        } else {
            0
        };
        let total = base_amount.saturating_add(bonus);
        next.profile.points = apply_delta(next.profile.points, total);
        effects.points_granted = total;

        if base_amount > 0 {
            next.tally.total_wins = next.tally.total_wins.saturating_add(1);
            next.tally.consecutive_wins = next.tally.consecutive_wins.saturating_add(1);
        } else {
            next.tally.consecutive_wins = 0;
        }

        for id in check_win_achievements(&next.tally, &next.profile.achievements) {
            if next.profile.insert_achievement(id) {
                effects.unlocked(id);
            }
        }

        if next.profile.companion_stage.is_owned() {
            let xp = base_amount.max(0) as u64;
            next.profile.companion_xp = next.profile.companion_xp.saturating_add(xp);
            effects.companion_xp_gained = xp;
            run_evolution_check(&mut next.profile, &mut effects);
        }

        check_secret(&mut next, &mut effects);

        debug!(
            player = %next.profile.name,
            base_amount,
            total,
            points = next.profile.points,
            reason,
            "awarded points"
        );

        Applied {
            state: next,
            effects,
        }
    }

    // ========================================
    // INVENTORY
    // ========================================

    /// Spend one consumable
    pub fn consume_item(
        &self,
        state: &PlayerState,
        kind: ConsumableKind,
    ) -> Result<Applied, ProgressionError> {
        if state.profile.consumables.get(kind) == 0 {
            return Err(ProgressionError::InsufficientInventory { kind });
        }

        let mut next = state.clone();
        *next.profile.consumables.get_mut(kind) -= 1;
        debug!(player = %next.profile.name, item = %kind, "consumed item");

        Ok(Applied {
            state: next,
            effects: Effects {
                consumed: Some(kind),
                ..Default::default()
            },
        })
    }

    /// Add an item to the inventory.
    ///
    /// Balance checks are the shop's job. Unique items already owned are
    /// left alone.
    pub fn acquire_item(&self, state: &PlayerState, item: ItemKind, count: u32) -> Applied {
        let mut next = state.clone();
        let mut effects = Effects::default();

        let acquired = match item {
            ItemKind::Consumable(kind) => {
                if count > 0 {
                    let slot = next.profile.consumables.get_mut(kind);
                    *slot = slot.saturating_add(count);
                }
                count > 0
            }
            ItemKind::PermanentBonus => {
                let fresh = !next.profile.has_permanent_bonus;
                next.profile.has_permanent_bonus = true;
                fresh
            }
            ItemKind::CompanionEgg => {
                let fresh = !next.profile.companion_stage.is_owned();
                if fresh {
                    next.profile.companion_stage = crate::domain::CompanionStage::Egg;
                }
                fresh
            }
        };

        if acquired {
            next.profile.log_acquisition(item.display_name());
            effects.acquired.push(item);
            debug!(player = %next.profile.name, %item, count, "acquired item");
        }

        Applied {
            state: next,
            effects,
        }
    }

    // ========================================
    // ACHIEVEMENTS & COMPANION
    // ========================================

    /// Unlock a game-specific achievement (idempotent)
    pub fn unlock_achievement(&self, state: &PlayerState, id: AchievementId) -> Applied {
        let mut next = state.clone();
        let mut effects = Effects::default();
        if next.profile.insert_achievement(id) {
            effects.unlocked(id);
        }
        Applied {
            state: next,
            effects,
        }
    }

    /// Give the companion XP directly (petting, boosts)
    pub fn grant_companion_xp(
        &self,
        state: &PlayerState,
        xp: u64,
    ) -> Result<Applied, ProgressionError> {
        if !state.profile.companion_stage.is_owned() {
            return Err(ProgressionError::NoCompanion);
        }

        let mut next = state.clone();
        let mut effects = Effects {
            companion_xp_gained: xp,
            ..Default::default()
        };
        next.profile.companion_xp = next.profile.companion_xp.saturating_add(xp);
        run_evolution_check(&mut next.profile, &mut effects);
        check_secret(&mut next, &mut effects);

        Ok(Applied {
            state: next,
            effects,
        })
    }

    /// Spend a boost token for [`Rewards::BOOST_XP`] companion XP.
    ///
    /// Without a companion the token is kept.
    pub fn use_companion_boost(&self, state: &PlayerState) -> Result<Applied, ProgressionError> {
        if !state.profile.companion_stage.is_owned() {
            return Err(ProgressionError::NoCompanion);
        }
        let consumed = self.consume_item(state, ConsumableKind::CompanionBoost)?;
        let mut boosted = self.grant_companion_xp(&consumed.state, Rewards::BOOST_XP)?;
        let mut effects = consumed.effects;
        effects.merge(boosted.effects);
        boosted.effects = effects;
        Ok(boosted)
    }

    /// Re-run the evolution and legend checks without changing XP
    pub fn evolution_check(&self, state: &PlayerState) -> Applied {
        let mut next = state.clone();
        let mut effects = Effects::default();
        run_evolution_check(&mut next.profile, &mut effects);
        check_secret(&mut next, &mut effects);
        Applied {
            state: next,
            effects,
        }
    }
}

/// Advance through every threshold the current XP has crossed, then pay the
/// legend bonus if it is due. Safe to re-run.
fn run_evolution_check(profile: &mut Profile, effects: &mut Effects) {
    while let Some((required, next_stage)) = profile.companion_stage.evolution() {
        if profile.companion_xp < required {
            break;
        }
        let from = profile.companion_stage;
        profile.companion_stage = next_stage;
        effects.evolutions.push(Evolution {
            from,
            to: next_stage,
        });
        if let Some(id) = next_stage.achievement() {
            if profile.insert_achievement(id) {
                effects.unlocked(id);
            }
        }
        debug!(player = %profile.name, %from, to = %next_stage, "companion evolved");
    }

    if profile.companion_xp >= LEGEND_XP && !profile.legend_awarded {
        profile.legend_awarded = true;
        profile.points = profile.points.saturating_add(LEGEND_BONUS_POINTS);
        if profile.insert_achievement(AchievementId::LivingLegend) {
            effects.unlocked(AchievementId::LivingLegend);
        }
        effects.legend_bonus = Some(LEGEND_BONUS_POINTS);
        debug!(player = %profile.name, "legend bonus paid");
    }
}

fn check_secret(state: &mut PlayerState, effects: &mut Effects) {
    if state.profile.points >= Rewards::SECRET_UNLOCK_POINTS && !state.tally.secret_unlocked {
        state.tally.secret_unlocked = true;
        effects.secret_unlocked = true;
    }
}
