//! Achievement checking logic
//!
//! Derivation is re-run after every event; already unlocked ids are skipped,
//! so running a check twice never yields anything new.

use std::collections::BTreeSet;

use super::rewards::{STREAK_MILESTONES, WIN_MILESTONES};
use crate::domain::{AchievementId, SessionTally};

/// Check win-count and streak achievements for the session tally
pub fn check_win_achievements(
    tally: &SessionTally,
    unlocked: &BTreeSet<String>,
) -> Vec<AchievementId> {
    let mut newly_unlocked = Vec::new();

    for (threshold, id) in WIN_MILESTONES {
        if tally.total_wins >= threshold && !unlocked.contains(id.as_str()) {
            newly_unlocked.push(id);
        }
    }

    for (threshold, id) in STREAK_MILESTONES {
        if tally.consecutive_wins >= threshold && !unlocked.contains(id.as_str()) {
            newly_unlocked.push(id);
        }
    }

    newly_unlocked
}
