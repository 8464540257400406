//! Point and XP constants

/// Point rewards and gates for progression
pub struct Rewards;

impl Rewards {
    /// Extra point on every award while the magic hat is owned
    pub const PERMANENT_BONUS: i64 = 1;

    /// Points at which the hidden mini-game unlocks
    pub const SECRET_UNLOCK_POINTS: u64 = 100;

    /// Companion XP for a pat on the head
    pub const PET_XP: u64 = 1;

    /// Companion XP granted by a boost token
    pub const BOOST_XP: u64 = 10;
}

/// Win-count milestones: (total wins this session, achievement)
pub(super) const WIN_MILESTONES: [(u32, crate::domain::AchievementId); 1] =
    [(5, crate::domain::AchievementId::FiveWins)];

/// Streak milestones: (consecutive wins, achievement)
pub(super) const STREAK_MILESTONES: [(u32, crate::domain::AchievementId); 1] =
    [(3, crate::domain::AchievementId::ThreeStreak)];

/// Apply a signed delta to a point balance, saturating at zero
pub(super) fn apply_delta(points: u64, delta: i64) -> u64 {
    points.saturating_add_signed(delta)
}
