//! Core domain types: profiles, items, companion stages and achievements

mod achievement;
mod companion;
mod item;
mod profile;

pub use achievement::{ACHIEVEMENTS, Achievement, AchievementCategory, AchievementId};
pub use companion::{CompanionStage, LEGEND_BONUS_POINTS, LEGEND_XP};
pub use item::{ConsumableKind, ItemKind};
pub use profile::{Consumables, PlayerState, Profile, SessionTally, name_key};
