//! Progression: points, streak achievements, inventory and companion evolution
//!
//! The engine never touches storage. The session controller feeds it the
//! current state and persists whatever comes back.

mod checker;
mod effects;
mod engine;
mod rewards;

pub use checker::check_win_achievements;
pub use effects::{Applied, Effects, Evolution, ProgressionError};
pub use engine::ProgressionEngine;
pub use rewards::Rewards;
