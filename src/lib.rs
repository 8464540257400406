//! Arcade Progress - persistent progression for a mini-game arcade
//!
//! Players win points in small games, spend them in a shop, raise a
//! companion and collect achievements. Profiles survive between sessions in
//! a SQLite database or a shared workbook file, and a leaderboard ranks
//! everyone by points.
//!
//! ## Layers
//!
//! 1. **Progression** ([`progression`]): pure state transitions on a
//!    [`PlayerState`], reporting what changed as [`progression::Effects`].
//!
//! 2. **Sessions** ([`session`]): bind a player, apply events, persist
//!    through a [`store::ProfileStore`], keep playing when saving fails.

pub mod config;
pub mod domain;
pub mod games;
pub mod leaderboard;
pub mod progression;
pub mod session;
pub mod shop;
pub mod store;

pub use domain::*;
