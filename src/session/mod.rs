//! Player sessions
//!
//! A [`SessionController`] binds one [`PlayerState`](crate::domain::PlayerState)
//! to one identified player. It loads on identify, saves after every
//! mutation and keeps playing when the store is down. A [`TallyFile`] lets
//! one session span several processes.

mod controller;
mod event;
mod tally;

pub use controller::{ApplyOutcome, IdentifyOutcome, Identified, SessionController, SessionError};
pub use event::GameEvent;
pub use tally::TallyFile;
