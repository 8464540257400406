//! Session controller: identify, apply, persist

use tracing::{debug, info, warn};

use super::event::GameEvent;
use crate::domain::{ItemKind, PlayerState, Profile, SessionTally, name_key};
use crate::games::{self, GameLocked};
use crate::leaderboard::Leaderboard;
use crate::progression::{Applied, Effects, ProgressionEngine, ProgressionError, Rewards};
use crate::shop::{self, ShopError};
use crate::store::{ProfileStore, StoreError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("player name must not be empty")]
    EmptyName,

    #[error("no player identified yet")]
    NoPlayer,

    #[error(transparent)]
    Progression(#[from] ProgressionError),

    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error(transparent)]
    Locked(#[from] GameLocked),
}

/// How a player got bound to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identified {
    /// Existing profile loaded from the store
    Loaded,
    /// New default profile (stored unless the store is down)
    Created,
    /// The same player was already bound; nothing changed
    AlreadyBound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifyOutcome {
    pub status: Identified,
    /// Set when the session just went degraded
    pub warning: Option<String>,
}

/// Result of a successful mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub effects: Effects,
    pub profile: Profile,
    /// The store accepted the new profile
    pub saved: bool,
    /// Set the first time saving fails; later failures stay quiet
    pub warning: Option<String>,
}

pub struct SessionController {
    store: Box<dyn ProfileStore>,
    engine: ProgressionEngine,
    state: Option<PlayerState>,
    degraded: bool,
    /// The bound profile came from the store (or the store confirmed it had
    /// no row). Until then nothing is written over the stored row.
    verified: bool,
}

impl SessionController {
    pub fn new(store: Box<dyn ProfileStore>) -> Self {
        Self {
            store,
            engine: ProgressionEngine::new(),
            state: None,
            degraded: false,
            verified: false,
        }
    }

    /// Bind the session to `name`, loading or creating its profile.
    ///
    /// Switching players resets the session tally. Profiles are never merged.
    pub fn identify(&mut self, name: &str) -> Result<IdentifyOutcome, SessionError> {
        let key = name_key(name);
        if key.is_empty() {
            return Err(SessionError::EmptyName);
        }
        if self.state.as_ref().is_some_and(|s| s.profile.key() == key) {
            return Ok(IdentifyOutcome {
                status: Identified::AlreadyBound,
                warning: None,
            });
        }

        let (profile, status, failure) = match self.store.find(name) {
            Ok(Some(profile)) => {
                info!(player = %profile.name, points = profile.points, "loaded profile");
                self.verified = true;
                (profile, Identified::Loaded, None)
            }
            Ok(None) => {
                let profile = Profile::new(name);
                let failure = self.store.create(&profile).err();
                if failure.is_none() {
                    info!(player = %profile.name, backend = self.store.backend(), "created profile");
                }
                self.verified = true;
                (profile, Identified::Created, failure)
            }
            Err(e) => {
                self.verified = false;
                (Profile::new(name), Identified::Created, Some(e))
            }
        };

        let warning = match failure {
            Some(e) => self.enter_degraded(&e),
            None => {
                self.degraded = false;
                None
            }
        };

        let mut state = PlayerState::new(profile);
        unlock_secret_if_due(&mut state);
        self.state = Some(state);
        Ok(IdentifyOutcome { status, warning })
    }

    /// Carry counters over from an earlier session of the same player.
    ///
    /// Used when one logical session spans several processes (the CLI runs
    /// one command per process). Returns false when no player is bound.
    pub fn resume(&mut self, tally: SessionTally) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        state.tally = tally;
        unlock_secret_if_due(state);
        true
    }

    /// Apply one event to the bound player and try to save the result
    pub fn apply(&mut self, event: GameEvent) -> Result<ApplyOutcome, SessionError> {
        let notice = self.reconcile()?;
        let state = self.state.as_ref().ok_or(SessionError::NoPlayer)?;
        let engine = &self.engine;

        let applied = match event {
            GameEvent::AwardPoints { amount, reason } => engine.award_points(state, amount, &reason),
            GameEvent::ConsumeItem(kind) => engine.consume_item(state, kind)?,
            GameEvent::AcquireItem { item, count } => engine.acquire_item(state, item, count),
            GameEvent::UnlockAchievement(id) => engine.unlock_achievement(state, id),
            GameEvent::PetCompanion => engine.grant_companion_xp(state, Rewards::PET_XP)?,
            GameEvent::UseCompanionBoost => engine.use_companion_boost(state)?,
            GameEvent::GameWon(game) => games::record_win(engine, state, game)?,
        };

        Ok(self.commit(applied, notice))
    }

    /// Buy an item from the shop and save the result
    pub fn purchase(&mut self, item: ItemKind) -> Result<ApplyOutcome, SessionError> {
        let notice = self.reconcile()?;
        let state = self.state.as_ref().ok_or(SessionError::NoPlayer)?;
        let applied = shop::purchase(&self.engine, state, item)?;
        Ok(self.commit(applied, notice))
    }

    pub fn snapshot(&self) -> Option<&Profile> {
        self.state.as_ref().map(|s| &s.profile)
    }

    pub fn tally(&self) -> Option<&SessionTally> {
        self.state.as_ref().map(|s| &s.tally)
    }

    /// True while saves are failing
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn leaderboard(&self) -> Leaderboard<'_> {
        Leaderboard::new(self.store.as_ref())
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    /// Look the player up again if identify could not reach the store.
    ///
    /// A stored row found now replaces the local stand-in profile, so the
    /// next save cannot overwrite it. Returns a notice when that happens.
    fn reconcile(&mut self) -> Result<Option<String>, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::NoPlayer)?;
        if self.verified {
            return Ok(None);
        }

        match self.store.find(&state.profile.name) {
            Ok(Some(stored)) => {
                info!(player = %stored.name, points = stored.points, "store reachable again, loaded saved profile");
                let notice = format!(
                    "Loaded the saved profile for {} ({} points); progress made while offline was not kept.",
                    stored.name, stored.points
                );
                state.profile = stored;
                unlock_secret_if_due(state);
                self.verified = true;
                Ok(Some(notice))
            }
            Ok(None) => {
                self.verified = true;
                Ok(None)
            }
            Err(e) => {
                debug!(player = %state.profile.name, "still cannot reach store: {}", e);
                Ok(None)
            }
        }
    }

    /// Keep the new state no matter what, then try to persist it.
    ///
    /// An unverified profile is never written: it may stand in for a row
    /// the store could not return.
    fn commit(&mut self, applied: Applied, notice: Option<String>) -> ApplyOutcome {
        let Applied { state, effects } = applied;

        let result = if self.verified {
            self.store.update(&state.profile)
        } else {
            Err(StoreError::unavailable(
                self.store.backend(),
                "profile could not be loaded",
            ))
        };

        let (saved, warning) = match result {
            Ok(()) => {
                if self.degraded {
                    info!(backend = self.store.backend(), "store reachable again, progress saved");
                    self.degraded = false;
                }
                (true, None)
            }
            Err(e) => {
                let warning = self.enter_degraded(&e);
                if warning.is_none() {
                    debug!(player = %state.profile.name, "save failed again: {}", e);
                }
                (false, warning)
            }
        };

        let profile = state.profile.clone();
        self.state = Some(state);
        ApplyOutcome {
            effects,
            profile,
            saved,
            warning: notice.or(warning),
        }
    }

    /// Returns the user-facing warning on the first failure only
    fn enter_degraded(&mut self, error: &StoreError) -> Option<String> {
        if self.degraded {
            return None;
        }
        self.degraded = true;
        warn!(backend = self.store.backend(), "playing without saving: {}", error);
        Some(format!("Progress is not being saved ({}). Playing locally.", error))
    }
}

/// A profile loaded at or above the unlock threshold starts with the secret
/// game open. Nothing is reported; the unlock happened in an earlier session.
fn unlock_secret_if_due(state: &mut PlayerState) {
    if state.profile.points >= Rewards::SECRET_UNLOCK_POINTS {
        state.tally.secret_unlocked = true;
    }
}
