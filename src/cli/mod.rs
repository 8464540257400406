//! CLI command implementations

pub mod init;
pub mod leaderboard;
pub mod play;
pub mod profile;
pub mod shop;

use anyhow::{Result, anyhow};
use tracing::warn;

use arcade_progress::config::Config;
use arcade_progress::session::{ApplyOutcome, Identified, SessionController};

/// Loaded config plus the `--player` override
pub struct Context {
    pub config: Config,
    player: Option<String>,
}

impl Context {
    pub fn new(config: Config, player: Option<String>) -> Self {
        Self { config, player }
    }

    pub fn player_name(&self) -> Result<String> {
        self.player
            .clone()
            .or_else(|| self.config.player.name.clone())
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| {
                anyhow!("No player given. Use --player NAME or set [player] name in the config.")
            })
    }

    /// Open the store, bind the player and pick up their running counters
    pub fn session(&self) -> Result<SessionController> {
        let name = self.player_name()?;
        let mut session = SessionController::new(self.config.open_store());
        let outcome = session.identify(&name)?;
        if let Some(warning) = &outcome.warning {
            eprintln!("⚠ {}", warning);
        }
        if outcome.status == Identified::Created {
            println!("Welcome, {}!", name.trim());
        }
        session.resume(self.config.tally_file().load(&name));
        Ok(session)
    }

    /// Keep the session counters for the next command. Failures are only logged.
    pub fn save_tally(&self, session: &SessionController) {
        let (Some(profile), Some(tally)) = (session.snapshot(), session.tally()) else {
            return;
        };
        if let Err(e) = self.config.tally_file().save(&profile.name, tally) {
            warn!("Session counters not saved: {:#}", e);
        }
    }
}

pub fn print_outcome(outcome: &ApplyOutcome) {
    for line in outcome.effects.messages() {
        println!("{}", line);
    }
    if let Some(warning) = &outcome.warning {
        eprintln!("⚠ {}", warning);
    }
    println!("Points: {}", outcome.profile.points);
}
