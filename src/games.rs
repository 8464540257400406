//! Mini-game reward table
//!
//! The games themselves live elsewhere; they only report a win. This table
//! says what a win pays and which game-specific achievement it carries.

use crate::domain::{AchievementId, PlayerState};
use crate::progression::{Applied, ProgressionEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MiniGame {
    GuessNumber,
    RockPaperScissors,
    Hangman,
    CodeBreaker,
    Descramble,
    /// Hidden until the session reaches 100 points
    TreasureHunt,
}

impl MiniGame {
    pub const ALL: [MiniGame; 6] = [
        MiniGame::GuessNumber,
        MiniGame::RockPaperScissors,
        MiniGame::Hangman,
        MiniGame::CodeBreaker,
        MiniGame::Descramble,
        MiniGame::TreasureHunt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GuessNumber => "guess",
            Self::RockPaperScissors => "rps",
            Self::Hangman => "hangman",
            Self::CodeBreaker => "code-breaker",
            Self::Descramble => "descramble",
            Self::TreasureHunt => "treasure",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "guess" | "guess-number" => Some(Self::GuessNumber),
            "rps" | "rock-paper-scissors" => Some(Self::RockPaperScissors),
            "hangman" => Some(Self::Hangman),
            "code-breaker" | "codebreaker" | "mastermind" => Some(Self::CodeBreaker),
            "descramble" | "scramble" => Some(Self::Descramble),
            "treasure" | "treasure-hunt" => Some(Self::TreasureHunt),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::GuessNumber => "Guess the Number",
            Self::RockPaperScissors => "Rock Paper Scissors",
            Self::Hangman => "Hangman",
            Self::CodeBreaker => "Code Breaker",
            Self::Descramble => "Word Descramble",
            Self::TreasureHunt => "Treasure Hunt",
        }
    }

    /// Base points for a win
    pub fn reward(&self) -> i64 {
        match self {
            Self::GuessNumber => 5,
            Self::RockPaperScissors => 2,
            Self::Hangman => 3,
            Self::CodeBreaker => 8,
            Self::Descramble => 5,
            Self::TreasureHunt => 20,
        }
    }

    pub fn achievement(&self) -> Option<AchievementId> {
        match self {
            Self::Hangman => Some(AchievementId::WordMaster),
            Self::CodeBreaker => Some(AchievementId::CodeMaster),
            Self::Descramble => Some(AchievementId::Decoder),
            _ => None,
        }
    }

    pub fn requires_secret(&self) -> bool {
        matches!(self, Self::TreasureHunt)
    }
}

impl std::fmt::Display for MiniGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} is still locked")]
pub struct GameLocked(pub MiniGame);

/// Pay out a win: the award first, then the game's own achievement
pub fn record_win(
    engine: &ProgressionEngine,
    state: &PlayerState,
    game: MiniGame,
) -> Result<Applied, GameLocked> {
    if game.requires_secret() && !state.tally.secret_unlocked {
        return Err(GameLocked(game));
    }

    let mut applied = engine.award_points(state, game.reward(), &format!("{} won", game.label()));
    if let Some(id) = game.achievement() {
        let unlocked = engine.unlock_achievement(&applied.state, id);
        applied.state = unlocked.state;
        applied.effects.merge(unlocked.effects);
    }
    Ok(applied)
}
