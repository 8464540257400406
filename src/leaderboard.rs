//! Read-only ranking over a profile store

use crate::store::{ProfileStore, StoreResult};

/// One line of the board
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    /// 1-based position on the board
    pub position: usize,
    pub name: String,
    pub points: u64,
    /// Points relative to the leader, 0.0..=1.0
    pub share_of_leader: f64,
}

/// Where one player sits among everyone
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStanding {
    pub rank: u64,
    pub total_players: u64,
    /// Share of players at or below this rank, in percent
    pub percentile: f64,
}

pub struct Leaderboard<'a> {
    store: &'a dyn ProfileStore,
}

impl<'a> Leaderboard<'a> {
    pub fn new(store: &'a dyn ProfileStore) -> Self {
        Self { store }
    }

    /// Top `n` players, highest points first
    pub fn top(&self, n: usize) -> StoreResult<Vec<Standing>> {
        let profiles = self.store.top_n(n)?;
        let leader = profiles.first().map(|p| p.points).unwrap_or(0);

        Ok(profiles
            .into_iter()
            .enumerate()
            .map(|(idx, profile)| Standing {
                position: idx + 1,
                share_of_leader: share(profile.points, leader),
                name: profile.name,
                points: profile.points,
            })
            .collect())
    }

    /// 1-based rank; an unknown player is registered with zero points first
    pub fn rank(&self, name: &str) -> StoreResult<u64> {
        self.store.rank(name)
    }

    pub fn standing(&self, name: &str) -> StoreResult<PlayerStanding> {
        let rank = self.store.rank(name)?;
        let total_players = self.store.count()?.max(rank);
        let percentile = if total_players == 0 {
            0.0
        } else {
            (total_players - rank + 1) as f64 * 100.0 / total_players as f64
        };
        Ok(PlayerStanding {
            rank,
            total_players,
            percentile,
        })
    }
}

fn share(points: u64, leader: u64) -> f64 {
    if leader == 0 {
        0.0
    } else {
        points as f64 / leader as f64
    }
}
