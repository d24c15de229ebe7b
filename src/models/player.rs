//! Player data structure.

use serde::{Deserialize, Serialize};

/// Players are identified by their name, unique within a tournament.
pub type PlayerName = String;

/// A player in the tournament roster.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerName,
}

impl Player {
    /// Create a new player. The name is trimmed.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: name.trim().to_string(),
        }
    }

    /// Case-insensitive name comparison, used for duplicate detection.
    pub fn same_name(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other.trim())
    }
}

impl From<&str> for Player {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Leaderboard row for one player. Derived from the match history, never stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 1-based position in the leaderboard.
    pub rank: u32,
    pub player: PlayerName,
    /// Matches the player is scheduled in, scored or not.
    pub scheduled: u32,
    /// Matches with a recorded score.
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    /// Points summed over scored matches; wide enough that any history of `u32` scores fits.
    pub points_for: u64,
    pub points_against: u64,
}

impl RankingEntry {
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            ..Self::default()
        }
    }

    pub fn point_differential(&self) -> i64 {
        let signed = |points: u64| i64::try_from(points).unwrap_or(i64::MAX);
        signed(self.points_for).saturating_sub(signed(self.points_against))
    }
}
