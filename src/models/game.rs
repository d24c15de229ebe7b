//! Match, Score, Court and MatchFormat for singles / doubles padel.

use crate::models::player::PlayerName;
use serde::{Deserialize, Serialize};

/// Court number, starting at 1.
pub type CourtId = u32;

/// Round number, starting at 1.
pub type RoundNumber = u32;

/// Singles (1v1) or doubles (2v2).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFormat {
    Singles,
    #[default]
    Doubles,
}

impl MatchFormat {
    /// Players on each side of the net.
    pub fn team_size(self) -> usize {
        match self {
            MatchFormat::Singles => 1,
            MatchFormat::Doubles => 2,
        }
    }

    /// Players needed to fill one court.
    pub fn players_per_match(self) -> usize {
        self.team_size() * 2
    }
}

/// A playing slot. Exists only as a scheduling target.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub name: String,
}

impl Court {
    pub fn new(id: CourtId) -> Self {
        Self {
            id,
            name: format!("Court {id}"),
        }
    }

    /// Courts `1..=count` with default names.
    pub fn numbered(count: u32) -> Vec<Court> {
        (1..=count).map(Court::new).collect()
    }
}

/// Which side of a match.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    One,
    Two,
}

/// Games won by each team. The higher score wins; equal scores are a draw.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub team_one: u32,
    pub team_two: u32,
}

impl Score {
    pub fn new(team_one: u32, team_two: u32) -> Self {
        Self { team_one, team_two }
    }

    /// `None` for a draw.
    pub fn winner(&self) -> Option<Team> {
        use std::cmp::Ordering::*;
        match self.team_one.cmp(&self.team_two) {
            Greater => Some(Team::One),
            Less => Some(Team::Two),
            Equal => None,
        }
    }
}

/// A single match on one court in one round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub round: RoundNumber,
    pub court: CourtId,
    /// One name for singles, two for doubles.
    pub team_one: Vec<PlayerName>,
    pub team_two: Vec<PlayerName>,
    /// None until a result is entered.
    #[serde(default)]
    pub score: Option<Score>,
}

impl Match {
    pub fn new(
        round: RoundNumber,
        court: CourtId,
        team_one: Vec<PlayerName>,
        team_two: Vec<PlayerName>,
    ) -> Self {
        Self {
            round,
            court,
            team_one,
            team_two,
            score: None,
        }
    }

    /// Builder-style score, handy when assembling match histories by hand.
    pub fn with_score(mut self, team_one: u32, team_two: u32) -> Self {
        self.score = Some(Score::new(team_one, team_two));
        self
    }

    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }

    pub fn players(&self) -> impl Iterator<Item = &PlayerName> {
        self.team_one.iter().chain(self.team_two.iter())
    }

    pub fn team(&self, team: Team) -> &[PlayerName] {
        match team {
            Team::One => &self.team_one,
            Team::Two => &self.team_two,
        }
    }
}
