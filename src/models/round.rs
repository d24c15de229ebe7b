//! Round: the matches played simultaneously, plus idle courts and resting players.

use crate::models::game::{CourtId, Match, RoundNumber};
use crate::models::player::PlayerName;
use serde::{Deserialize, Serialize};

/// One scheduling slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: RoundNumber,
    pub matches: Vec<Match>,
    /// Courts with no match this round (ascending).
    #[serde(default)]
    pub idle_courts: Vec<CourtId>,
    /// Players not scheduled this round (roster order).
    #[serde(default)]
    pub resting: Vec<PlayerName>,
}

impl Round {
    pub fn match_on(&self, court: CourtId) -> Option<&Match> {
        self.matches.iter().find(|m| m.court == court)
    }

    pub fn match_on_mut(&mut self, court: CourtId) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.court == court)
    }

    /// True when every match of the round has a score.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(Match::is_scored)
    }

    /// Everyone on court this round.
    pub fn players(&self) -> impl Iterator<Item = &PlayerName> {
        self.matches.iter().flat_map(Match::players)
    }
}
