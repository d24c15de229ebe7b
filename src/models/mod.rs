//! Data structures for the padel tournament: players, courts, matches, rounds, tournament.

mod game;
mod player;
mod round;
mod tournament;

pub use game::{Court, CourtId, Match, MatchFormat, RoundNumber, Score, Team};
pub use player::{Player, PlayerName, RankingEntry};
pub use round::Round;
pub use tournament::{
    Tournament, TournamentConfig, TournamentError, TournamentId, MAX_COURTS, MAX_ROUNDS,
};
