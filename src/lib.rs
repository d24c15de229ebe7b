//! Padel tournament organizer: library with models, scheduling, rankings and persistence.

pub mod logic;
pub mod models;
pub mod persistence;
pub mod session;

pub use logic::{
    compute_rankings, cumulative_points, generate_rounds, generate_schedule, record_score,
    round_points, totals_ordered, PerformanceHistory, PlayerSeries, PlayerTotal, RoundPoints,
};
pub use models::{
    Court, CourtId, Match, MatchFormat, Player, PlayerName, RankingEntry, Round, RoundNumber,
    Score, Team, Tournament, TournamentConfig, TournamentError, TournamentId, MAX_COURTS,
    MAX_ROUNDS,
};
pub use session::Session;
