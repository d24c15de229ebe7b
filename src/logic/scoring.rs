//! Score entry for scheduled matches.

use crate::models::{CourtId, RoundNumber, Score, Tournament, TournamentError};

/// Set (or with `None`, clear) the score of the match on `court` in `round`.
pub fn record_score(
    tournament: &mut Tournament,
    round: RoundNumber,
    court: CourtId,
    score: Option<Score>,
) -> Result<(), TournamentError> {
    let m = tournament
        .round_mut(round)
        .and_then(|r| r.match_on_mut(court))
        .ok_or(TournamentError::MatchNotFound { round, court })?;
    m.score = score;
    match score {
        Some(s) => log::debug!(
            "Round {} court {}: {} - {}",
            round,
            court,
            s.team_one,
            s.team_two
        ),
        None => log::debug!("Round {} court {}: score cleared", round, court),
    }
    Ok(())
}
