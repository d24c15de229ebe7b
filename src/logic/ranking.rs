//! Leaderboard: per-player tallies recomputed from the match history.

use crate::models::{Match, Player, RankingEntry, Team, Tournament, TournamentError};
use std::collections::HashMap;

/// Compute the leaderboard for `roster` from `matches`.
///
/// Every roster player gets an entry. Unscored matches only count toward `scheduled`.
/// Order: wins (desc), point differential (desc), name (asc).
pub fn compute<'a, I>(roster: &[Player], matches: I) -> Result<Vec<RankingEntry>, TournamentError>
where
    I: IntoIterator<Item = &'a Match>,
{
    let mut entries: Vec<RankingEntry> = roster.iter().map(|p| RankingEntry::new(&p.name)).collect();
    let index: HashMap<&str, usize> = roster
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.as_str(), i))
        .collect();

    for m in matches {
        for team in [Team::One, Team::Two] {
            for name in m.team(team) {
                let i = *index
                    .get(name.as_str())
                    .ok_or_else(|| TournamentError::UnknownPlayer(name.clone()))?;
                apply_match(&mut entries[i], m, team);
            }
        }
    }

    entries.sort_by(|a, b| {
        b.wins
            .cmp(&a.wins)
            .then(b.point_differential().cmp(&a.point_differential()))
            .then_with(|| a.player.cmp(&b.player))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }
    Ok(entries)
}

/// Fold one match into the entry of a player on `side`.
fn apply_match(entry: &mut RankingEntry, m: &Match, side: Team) {
    entry.scheduled += 1;
    let Some(score) = m.score else {
        return;
    };
    let (own, other) = match side {
        Team::One => (score.team_one, score.team_two),
        Team::Two => (score.team_two, score.team_one),
    };
    entry.played += 1;
    entry.points_for = entry.points_for.saturating_add(u64::from(own));
    entry.points_against = entry.points_against.saturating_add(u64::from(other));
    match score.winner() {
        None => entry.draws += 1,
        Some(winner) if winner == side => entry.wins += 1,
        Some(_) => entry.losses += 1,
    }
}

impl Tournament {
    /// Current leaderboard over every scheduled match.
    pub fn rankings(&self) -> Result<Vec<RankingEntry>, TournamentError> {
        compute(&self.roster, self.matches())
    }
}
