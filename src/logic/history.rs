//! Per-round performance data: points per round, running totals, cumulative ordering.

use crate::models::{Player, PlayerName, Round, RoundNumber, Team, Tournament};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points each player scored in one round. Empty when nothing in the round was scored.
pub type RoundPoints = BTreeMap<PlayerName, u64>;

/// Running total of one player's points.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeries {
    pub player: PlayerName,
    /// `(round, cumulative points)`, starting at `(0, 0)`, one point per round with any score.
    pub points: Vec<(RoundNumber, u64)>,
}

impl PlayerSeries {
    pub fn total(&self) -> u64 {
        self.points.last().map_or(0, |&(_, total)| total)
    }
}

/// Cumulative points of one player.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerTotal {
    pub player: PlayerName,
    pub points: u64,
}

/// Everything a performance chart needs, in one projection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PerformanceHistory {
    pub rounds: Vec<RoundPoints>,
    pub series: Vec<PlayerSeries>,
    pub totals: Vec<PlayerTotal>,
}

/// One entry per round: each player's points from that round's scored matches.
pub fn round_points(rounds: &[Round]) -> Vec<RoundPoints> {
    rounds
        .iter()
        .map(|round| {
            let mut points = RoundPoints::new();
            for m in &round.matches {
                let Some(score) = m.score else {
                    continue;
                };
                for (team, scored) in [(Team::One, score.team_one), (Team::Two, score.team_two)] {
                    for name in m.team(team) {
                        let total = points.entry(name.clone()).or_default();
                        *total = total.saturating_add(u64::from(scored));
                    }
                }
            }
            points
        })
        .collect()
}

/// Running totals per roster player. Rounds without any score are skipped.
pub fn cumulative_points(rounds: &[Round], roster: &[Player]) -> Vec<PlayerSeries> {
    let per_round = round_points(rounds);
    roster
        .iter()
        .map(|p| {
            let mut total: u64 = 0;
            let mut points = vec![(0, 0)];
            for (round, scored) in rounds.iter().zip(&per_round) {
                if scored.is_empty() {
                    continue;
                }
                total = total.saturating_add(scored.get(&p.name).copied().unwrap_or(0));
                points.push((round.number, total));
            }
            PlayerSeries {
                player: p.name.clone(),
                points,
            }
        })
        .collect()
}

/// Roster players by cumulative points (desc); equal totals keep roster order.
pub fn totals_ordered(rounds: &[Round], roster: &[Player]) -> Vec<PlayerTotal> {
    let mut totals: Vec<PlayerTotal> = cumulative_points(rounds, roster)
        .into_iter()
        .map(|s| PlayerTotal {
            points: s.total(),
            player: s.player,
        })
        .collect();
    totals.sort_by(|a, b| b.points.cmp(&a.points));
    totals
}

impl Tournament {
    pub fn history(&self) -> PerformanceHistory {
        PerformanceHistory {
            rounds: round_points(&self.rounds),
            series: cumulative_points(&self.rounds, &self.roster),
            totals: totals_ordered(&self.rounds, &self.roster),
        }
    }
}
