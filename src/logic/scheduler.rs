//! Schedule generation: rotate players through courts so partners, opponents and rests even out.

use crate::models::{
    CourtId, Match, MatchFormat, Player, Round, RoundNumber, Tournament, TournamentError,
    MAX_COURTS, MAX_ROUNDS,
};

/// Playing with the same partner again weighs more than meeting the same opponent again.
const PARTNER_WEIGHT: u32 = 2;

/// Above this many candidate resting sets we stop searching and rest in roster order.
const REST_SEARCH_LIMIT: usize = 256;

/// Generate `rounds_requested` rounds for `players` on `court_count` courts.
///
/// 1. Drop duplicate names (first occurrence wins) and check there are enough players.
/// 2. Each round fills `min(court_count, players / players_per_match)` courts; everyone else rests.
/// 3. Players who rested least rest first; among equals, the resting set leaving the
///    cheapest grouping is chosen.
/// 4. The first unassigned player (roster order) anchors each match and is grouped with
///    the players it has partnered and faced least. Ties go to roster order.
///
/// Pure: the same input always yields the same schedule.
pub fn generate(
    players: &[Player],
    court_count: u32,
    rounds_requested: u32,
    format: MatchFormat,
) -> Result<Vec<Round>, TournamentError> {
    if court_count == 0 || court_count > MAX_COURTS {
        return Err(TournamentError::InvalidCourtCount);
    }
    if rounds_requested > MAX_ROUNDS {
        return Err(TournamentError::TooManyRounds {
            requested: rounds_requested,
            limit: MAX_ROUNDS,
        });
    }

    let mut names: Vec<&str> = Vec::with_capacity(players.len());
    for p in players {
        if !names.contains(&p.name.as_str()) {
            names.push(&p.name);
        }
    }

    let per_match = format.players_per_match();
    if names.len() < per_match {
        return Err(TournamentError::InsufficientPlayers {
            required: per_match,
            available: names.len(),
        });
    }

    let n = names.len();
    let matches_per_round = (court_count as usize).min(n / per_match);
    let resting_per_round = n - matches_per_round * per_match;
    let mut ledger = Ledger::new(n);
    let mut rounds = Vec::new();

    for number in 1..=rounds_requested {
        let resting = choose_resting(&ledger, resting_per_round, format);
        let active: Vec<usize> = (0..n).filter(|i| !resting.contains(i)).collect();
        let (groups, _) = group_players(&ledger, &active, format);
        ledger.record(&groups, &resting);
        rounds.push(build_round(number, &groups, &resting, &names, court_count));
    }

    log::debug!(
        "Generated {} round(s) for {} players: {} match(es) and {} resting per round on {} court(s)",
        rounds.len(),
        n,
        matches_per_round,
        resting_per_round,
        court_count
    );
    Ok(rounds)
}

/// Replace the tournament's rounds with a freshly generated schedule.
/// Rejected once any score has been recorded.
pub fn generate_schedule(
    tournament: &mut Tournament,
    rounds_requested: u32,
) -> Result<(), TournamentError> {
    tournament.ensure_reconfigurable()?;
    let rounds = generate(
        &tournament.roster,
        tournament.court_count(),
        rounds_requested,
        tournament.format,
    )?;
    tournament.rounds = rounds;
    Ok(())
}

/// One match as roster indices.
#[derive(Clone, Debug)]
struct Grouping {
    team_one: Vec<usize>,
    team_two: Vec<usize>,
}

/// Running counts of who has partnered, faced and rested, by roster index.
struct Ledger {
    n: usize,
    partners: Vec<u32>,
    opponents: Vec<u32>,
    rests: Vec<u32>,
}

impl Ledger {
    fn new(n: usize) -> Self {
        Self {
            n,
            partners: vec![0; n * n],
            opponents: vec![0; n * n],
            rests: vec![0; n],
        }
    }

    fn slot(&self, a: usize, b: usize) -> usize {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        lo * self.n + hi
    }

    fn cost(&self, team_one: &[usize], team_two: &[usize]) -> u32 {
        let mut cost = 0;
        for team in [team_one, team_two] {
            for (i, &a) in team.iter().enumerate() {
                for &b in &team[i + 1..] {
                    cost += PARTNER_WEIGHT * self.partners[self.slot(a, b)];
                }
            }
        }
        for &a in team_one {
            for &b in team_two {
                cost += self.opponents[self.slot(a, b)];
            }
        }
        cost
    }

    fn record(&mut self, groups: &[Grouping], resting: &[usize]) {
        for g in groups {
            for team in [&g.team_one, &g.team_two] {
                for (i, &a) in team.iter().enumerate() {
                    for &b in &team[i + 1..] {
                        let s = self.slot(a, b);
                        self.partners[s] += 1;
                    }
                }
            }
            for &a in &g.team_one {
                for &b in &g.team_two {
                    let s = self.slot(a, b);
                    self.opponents[s] += 1;
                }
            }
        }
        for &r in resting {
            self.rests[r] += 1;
        }
    }
}

/// Pick `needed` players to rest, lowest rest count first. Returned sorted.
fn choose_resting(ledger: &Ledger, needed: usize, format: MatchFormat) -> Vec<usize> {
    if needed == 0 {
        return Vec::new();
    }
    let n = ledger.n;
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| (ledger.rests[i], i));

    let threshold = ledger.rests[order[needed - 1]];
    let forced: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| ledger.rests[i] < threshold)
        .collect();
    let tier: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| ledger.rests[i] == threshold)
        .collect();
    let from_tier = needed - forced.len();

    let with_tier_picks = |picks: &[usize]| {
        let mut resting = forced.clone();
        resting.extend(picks.iter().map(|&c| tier[c]));
        resting.sort_unstable();
        resting
    };

    if binomial(tier.len(), from_tier) > REST_SEARCH_LIMIT {
        let first: Vec<usize> = (0..from_tier).collect();
        return with_tier_picks(&first);
    }

    let mut best: Option<(Vec<usize>, u32)> = None;
    let mut subsets = Subsets::new(tier.len(), from_tier);
    while let Some(picks) = subsets.next_subset() {
        let resting = with_tier_picks(picks);
        let active: Vec<usize> = (0..n).filter(|i| !resting.contains(i)).collect();
        let (_, cost) = group_players(ledger, &active, format);
        if best.as_ref().map_or(true, |(_, c)| cost < *c) {
            best = Some((resting, cost));
        }
    }
    best.map(|(resting, _)| resting).unwrap_or_default()
}

/// Greedily split `active` (ascending roster indices) into matches. Returns the groups
/// and their summed repetition cost.
fn group_players(ledger: &Ledger, active: &[usize], format: MatchFormat) -> (Vec<Grouping>, u32) {
    let per_match = format.players_per_match();
    let mut remaining = active.to_vec();
    let mut groups = Vec::with_capacity(active.len() / per_match);
    let mut total = 0;

    while remaining.len() >= per_match {
        let anchor = remaining.remove(0);
        let (group, cost) = best_group(ledger, anchor, &remaining, format);
        remaining.retain(|p| !group.team_one.contains(p) && !group.team_two.contains(p));
        total += cost;
        groups.push(group);
    }
    (groups, total)
}

/// Cheapest match containing `anchor`, drawn from `candidates` (ascending roster indices).
fn best_group(
    ledger: &Ledger,
    anchor: usize,
    candidates: &[usize],
    format: MatchFormat,
) -> (Grouping, u32) {
    let team_size = format.team_size();
    let others_needed = format.players_per_match() - 1;
    let mut best: Option<(Grouping, u32)> = None;
    let mut others = Vec::with_capacity(others_needed);
    let mut team_one = Vec::with_capacity(team_size);
    let mut team_two = Vec::with_capacity(team_size);

    let mut picks = Subsets::new(candidates.len(), others_needed);
    while let Some(pick) = picks.next_subset() {
        others.clear();
        others.extend(pick.iter().map(|&i| candidates[i]));

        let mut splits = Subsets::new(others.len(), team_size - 1);
        while let Some(partner_pick) = splits.next_subset() {
            team_one.clear();
            team_one.push(anchor);
            team_one.extend(partner_pick.iter().map(|&i| others[i]));
            team_two.clear();
            team_two.extend(
                others
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !partner_pick.contains(i))
                    .map(|(_, &p)| p),
            );
            let cost = ledger.cost(&team_one, &team_two);
            if best.as_ref().map_or(true, |(_, c)| cost < *c) {
                let group = Grouping {
                    team_one: team_one.clone(),
                    team_two: team_two.clone(),
                };
                best = Some((group, cost));
            }
        }
    }

    // `candidates` always holds at least `players_per_match - 1` players here.
    best.unwrap_or_else(|| {
        (
            Grouping {
                team_one: vec![anchor],
                team_two: Vec::new(),
            },
            0,
        )
    })
}

fn build_round(
    number: RoundNumber,
    groups: &[Grouping],
    resting: &[usize],
    names: &[&str],
    court_count: u32,
) -> Round {
    let to_names = |ids: &[usize]| -> Vec<String> { ids.iter().map(|&i| names[i].to_string()).collect() };
    let matches: Vec<Match> = groups
        .iter()
        .enumerate()
        .map(|(idx, g)| {
            Match::new(
                number,
                idx as CourtId + 1,
                to_names(&g.team_one),
                to_names(&g.team_two),
            )
        })
        .collect();
    let idle_courts = (matches.len() as CourtId + 1..=court_count).collect();
    Round {
        number,
        matches,
        idle_courts,
        resting: to_names(resting),
    }
}

/// Walks the `k`-element index subsets of `0..len` in lexicographic order,
/// reusing one buffer instead of allocating each subset.
struct Subsets {
    len: usize,
    indices: Vec<usize>,
    started: bool,
    done: bool,
}

impl Subsets {
    fn new(len: usize, k: usize) -> Self {
        Self {
            len,
            indices: (0..k).collect(),
            started: false,
            done: k > len,
        }
    }

    fn next_subset(&mut self) -> Option<&[usize]> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.indices);
        }
        let k = self.indices.len();
        // Rightmost index that can still move right.
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] < self.len - k + i) else {
            self.done = true;
            return None;
        };
        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
        Some(&self.indices)
    }
}

/// `n choose k`, saturating.
fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: usize = 1;
    for i in 0..k {
        acc = acc.saturating_mul(n - i) / (i + 1);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combinations(len: usize, k: usize) -> Vec<Vec<usize>> {
        let mut subsets = Subsets::new(len, k);
        let mut out = Vec::new();
        while let Some(s) = subsets.next_subset() {
            out.push(s.to_vec());
        }
        out
    }

    #[test]
    fn combinations_are_lexicographic() {
        assert_eq!(
            combinations(4, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![0, 3],
                vec![1, 2],
                vec![1, 3],
                vec![2, 3]
            ]
        );
        assert_eq!(combinations(3, 0), vec![Vec::<usize>::new()]);
        assert!(combinations(2, 3).is_empty());
    }

    #[test]
    fn binomial_matches_combination_count() {
        assert_eq!(binomial(4, 2), combinations(4, 2).len());
        assert_eq!(binomial(12, 4), 495);
        assert_eq!(combinations(12, 4).len(), 495);
        assert_eq!(combinations(5, 5), vec![vec![0, 1, 2, 3, 4]]);
        assert_eq!(binomial(3, 5), 0);
    }

    #[test]
    fn ledger_cost_weights_partners_over_opponents() {
        let mut ledger = Ledger::new(4);
        let groups = vec![Grouping {
            team_one: vec![0, 1],
            team_two: vec![2, 3],
        }];
        ledger.record(&groups, &[]);
        // Same teams again: two repeated partnerships and four repeated opponents.
        assert_eq!(ledger.cost(&[0, 1], &[2, 3]), 2 * PARTNER_WEIGHT + 4);
        // Swapped partners: only the two cross pairings were opponents before.
        assert_eq!(ledger.cost(&[0, 2], &[1, 3]), 2);
    }
}
