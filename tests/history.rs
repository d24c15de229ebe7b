//! Integration tests for per-round performance data.

use padel_tournament::{
    cumulative_points, round_points, totals_ordered, Match, Player, Round, RoundPoints,
};

fn roster(names: &[&str]) -> Vec<Player> {
    names.iter().map(|n| Player::new(*n)).collect()
}

fn round(number: u32, matches: Vec<Match>) -> Round {
    Round {
        number,
        matches,
        idle_courts: Vec::new(),
        resting: Vec::new(),
    }
}

fn doubles(round: u32, one: [&str; 2], two: [&str; 2]) -> Match {
    Match::new(
        round,
        1,
        one.iter().map(|s| s.to_string()).collect(),
        two.iter().map(|s| s.to_string()).collect(),
    )
}

fn points(pairs: &[(&str, u64)]) -> RoundPoints {
    pairs.iter().map(|(n, p)| (n.to_string(), *p)).collect()
}

fn two_scored_rounds() -> Vec<Round> {
    vec![
        round(1, vec![doubles(1, ["A", "B"], ["C", "D"]).with_score(6, 3)]),
        round(2, vec![doubles(2, ["A", "C"], ["B", "D"]).with_score(4, 6)]),
    ]
}

#[test]
fn points_per_round() {
    let history = round_points(&two_scored_rounds());
    assert_eq!(
        history,
        vec![
            points(&[("A", 6), ("B", 6), ("C", 3), ("D", 3)]),
            points(&[("A", 4), ("B", 6), ("C", 4), ("D", 6)]),
        ]
    );
}

#[test]
fn unscored_rounds_are_empty_and_skipped_in_series() {
    let rounds = vec![
        round(1, vec![doubles(1, ["A", "B"], ["C", "D"]).with_score(7, 5)]),
        round(2, vec![doubles(2, ["A", "C"], ["B", "D"])]),
        round(3, vec![doubles(3, ["A", "D"], ["B", "C"]).with_score(1, 6)]),
    ];
    let history = round_points(&rounds);
    assert_eq!(history[1], RoundPoints::new());

    let series = cumulative_points(&rounds, &roster(&["A", "B", "C", "D"]));
    assert_eq!(series[0].player, "A");
    assert_eq!(series[0].points, vec![(0, 0), (1, 7), (3, 8)]);
    assert_eq!(series[2].points, vec![(0, 0), (1, 5), (3, 11)]);
}

#[test]
fn players_without_points_keep_a_flat_series() {
    let rounds = two_scored_rounds();
    let series = cumulative_points(&rounds, &roster(&["A", "Dana"]));
    assert_eq!(series[1].player, "Dana");
    assert_eq!(series[1].points, vec![(0, 0), (1, 0), (2, 0)]);
    assert_eq!(series[1].total(), 0);
}

#[test]
fn totals_are_ordered_by_cumulative_points() {
    let rounds = two_scored_rounds();
    let totals = totals_ordered(&rounds, &roster(&["A", "B", "C", "D", "Dana"]));
    let order: Vec<(&str, u64)> = totals.iter().map(|t| (t.player.as_str(), t.points)).collect();
    assert_eq!(
        order,
        vec![("B", 12), ("A", 10), ("D", 9), ("C", 7), ("Dana", 0)]
    );
}

#[test]
fn equal_totals_keep_roster_order() {
    let rounds = vec![round(1, vec![doubles(1, ["A", "B"], ["C", "D"]).with_score(4, 4)])];
    let totals = totals_ordered(&rounds, &roster(&["D", "B", "C", "A"]));
    let order: Vec<&str> = totals.iter().map(|t| t.player.as_str()).collect();
    assert_eq!(order, vec!["D", "B", "C", "A"]);
}

#[test]
fn maximal_scores_accumulate_without_wrapping() {
    let big = u32::MAX;
    let rounds = vec![
        round(1, vec![doubles(1, ["A", "B"], ["C", "D"]).with_score(big, 0)]),
        round(2, vec![doubles(2, ["A", "C"], ["B", "D"]).with_score(big, 1)]),
    ];
    let series = cumulative_points(&rounds, &roster(&["A", "B", "C", "D"]));
    assert_eq!(series[0].total(), 2 * u64::from(big));
    assert_eq!(series[1].total(), u64::from(big) + 1);

    let totals = totals_ordered(&rounds, &roster(&["A", "B", "C", "D"]));
    assert_eq!(totals[0].player, "A");
    assert_eq!(totals[0].points, 2 * u64::from(big));
}
