//! Tournament business logic: scheduling, score entry, rankings and performance history.

mod history;
mod ranking;
mod scheduler;
mod scoring;

pub use history::{
    cumulative_points, round_points, totals_ordered, PerformanceHistory, PlayerSeries,
    PlayerTotal, RoundPoints,
};
pub use ranking::compute as compute_rankings;
pub use scheduler::{generate as generate_rounds, generate_schedule};
pub use scoring::record_score;
