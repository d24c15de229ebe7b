//! Tournament, TournamentConfig and TournamentError.

use crate::models::game::{Court, Match, MatchFormat, RoundNumber};
use crate::models::player::Player;
use crate::models::round::Round;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Not enough distinct players to fill a single match.
    InsufficientPlayers { required: usize, available: usize },
    /// Court count must be between 1 and `MAX_COURTS`.
    InvalidCourtCount,
    /// More rounds requested than `MAX_ROUNDS`.
    TooManyRounds { requested: u32, limit: u32 },
    /// A match or edit references a player missing from the roster.
    UnknownPlayer(String),
    /// A saved document could not be read back into a tournament.
    MalformedPersistedState(String),
    /// Player names must not be blank.
    EmptyPlayerName,
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName(String),
    /// No match is scheduled on this court in this round.
    MatchNotFound { round: RoundNumber, court: u32 },
    /// Rounds, courts and players do not line up.
    InconsistentSchedule(String),
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// No tournament is open in the session.
    NoTournament,
    /// Reading or writing a saved tournament failed.
    Storage(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InsufficientPlayers { required, available } => write!(
                f,
                "Need at least {} players to schedule a match (have {})",
                required, available
            ),
            TournamentError::InvalidCourtCount => {
                write!(f, "Court count must be between 1 and {}", MAX_COURTS)
            }
            TournamentError::TooManyRounds { requested, limit } => write!(
                f,
                "Cannot schedule {} rounds (at most {})",
                requested, limit
            ),
            TournamentError::UnknownPlayer(name) => write!(f, "Unknown player: {}", name),
            TournamentError::MalformedPersistedState(reason) => {
                write!(f, "Saved tournament is malformed: {}", reason)
            }
            TournamentError::EmptyPlayerName => write!(f, "Player name must not be empty"),
            TournamentError::DuplicatePlayerName(name) => {
                write!(f, "A player named {} already exists", name)
            }
            TournamentError::MatchNotFound { round, court } => {
                write!(f, "No match on court {} in round {}", court, round)
            }
            TournamentError::InconsistentSchedule(reason) => {
                write!(f, "Inconsistent schedule: {}", reason)
            }
            TournamentError::InvalidState => {
                write!(f, "Scores have been recorded; the tournament can no longer be reconfigured")
            }
            TournamentError::NoTournament => write!(f, "No tournament is open"),
            TournamentError::Storage(reason) => write!(f, "Storage error: {}", reason),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Most courts a tournament can be configured with.
pub const MAX_COURTS: u32 = 64;

/// Most rounds a single schedule may contain.
pub const MAX_ROUNDS: u32 = 500;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

fn default_courts() -> u32 {
    1
}

/// What the organizer enters before the first schedule is generated.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub players: Vec<String>,
    #[serde(default = "default_courts")]
    pub courts: u32,
    #[serde(default)]
    pub format: MatchFormat,
}

impl TournamentConfig {
    pub fn new<I, S>(players: I, courts: u32, format: MatchFormat) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            players: players.into_iter().map(Into::into).collect(),
            courts,
            format,
        }
    }
}

fn default_court_list() -> Vec<Court> {
    Court::numbered(1)
}

/// Root aggregate: roster, courts, format and the generated rounds with their scores.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    #[serde(default = "Uuid::new_v4")]
    pub id: TournamentId,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    pub roster: Vec<Player>,
    #[serde(default = "default_court_list")]
    pub courts: Vec<Court>,
    #[serde(default)]
    pub format: MatchFormat,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Tournament {
    /// Create a tournament with no rounds yet. Names are trimmed and must be unique.
    pub fn new(config: TournamentConfig) -> Result<Self, TournamentError> {
        check_court_count(config.courts)?;
        let mut tournament = Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            roster: Vec::with_capacity(config.players.len()),
            courts: Court::numbered(config.courts),
            format: config.format,
            rounds: Vec::new(),
        };
        for name in config.players {
            tournament.push_player(&name)?;
        }
        Ok(tournament)
    }

    pub fn court_count(&self) -> u32 {
        self.courts.len() as u32
    }

    pub fn contains_player(&self, name: &str) -> bool {
        self.roster.iter().any(|p| p.name == name)
    }

    /// All matches across all rounds, in round order.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.rounds.iter().flat_map(|r| r.matches.iter())
    }

    pub fn has_scores(&self) -> bool {
        self.matches().any(Match::is_scored)
    }

    pub fn round(&self, number: RoundNumber) -> Option<&Round> {
        self.rounds.iter().find(|r| r.number == number)
    }

    pub fn round_mut(&mut self, number: RoundNumber) -> Option<&mut Round> {
        self.rounds.iter_mut().find(|r| r.number == number)
    }

    /// Add a player. Discards the current schedule; rejected once scores exist.
    pub fn add_player(&mut self, name: &str) -> Result<(), TournamentError> {
        self.ensure_reconfigurable()?;
        self.push_player(name)?;
        self.discard_schedule();
        Ok(())
    }

    /// Remove a player by name (case-insensitive). Same reconfiguration rule as `add_player`.
    pub fn remove_player(&mut self, name: &str) -> Result<(), TournamentError> {
        self.ensure_reconfigurable()?;
        let idx = self
            .roster
            .iter()
            .position(|p| p.same_name(name))
            .ok_or_else(|| TournamentError::UnknownPlayer(name.trim().to_string()))?;
        self.roster.remove(idx);
        self.discard_schedule();
        Ok(())
    }

    /// Change the number of courts. Same reconfiguration rule as `add_player`.
    pub fn set_courts(&mut self, count: u32) -> Result<(), TournamentError> {
        check_court_count(count)?;
        self.ensure_reconfigurable()?;
        self.courts = Court::numbered(count);
        self.discard_schedule();
        Ok(())
    }

    /// Switch between singles and doubles. Same reconfiguration rule as `add_player`.
    pub fn set_format(&mut self, format: MatchFormat) -> Result<(), TournamentError> {
        self.ensure_reconfigurable()?;
        if self.format != format {
            self.format = format;
            self.discard_schedule();
        }
        Ok(())
    }

    pub(crate) fn ensure_reconfigurable(&self) -> Result<(), TournamentError> {
        if self.has_scores() {
            return Err(TournamentError::InvalidState);
        }
        Ok(())
    }

    fn push_player(&mut self, name: &str) -> Result<(), TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::EmptyPlayerName);
        }
        if self.roster.iter().any(|p| p.same_name(name)) {
            return Err(TournamentError::DuplicatePlayerName(name.to_string()));
        }
        self.roster.push(Player::new(name));
        Ok(())
    }

    fn discard_schedule(&mut self) {
        if !self.rounds.is_empty() {
            log::info!(
                "Tournament {} reconfigured, discarding {} scheduled round(s)",
                self.id,
                self.rounds.len()
            );
            self.rounds.clear();
        }
    }

    /// Check every structural invariant: unique names, known courts and players,
    /// one match per court and one match per player in each round, idle courts
    /// and resting players consistent with the matches.
    pub fn validate(&self) -> Result<(), TournamentError> {
        check_court_count(self.courts.len().try_into().unwrap_or(u32::MAX))?;
        let mut court_ids = HashSet::new();
        for court in &self.courts {
            if !court_ids.insert(court.id) {
                return Err(inconsistent(format!("court {} listed twice", court.id)));
            }
        }

        let mut names: HashSet<String> = HashSet::new();
        for p in &self.roster {
            if p.name.trim().is_empty() {
                return Err(TournamentError::EmptyPlayerName);
            }
            if !names.insert(p.name.to_lowercase()) {
                return Err(TournamentError::DuplicatePlayerName(p.name.clone()));
            }
        }

        let team_size = self.format.team_size();
        for (idx, round) in self.rounds.iter().enumerate() {
            let expected = idx as RoundNumber + 1;
            if round.number != expected {
                return Err(inconsistent(format!(
                    "round {} found where round {} was expected",
                    round.number, expected
                )));
            }
            let mut used_courts = HashSet::new();
            let mut seen_players = HashSet::new();
            for m in &round.matches {
                if m.round != round.number {
                    return Err(inconsistent(format!(
                        "match on court {} is labelled round {} inside round {}",
                        m.court, m.round, round.number
                    )));
                }
                if !court_ids.contains(&m.court) {
                    return Err(inconsistent(format!(
                        "round {} uses unknown court {}",
                        round.number, m.court
                    )));
                }
                if !used_courts.insert(m.court) {
                    return Err(inconsistent(format!(
                        "court {} hosts two matches in round {}",
                        m.court, round.number
                    )));
                }
                if m.team_one.len() != team_size || m.team_two.len() != team_size {
                    return Err(inconsistent(format!(
                        "match on court {} in round {} has the wrong team size",
                        m.court, round.number
                    )));
                }
                for player in m.players() {
                    if !self.contains_player(player) {
                        return Err(TournamentError::UnknownPlayer(player.clone()));
                    }
                    if !seen_players.insert(player.as_str()) {
                        return Err(inconsistent(format!(
                            "{} plays twice in round {}",
                            player, round.number
                        )));
                    }
                }
            }

            let mut idle: Vec<_> = court_ids.difference(&used_courts).copied().collect();
            idle.sort_unstable();
            let mut listed_idle = round.idle_courts.clone();
            listed_idle.sort_unstable();
            if idle != listed_idle {
                return Err(inconsistent(format!(
                    "idle courts of round {} do not match its matches",
                    round.number
                )));
            }

            for player in &round.resting {
                if !self.contains_player(player) {
                    return Err(TournamentError::UnknownPlayer(player.clone()));
                }
                if !seen_players.insert(player.as_str()) {
                    return Err(inconsistent(format!(
                        "{} is listed twice among the players of round {}",
                        player, round.number
                    )));
                }
            }

            // Every roster player is either on a court or resting.
            if let Some(missing) = self
                .roster
                .iter()
                .find(|p| !seen_players.contains(p.name.as_str()))
            {
                return Err(inconsistent(format!(
                    "{} neither plays nor rests in round {}",
                    missing.name, round.number
                )));
            }
        }
        Ok(())
    }
}

fn check_court_count(count: u32) -> Result<(), TournamentError> {
    if count == 0 || count > MAX_COURTS {
        return Err(TournamentError::InvalidCourtCount);
    }
    Ok(())
}

fn inconsistent(reason: String) -> TournamentError {
    TournamentError::InconsistentSchedule(reason)
}
