//! JSON documents for saving and reloading a tournament.
//!
//! The document is the serialized `Tournament`: roster, courts, format and rounds with
//! their scores. Rankings and history are derived and never written.

use crate::models::{Tournament, TournamentError};
use std::path::Path;

/// Pretty-printed JSON document for `tournament`.
pub fn to_json(tournament: &Tournament) -> Result<String, TournamentError> {
    serde_json::to_string_pretty(tournament).map_err(|e| TournamentError::Storage(e.to_string()))
}

/// Parse and validate a document. Missing `format`, `courts` and `rounds` fall back to
/// doubles, one court and no rounds.
pub fn from_json(document: &str) -> Result<Tournament, TournamentError> {
    let tournament: Tournament = serde_json::from_str(document)
        .map_err(|e| TournamentError::MalformedPersistedState(e.to_string()))?;
    tournament
        .validate()
        .map_err(|e| TournamentError::MalformedPersistedState(e.to_string()))?;
    Ok(tournament)
}

pub fn save_to_path(path: impl AsRef<Path>, tournament: &Tournament) -> Result<(), TournamentError> {
    let path = path.as_ref();
    let document = to_json(tournament)?;
    std::fs::write(path, document)
        .map_err(|e| TournamentError::Storage(format!("{}: {}", path.display(), e)))?;
    log::info!("Saved tournament {} to {}", tournament.id, path.display());
    Ok(())
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Tournament, TournamentError> {
    let path = path.as_ref();
    let document = std::fs::read_to_string(path)
        .map_err(|e| TournamentError::Storage(format!("{}: {}", path.display(), e)))?;
    from_json(&document)
}
