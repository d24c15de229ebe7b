//! The open tournament of an application session.
//!
//! Callers own a `Session` and pass it to whatever handles user actions. At most one
//! tournament is open at a time; a failed call leaves the session as it was.

use crate::models::{Tournament, TournamentConfig, TournamentError};
use crate::persistence;
use std::path::Path;

#[derive(Debug, Default)]
pub struct Session {
    current: Option<Tournament>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Result<&Tournament, TournamentError> {
        self.current.as_ref().ok_or(TournamentError::NoTournament)
    }

    pub fn current_mut(&mut self) -> Result<&mut Tournament, TournamentError> {
        self.current.as_mut().ok_or(TournamentError::NoTournament)
    }

    /// Start a new tournament, replacing the open one.
    pub fn create(&mut self, config: TournamentConfig) -> Result<&Tournament, TournamentError> {
        let tournament = Tournament::new(config)?;
        log::info!(
            "Created tournament {} ({} players, {} court(s))",
            tournament.id,
            tournament.roster.len(),
            tournament.court_count()
        );
        Ok(&*self.current.insert(tournament))
    }

    /// Open a tournament from a JSON document, replacing the open one.
    pub fn load(&mut self, document: &str) -> Result<&Tournament, TournamentError> {
        let tournament = persistence::from_json(document).map_err(|e| {
            log::warn!("Rejected tournament document: {}", e);
            e
        })?;
        log::info!("Loaded tournament {}", tournament.id);
        Ok(&*self.current.insert(tournament))
    }

    /// JSON document for the open tournament.
    pub fn save(&self) -> Result<String, TournamentError> {
        persistence::to_json(self.current()?)
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&Tournament, TournamentError> {
        let tournament = persistence::load_from_path(path)?;
        Ok(&*self.current.insert(tournament))
    }

    pub fn save_file(&self, path: impl AsRef<Path>) -> Result<(), TournamentError> {
        persistence::save_to_path(path, self.current()?)
    }

    /// Swap in an already-built tournament; returns the one it replaces.
    pub fn replace(&mut self, tournament: Tournament) -> Result<Option<Tournament>, TournamentError> {
        tournament.validate()?;
        Ok(self.current.replace(tournament))
    }

    /// Close the open tournament, handing it back to the caller.
    pub fn close(&mut self) -> Option<Tournament> {
        let closed = self.current.take();
        if let Some(t) = &closed {
            log::info!("Closed tournament {}", t.id);
        }
        closed
    }
}
