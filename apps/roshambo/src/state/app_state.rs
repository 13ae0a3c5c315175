use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::adapters::games_sea::GameRepoSea;
use crate::adapters::memory::{GameRepoMemory, TurnRepoMemory, UserRepoMemory};
use crate::adapters::turns_sea::TurnRepoSea;
use crate::adapters::users_sea::UserRepoSea;
use crate::repos::{GameRepo, TurnRepo, UserRepo};

/// Application state containing the shared repositories
#[derive(Clone)]
pub struct AppState {
    pub games: Arc<dyn GameRepo>,
    pub turns: Arc<dyn TurnRepo>,
    pub users: Arc<dyn UserRepo>,
    /// Database connection backing the repositories (None for in-memory storage)
    db: Option<DatabaseConnection>,
}

impl AppState {
    /// Repositories backed by the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            games: Arc::new(GameRepoSea::new(db.clone())),
            turns: Arc::new(TurnRepoSea::new(db.clone())),
            users: Arc::new(UserRepoSea::new(db.clone())),
            db: Some(db),
        }
    }

    /// Process-local repositories
    pub fn in_memory() -> Self {
        Self {
            games: Arc::new(GameRepoMemory::new()),
            turns: Arc::new(TurnRepoMemory::new()),
            users: Arc::new(UserRepoMemory::new()),
            db: None,
        }
    }

    /// Same state with the game directory replaced.
    pub fn with_games(mut self, games: Arc<dyn GameRepo>) -> Self {
        self.games = games;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("db", &self.db.is_some())
            .finish_non_exhaustive()
    }
}
