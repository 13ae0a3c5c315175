//! Game directory: stores games by identity and guards the join.

use async_trait::async_trait;

use crate::domain::{Game, GameId};
use crate::errors::domain::{DomainError, NotFoundKind};

#[async_trait]
pub trait GameRepo: Send + Sync {
    /// Store a new game. The stored copy starts at version 1 and is returned.
    async fn insert(&self, game: Game) -> Result<Game, DomainError>;

    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>, DomainError>;

    /// Replace the stored game unconditionally (last writer wins) and bump
    /// its version. Returns the stored copy.
    async fn update(&self, game: &Game) -> Result<Game, DomainError>;

    /// Replace the stored game only if it is still `WaitingToStart` at the
    /// version `game` was loaded with. `Ok(false)` means the guard failed and
    /// nothing was written.
    async fn try_join_waiting_to_start(&self, game: &Game) -> Result<bool, DomainError>;

    /// Up to `limit` games still waiting for players, ordered by id.
    async fn find_waiting_to_start(&self, limit: u64) -> Result<Vec<Game>, DomainError>;
}

/// Find game by ID or return error if not found.
pub async fn require_game(repo: &dyn GameRepo, id: GameId) -> Result<Game, DomainError> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Game, format!("Game {id} not found")))
}
