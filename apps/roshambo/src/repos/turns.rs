//! Turn ledger: append-only history of finalized turns.

use async_trait::async_trait;

use crate::domain::{GameId, TurnRecord};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait TurnRepo: Send + Sync {
    /// Append a record. A second record for the same (game, turn index) is a
    /// `Conflict(DuplicateTurn)`.
    async fn insert(&self, record: &TurnRecord) -> Result<(), DomainError>;

    /// The newest `limit` records of a game, returned oldest first.
    async fn last_turns(&self, game_id: GameId, limit: u64)
        -> Result<Vec<TurnRecord>, DomainError>;
}
