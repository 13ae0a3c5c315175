use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::domain::{Game, GameId, GameStatus};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use crate::repos::games::GameRepo;

/// In-memory game directory.
///
/// Each conditional replace runs while holding the entry's shard lock, so the
/// check and the write cannot interleave with another writer.
#[derive(Debug, Default)]
pub struct GameRepoMemory {
    games: DashMap<GameId, Game>,
}

impl GameRepoMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepo for GameRepoMemory {
    async fn insert(&self, mut game: Game) -> Result<Game, DomainError> {
        match self.games.entry(game.id) {
            Entry::Occupied(_) => Err(DomainError::conflict(
                ConflictKind::DuplicateId,
                format!("Game {} already exists", game.id),
            )),
            Entry::Vacant(slot) => {
                game.version = 1;
                slot.insert(game.clone());
                Ok(game)
            }
        }
    }

    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>, DomainError> {
        Ok(self.games.get(&id).map(|g| g.value().clone()))
    }

    async fn update(&self, game: &Game) -> Result<Game, DomainError> {
        let mut stored = self.games.get_mut(&game.id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {} not found", game.id))
        })?;
        let version = stored.version + 1;
        *stored = Game {
            version,
            ..game.clone()
        };
        Ok(stored.clone())
    }

    async fn try_join_waiting_to_start(&self, game: &Game) -> Result<bool, DomainError> {
        let Some(mut stored) = self.games.get_mut(&game.id) else {
            return Ok(false);
        };
        if stored.status != GameStatus::WaitingToStart || stored.version != game.version {
            debug!(
                game_id = %game.id,
                stored_status = %stored.status,
                stored_version = stored.version,
                expected_version = game.version,
                "join guard rejected write"
            );
            return Ok(false);
        }
        let version = stored.version + 1;
        *stored = Game {
            version,
            ..game.clone()
        };
        Ok(true)
    }

    async fn find_waiting_to_start(&self, limit: u64) -> Result<Vec<Game>, DomainError> {
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let mut waiting: Vec<Game> = self
            .games
            .iter()
            .filter(|g| g.status == GameStatus::WaitingToStart)
            .map(|g| g.value().clone())
            .collect();
        // same order as the SQL adapter so a limit selects the same games
        waiting.sort_by_key(|g| g.id);
        waiting.truncate(limit);
        Ok(waiting)
    }
}
