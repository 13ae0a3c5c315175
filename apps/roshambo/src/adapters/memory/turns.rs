use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{GameId, TurnRecord};
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::turns::TurnRepo;

/// In-memory turn ledger, one ordered map of records per game.
#[derive(Debug, Default)]
pub struct TurnRepoMemory {
    turns: DashMap<GameId, BTreeMap<u32, TurnRecord>>,
}

impl TurnRepoMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TurnRepo for TurnRepoMemory {
    async fn insert(&self, record: &TurnRecord) -> Result<(), DomainError> {
        let mut ledger = self.turns.entry(record.game_id).or_default();
        if ledger.contains_key(&record.turn_index) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateTurn,
                format!(
                    "Turn {} of game {} already recorded",
                    record.turn_index, record.game_id
                ),
            ));
        }
        ledger.insert(record.turn_index, record.clone());
        Ok(())
    }

    async fn last_turns(
        &self,
        game_id: GameId,
        limit: u64,
    ) -> Result<Vec<TurnRecord>, DomainError> {
        let Some(ledger) = self.turns.get(&game_id) else {
            return Ok(Vec::new());
        };
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        let mut newest_first: Vec<TurnRecord> =
            ledger.values().rev().take(limit).cloned().collect();
        newest_first.reverse();
        Ok(newest_first)
    }
}
