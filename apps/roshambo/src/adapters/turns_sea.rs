//! SeaORM adapter for the turn ledger.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

use crate::domain::{GameId, TurnRecord};
use crate::entities::game_turns::{self, Decisions};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::turns::TurnRepo;

/// SeaORM implementation of TurnRepo.
#[derive(Debug, Clone)]
pub struct TurnRepoSea {
    db: DatabaseConnection,
}

impl TurnRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl TryFrom<game_turns::Model> for TurnRecord {
    type Error = DomainError;

    fn try_from(model: game_turns::Model) -> Result<Self, Self::Error> {
        let turn_index = u32::try_from(model.turn_index).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("stored turn_index is negative: {}", model.turn_index),
            )
        })?;
        Ok(TurnRecord::new(
            model.game_id,
            turn_index,
            model.winner_id,
            model.decisions.0,
        ))
    }
}

#[async_trait]
impl TurnRepo for TurnRepoSea {
    async fn insert(&self, record: &TurnRecord) -> Result<(), DomainError> {
        let turn_index = i32::try_from(record.turn_index).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("turn_index {} does not fit the ledger", record.turn_index),
            )
        })?;
        let model = game_turns::ActiveModel {
            id: NotSet,
            game_id: Set(record.game_id),
            turn_index: Set(turn_index),
            decisions: Set(Decisions(record.decisions.clone())),
            winner_id: Set(record.winner_id),
        };

        game_turns::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(())
    }

    async fn last_turns(
        &self,
        game_id: GameId,
        limit: u64,
    ) -> Result<Vec<TurnRecord>, DomainError> {
        // newest first along (game_id, turn_index DESC), then flipped
        let mut records = game_turns::Entity::find()
            .filter(game_turns::Column::GameId.eq(game_id))
            .order_by_desc(game_turns::Column::TurnIndex)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(TurnRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        records.reverse();
        Ok(records)
    }
}
