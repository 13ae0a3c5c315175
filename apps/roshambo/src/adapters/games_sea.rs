//! SeaORM adapter for the game directory.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter, QueryOrder, QuerySelect,
    Set,
};
use tracing::debug;

use crate::domain::{Game, GameId};
use crate::entities::games::{self, GameStatus as DbGameStatus, Roster};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::infra::db_errors::map_db_err;
use crate::repos::games::GameRepo;

/// SeaORM implementation of GameRepo.
#[derive(Debug, Clone)]
pub struct GameRepoSea {
    db: DatabaseConnection,
}

impl GameRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_i32(value: u32, field: &str) -> Result<i32, DomainError> {
    i32::try_from(value).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("{field} {value} does not fit the games table"),
        )
    })
}

fn to_u32(value: i32, field: &str) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("stored {field} is negative: {value}"),
        )
    })
}

impl TryFrom<games::Model> for Game {
    type Error = DomainError;

    fn try_from(model: games::Model) -> Result<Self, Self::Error> {
        Ok(Game {
            id: model.id,
            turns_total: to_u32(model.turns_total, "turns_total")?,
            players: model.players.0,
            status: model.status.into(),
            turn_index: to_u32(model.turn_index, "turn_index")?,
            version: model.version,
        })
    }
}

/// Every column except the key and the version counter.
fn state_columns(game: &Game) -> Result<games::ActiveModel, DomainError> {
    Ok(games::ActiveModel {
        id: NotSet,
        turns_total: Set(to_i32(game.turns_total, "turns_total")?),
        status: Set(DbGameStatus::from(game.status)),
        turn_index: Set(to_i32(game.turn_index, "turn_index")?),
        players: Set(Roster(game.players.clone())),
        version: NotSet,
    })
}

impl GameRepoSea {
    /// Write all state columns and bump the version, filtered by id plus any
    /// extra guard. Returns the number of rows written.
    async fn guarded_replace<F>(&self, game: &Game, guard: F) -> Result<u64, DomainError>
    where
        F: FnOnce(sea_orm::UpdateMany<games::Entity>) -> sea_orm::UpdateMany<games::Entity>,
    {
        let update = games::Entity::update_many()
            .set(state_columns(game)?)
            .col_expr(
                games::Column::Version,
                Expr::col(games::Column::Version).add(1),
            )
            .filter(games::Column::Id.eq(game.id));

        let result = guard(update)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected)
    }
}

#[async_trait]
impl GameRepo for GameRepoSea {
    async fn insert(&self, game: Game) -> Result<Game, DomainError> {
        let mut model = state_columns(&game)?;
        model.id = Set(game.id);
        model.version = Set(1);

        games::Entity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(Game { version: 1, ..game })
    }

    async fn find_by_id(&self, id: GameId) -> Result<Option<Game>, DomainError> {
        games::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(Game::try_from)
            .transpose()
    }

    async fn update(&self, game: &Game) -> Result<Game, DomainError> {
        let rows = self.guarded_replace(game, |update| update).await?;
        if rows == 0 {
            return Err(DomainError::not_found(
                NotFoundKind::Game,
                format!("Game {} not found", game.id),
            ));
        }
        self.find_by_id(game.id).await?.ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Game, format!("Game {} not found", game.id))
        })
    }

    async fn try_join_waiting_to_start(&self, game: &Game) -> Result<bool, DomainError> {
        let rows = self
            .guarded_replace(game, |update| {
                update
                    .filter(games::Column::Status.eq(DbGameStatus::WaitingToStart))
                    .filter(games::Column::Version.eq(game.version))
            })
            .await?;
        if rows != 1 {
            debug!(
                game_id = %game.id,
                expected_version = game.version,
                "join guard rejected write"
            );
        }
        Ok(rows == 1)
    }

    async fn find_waiting_to_start(&self, limit: u64) -> Result<Vec<Game>, DomainError> {
        games::Entity::find()
            .filter(games::Column::Status.eq(DbGameStatus::WaitingToStart))
            .order_by_asc(games::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(Game::try_from)
            .collect()
    }
}
