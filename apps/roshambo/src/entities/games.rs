use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use crate::domain::{self, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum GameStatus {
    #[sea_orm(string_value = "WAITING_TO_START")]
    WaitingToStart,
    #[sea_orm(string_value = "PLAYING")]
    Playing,
    #[sea_orm(string_value = "FINISHED")]
    Finished,
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
}

impl From<domain::GameStatus> for GameStatus {
    fn from(status: domain::GameStatus) -> Self {
        match status {
            domain::GameStatus::WaitingToStart => GameStatus::WaitingToStart,
            domain::GameStatus::Playing => GameStatus::Playing,
            domain::GameStatus::Finished => GameStatus::Finished,
            domain::GameStatus::Canceled => GameStatus::Canceled,
        }
    }
}

impl From<GameStatus> for domain::GameStatus {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::WaitingToStart => domain::GameStatus::WaitingToStart,
            GameStatus::Playing => domain::GameStatus::Playing,
            GameStatus::Finished => domain::GameStatus::Finished,
            GameStatus::Canceled => domain::GameStatus::Canceled,
        }
    }
}

/// Roster stored as one JSON document and replaced as a whole.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Roster(pub Vec<Player>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "turns_total")]
    pub turns_total: i32,
    pub status: GameStatus,
    #[sea_orm(column_name = "turn_index")]
    pub turn_index: i32,
    #[sea_orm(column_type = "Json")]
    pub players: Roster,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::game_turns::Entity")]
    GameTurns,
}

impl Related<super::game_turns::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameTurns.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
