use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, IndexOrder, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Login,
    CurrentGameId,
}

#[derive(Iden)]
enum Games {
    Table,
    Id,
    TurnsTotal,
    Status,
    TurnIndex,
    Players,
    Version,
}

#[derive(Iden)]
enum GameTurns {
    Table,
    Id,
    GameId,
    TurnIndex,
    Decisions,
    WinnerId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Login).string().not_null())
                    .col(ColumnDef::new(Users::CurrentGameId).uuid().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_login")
                    .table(Users::Table)
                    .col(Users::Login)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // games: roster is embedded as a JSON document and replaced as a whole
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::TurnsTotal).integer().not_null())
                    .col(ColumnDef::new(Games::Status).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Games::TurnIndex)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Games::Players).json().not_null())
                    .col(
                        ColumnDef::new(Games::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_games_status")
                    .table(Games::Table)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        // game_turns: append-only ledger
        manager
            .create_table(
                Table::create()
                    .table(GameTurns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GameTurns::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(GameTurns::GameId).uuid().not_null())
                    .col(ColumnDef::new(GameTurns::TurnIndex).integer().not_null())
                    .col(ColumnDef::new(GameTurns::Decisions).json().not_null())
                    .col(ColumnDef::new(GameTurns::WinnerId).uuid().null())
                    .to_owned(),
            )
            .await?;

        // last-N lookups walk this index newest-first
        manager
            .create_index(
                Index::create()
                    .name("ux_game_turns_game_turn_desc")
                    .table(GameTurns::Table)
                    .col(GameTurns::GameId)
                    .col((GameTurns::TurnIndex, IndexOrder::Desc))
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // indexes go with their tables
        manager
            .drop_table(Table::drop().table(GameTurns::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}
