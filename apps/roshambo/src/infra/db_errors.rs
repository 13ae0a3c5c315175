//! SeaORM -> DomainError translation helpers.
//!
//! Adapters convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here, and the binary maps `DomainError` to `AppError` via `From`.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Map a unique violation to the constraint it tripped. SQLite reports
/// `table.column`, Postgres the index or constraint name.
fn unique_violation_kind(error_msg: &str) -> (ConflictKind, &'static str) {
    if error_msg.contains("users.login") || error_msg.contains("ux_users_login") {
        return (ConflictKind::UniqueLogin, "Login already taken");
    }
    if error_msg.contains("game_turns.") || error_msg.contains("ux_game_turns_game_turn_desc") {
        return (ConflictKind::DuplicateTurn, "Turn already recorded");
    }
    if error_msg.contains("games.id")
        || error_msg.contains("games_pkey")
        || error_msg.contains("users.id")
        || error_msg.contains("users_pkey")
    {
        return (ConflictKind::DuplicateId, "Record with this id already exists");
    }
    (
        ConflictKind::Other("Unique".into()),
        "Unique constraint violation",
    )
}

/// Translate a `DbErr` into a `DomainError`.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::Json(_) | sea_orm::DbErr::TryIntoErr { .. } | sea_orm::DbErr::Type(_) => {
            error!(raw_error = %error_msg, "Stored row could not be decoded");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored row is malformed");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");
        let (kind, detail) = unique_violation_kind(&error_msg);
        return DomainError::conflict(kind, detail);
    }

    if mentions_sqlstate(&error_msg, "23503") {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation_other("Foreign key constraint violation");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool")
        || error_msg.contains("unavailable")
    {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
