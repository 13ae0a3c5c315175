use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};
use tracing::info;

use crate::config::db::{db_url, DbKind};
use crate::error::AppError;

/// Open a connection for `kind`. Does NOT run any migrations.
///
/// SQLite in-memory databases live per connection, so that kind is pinned to
/// a single pooled connection.
pub async fn connect_db(kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind)?;

    let mut opt = ConnectOptions::new(&url);
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if matches!(kind, DbKind::SqliteMemory) {
        opt.min_connections(1).max_connections(1);
    }

    let conn = Database::connect(opt).await?;
    if matches!(kind, DbKind::SqliteFile) {
        setup_sqlite_file_prerequisites(&conn).await?;
    }
    info!(db_kind = ?kind, url = %sanitize_db_url(&url), "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date. `fresh` drops everything first.
pub async fn bootstrap_db(kind: DbKind, fresh: bool) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind).await?;
    let command = if fresh {
        MigrationCommand::Fresh
    } else {
        MigrationCommand::Up
    };
    migrate(&conn, command).await?;
    Ok(conn)
}

async fn setup_sqlite_file_prerequisites(conn: &DatabaseConnection) -> Result<(), AppError> {
    for pragma in ["PRAGMA journal_mode = WAL;", "PRAGMA synchronous = NORMAL;"] {
        conn.execute(Statement::from_string(DatabaseBackend::Sqlite, pragma))
            .await?;
    }
    Ok(())
}

/// Mask the password in a connection string for logging.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        Some(colon_pos) if auth_part[..colon_pos].contains("://") => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}
