use std::env;

use crate::error::AppError;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DbKind {
    /// Process-local maps; nothing survives a restart
    Memory,
    /// SQLite `sqlite::memory:` with a single shared connection
    SqliteMemory,
    /// SQLite file at `ROSHAMBO_SQLITE_PATH`
    SqliteFile,
    /// PostgreSQL from `ROSHAMBO_DATABASE_URL` or the `POSTGRES_*` variables
    Postgres,
}

impl DbKind {
    pub fn is_sql(self) -> bool {
        !matches!(self, DbKind::Memory)
    }
}

/// Builds a database URL from environment variables for the given backend.
pub fn db_url(kind: DbKind) -> Result<String, AppError> {
    match kind {
        DbKind::Memory => Err(AppError::config(
            "in-memory storage has no database URL".to_string(),
        )),
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
        DbKind::SqliteFile => {
            let path = sqlite_path();
            Ok(format!("sqlite://{path}?mode=rwc"))
        }
        DbKind::Postgres => {
            if let Ok(url) = env::var("ROSHAMBO_DATABASE_URL") {
                return Ok(url);
            }
            let host = host();
            let port = port();
            let db_name = must_var("POSTGRES_DB")?;
            let username = must_var("POSTGRES_USER")?;
            let password = must_var("POSTGRES_PASSWORD")?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
    }
}

/// SQLite file path (defaults to `roshambo.db` in the working directory)
fn sqlite_path() -> String {
    env::var("ROSHAMBO_SQLITE_PATH").unwrap_or_else(|_| "roshambo.db".to_string())
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
