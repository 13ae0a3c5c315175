use tracing::info;

use crate::config::db::DbKind;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_kind: DbKind,
    fresh: bool,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_kind: DbKind::Memory,
            fresh: false,
        }
    }

    pub fn with_db(mut self, kind: DbKind) -> Self {
        self.db_kind = kind;
        self
    }

    /// Wipe stored games, turns and users before handing out the state.
    pub fn fresh(mut self, fresh: bool) -> Self {
        self.fresh = fresh;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = if self.db_kind.is_sql() {
            // single entrypoint: connect + migrate
            let conn = bootstrap_db(self.db_kind, self.fresh).await?;
            AppState::new(conn)
        } else {
            AppState::in_memory()
        };
        info!(db_kind = ?self.db_kind, fresh = self.fresh, "state ready");
        Ok(state)
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
