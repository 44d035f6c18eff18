use db_infra::{bootstrap_pool, DbKind, DbOwner, RuntimeEnv};

use crate::error::AppError;
use crate::state::app_state::AppState;

/// One way to construct [`AppState`] everywhere: the binary asks for
/// Prod+Postgres, the test harness for Test+SqliteMemory, and a builder with
/// no engine yields a DB-less state for handlers that never touch storage.
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
        }
    }
    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }
    pub fn with_db(mut self, db_kind: DbKind) -> Self {
        self.db_kind = Some(db_kind);
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db_kind {
            // bootstrap_pool connects and migrates in one step, so a built
            // state is always schema-complete.
            Some(db_kind) => {
                let conn = bootstrap_pool(self.env, db_kind, DbOwner::App).await?;
                Ok(AppState::new(conn))
            }
            None => Ok(AppState::new_without_db()),
        }
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
