//! Test AppState construction.
//!
//! Suites run against in-memory SQLite by default so they need no running
//! services. Setting `POTLUCK_TEST_DB_KIND` (e.g. to `postgres`) points the
//! same suites at another engine, sharing the kind names the migration CLI
//! and db-infra use.

use std::env::{self, VarError};
use std::str::FromStr;

use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::AppError;
use db_infra::{DbKind, RuntimeEnv};

/// DB engine for tests: `POTLUCK_TEST_DB_KIND` if set, in-memory SQLite otherwise.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    match env::var("POTLUCK_TEST_DB_KIND") {
        Ok(raw) => Ok(DbKind::from_str(raw.as_str())?),
        Err(VarError::NotPresent) => Ok(DbKind::SqliteMemory),
        Err(err) => Err(AppError::config(format!(
            "failed to read POTLUCK_TEST_DB_KIND: {err}"
        ))),
    }
}

/// Connected, migrated AppState on the test profile.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(resolve_test_db_kind()?)
        .build()
        .await
}
