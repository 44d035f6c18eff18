//! Shared database configuration and bootstrap infrastructure.
//! Used by the backend and the migration CLI.

pub mod config;
pub mod error;
pub mod infra;

pub use config::db;
pub use config::db::{DbKind, DbOwner, RuntimeEnv};
pub use error::DbInfraError;
pub use infra::db::core::{
    bootstrap_pool, build_admin_pool, orchestrate_migration, sanitize_db_url,
};
