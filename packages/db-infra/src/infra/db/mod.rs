pub mod core;

pub use core::{bootstrap_pool, build_admin_pool, orchestrate_migration, sanitize_db_url};
