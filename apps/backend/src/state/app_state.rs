use sea_orm::DatabaseConnection;

/// Shared per-worker state handed to handlers via `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Absent in DB-less test setups; handlers go through `require_db`.
    db: Option<DatabaseConnection>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db: Some(db) }
    }

    /// State with no storage behind it, for routes that never touch the DB.
    pub fn new_without_db() -> Self {
        Self { db: None }
    }

    /// Borrow the database connection, if one is configured.
    ///
    /// Application code should prefer `crate::db::require_db` which turns the
    /// missing-connection case into the store-unavailable error.
    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
