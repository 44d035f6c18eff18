pub mod txn;
pub mod txn_policy;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::state::app_state::AppState;

/// The one sanctioned path from [`AppState`] to a connection.
///
/// A state built without a database yields the 503 `STORE_UNAVAILABLE`
/// problem here instead of panicking somewhere deeper in a handler.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(|| {
        AppError::service_unavailable(ErrorCode::StoreUnavailable, "Database not configured")
    })
}
