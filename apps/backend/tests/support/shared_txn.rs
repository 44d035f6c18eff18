use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use backend::db::txn::SharedTxn;
use sea_orm::{DatabaseConnection, TransactionTrait};

/// Open a transaction on `conn` and wrap it for sharing across requests.
///
/// The caller owns the lifecycle: `with_txn` never commits or rolls back a
/// shared transaction, so a test can issue several requests against the same
/// uncommitted state and discard all of it at the end.
///
/// With the in-memory SQLite pool (one connection) the open transaction holds
/// the only connection, so every request in the test must run through this
/// transaction. The app builder's injector middleware takes care of that.
pub async fn open(conn: &DatabaseConnection) -> SharedTxn {
    let txn = conn
        .begin()
        .await
        .expect("failed to open shared transaction");
    SharedTxn(Arc::new(txn))
}

/// Attach the shared transaction to a single request's extensions.
///
/// Used by tests that build an `HttpRequest` by hand; HTTP-level tests get
/// this done for every request by `TestTxnInjector`.
pub fn inject(req: &mut HttpRequest, shared: &SharedTxn) {
    req.extensions_mut().insert(shared.clone());
}

/// Discard everything done under the shared transaction.
///
/// Fails if some clone of the handle is still alive (an app or request that
/// was not dropped first), since rollback needs exclusive ownership.
pub async fn rollback(shared: SharedTxn) -> Result<(), sea_orm::DbErr> {
    let txn = Arc::try_unwrap(shared.0).map_err(|_| {
        sea_orm::DbErr::Custom("cannot roll back: shared transaction handle still cloned".into())
    })?;
    txn.rollback().await
}
