//! Request-scoped transaction handling.
//!
//! Handlers never begin or commit transactions themselves; they hand a
//! closure to [`with_txn`], which either reuses a transaction planted in the
//! request extensions (integration tests do this to keep every assertion and
//! the handler's writes on one rollback-able transaction) or opens one on the
//! application pool and settles it according to the active policy.

use std::sync::Arc;

use actix_web::{HttpMessage, HttpRequest};
use futures_util::future::BoxFuture;
use sea_orm::{DatabaseTransaction, TransactionTrait};

use super::txn_policy;
use crate::error::AppError;
use crate::state::app_state::AppState;

/// Cloneable handle to an externally owned transaction.
///
/// Whoever constructs it keeps the right to commit or roll back; [`with_txn`]
/// only borrows. Rolling back requires unwrapping the inner [`Arc`], so every
/// clone (including the one in request extensions) must be dropped first.
#[derive(Clone)]
pub struct SharedTxn(pub Arc<DatabaseTransaction>);

impl SharedTxn {
    /// Borrow the underlying transaction.
    pub fn transaction(&self) -> &DatabaseTransaction {
        &self.0
    }
}

/// Run `f` on a transaction.
///
/// With a [`SharedTxn`] in the request extensions, `f` runs on it and the
/// outcome is returned as-is; settling the transaction stays with its owner.
/// Otherwise a fresh transaction is opened on the state's pool: `Err` always
/// rolls back, `Ok` commits or rolls back per [`txn_policy::current`].
pub async fn with_txn<R, F>(
    req: Option<&HttpRequest>,
    state: &AppState,
    f: F,
) -> Result<R, AppError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<R, AppError>>,
{
    // extensions() hands out a RefCell guard; clone the handle out and drop
    // the guard before any await point.
    let shared_txn: Option<SharedTxn> = if let Some(r) = req {
        r.extensions().get::<SharedTxn>().cloned()
    } else {
        None
    };

    if let Some(shared) = shared_txn {
        return f(shared.transaction()).await;
    }

    let txn = super::require_db(state)?.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            match txn_policy::current() {
                txn_policy::TxnPolicy::CommitOnOk => txn.commit().await?,
                txn_policy::TxnPolicy::RollbackOnOk => txn.rollback().await?,
            }
            Ok(val)
        }
        Err(err) => {
            // Roll back best-effort; the caller's error is the one that matters.
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
