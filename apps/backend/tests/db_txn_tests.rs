//! Tests for transaction handling: the rollback-on-ok test policy and
//! SharedTxn reuse across calls.

mod common;
mod support;

use actix_web::test::TestRequest;
use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::db::txn_policy::{current, TxnPolicy};
use backend::error::AppError;
use backend::repos::games;
use support::{build_test_state, factory, shared_txn};

#[actix_web::test]
async fn rollback_policy_discards_successful_work() -> Result<(), Box<dyn std::error::Error>> {
    // The ctor in `common` installs RollbackOnOk for every test binary
    assert_eq!(current(), TxnPolicy::RollbackOnOk);

    let state = build_test_state().await?;

    let game_id = with_txn(None, &state, |txn| {
        Box::pin(async move {
            let (game, _) = factory::create_pending_game(txn, 1).await?;
            // Visible inside the transaction
            assert!(games::find_by_id(txn, &game.id).await?.is_some());
            Ok::<_, AppError>(game.id)
        })
    })
    .await?;

    // Gone after with_txn applied the rollback policy
    let seen = games::find_by_id(require_db(&state)?, &game_id).await?;
    assert!(seen.is_none(), "row must not persist under rollback-on-ok");

    Ok(())
}

#[actix_web::test]
async fn error_inside_txn_rolls_back() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let created_id = std::sync::Arc::new(std::sync::Mutex::new(String::new()));
    let result = with_txn(None, &state, |txn| {
        let created_id = created_id.clone();
        Box::pin(async move {
            let (game, _) = factory::create_pending_game(txn, 1).await?;
            *created_id.lock().unwrap() = game.id;
            Err::<(), _>(AppError::internal("forced failure after insert"))
        })
    })
    .await;

    assert!(result.is_err());
    let created_id = created_id.lock().unwrap().clone();
    assert!(!created_id.is_empty(), "insert ran before the failure");

    let seen = games::find_by_id(require_db(&state)?, &created_id).await?;
    assert!(seen.is_none(), "error path must roll the insert back");

    Ok(())
}

#[actix_web::test]
async fn shared_txn_is_reused_and_owned_by_the_test() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;

    let shared = shared_txn::open(require_db(&state)?).await;
    let mut req = TestRequest::default().to_http_request();
    shared_txn::inject(&mut req, &shared);

    // First call writes through the shared transaction; with_txn neither
    // commits nor rolls back when one is present
    let game_id = with_txn(Some(&req), &state, |txn| {
        Box::pin(async move {
            let (game, _) = factory::create_pending_game(txn, 1).await?;
            Ok::<_, AppError>(game.id)
        })
    })
    .await?;

    // A second call through the same request sees the uncommitted row
    {
        let game_id = game_id.clone();
        let seen = with_txn(Some(&req), &state, |txn| {
            Box::pin(async move { Ok::<_, AppError>(games::find_by_id(txn, &game_id).await?) })
        })
        .await?;
        assert!(seen.is_some(), "same SharedTxn must observe earlier writes");
    }

    // Release the request's reference, then roll back explicitly
    drop(req);
    shared_txn::rollback(shared).await?;

    let seen = games::find_by_id(require_db(&state)?, &game_id).await?;
    assert!(seen.is_none(), "test-owned rollback must discard the write");

    Ok(())
}
