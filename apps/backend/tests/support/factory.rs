use backend::adapters::games_sea::{self, GameUpdate};
use backend::repos::games::Game;
use backend::repos::players::GamePlayer;
use backend::services::game_lifecycle::GameLifecycleService;
use backend::AppError;
use backend_test_support::unique_helpers::{unique_str, unique_wallet_ref};
use sea_orm::DatabaseTransaction;
use time::{Duration, OffsetDateTime};

/// Create a pending game through the service, with a unique name.
///
/// # Arguments
/// * `txn` - Open transaction the game is created in
/// * `creator_id` - Player id of the creator
///
/// # Returns
/// The pending game and its player list (just the creator)
pub async fn create_pending_game(
    txn: &DatabaseTransaction,
    creator_id: i64,
) -> Result<(Game, Vec<GamePlayer>), AppError> {
    let service = GameLifecycleService::new();
    service
        .create_game(txn, &unique_str("game"), 7, 50_00, creator_id)
        .await
}

/// Create a game and walk it to `active`: every listed player joins and
/// deposits. The first id in `player_ids` is the creator.
///
/// # Arguments
/// * `txn` - Open transaction the game is created in
/// * `player_ids` - At least one player id; duplicates are a caller bug
///
/// # Returns
/// The activated game and its full player list
pub async fn create_active_game(
    txn: &DatabaseTransaction,
    player_ids: &[i64],
) -> Result<(Game, Vec<GamePlayer>), AppError> {
    let service = GameLifecycleService::new();
    let creator_id = player_ids[0];

    let (game, _) = service
        .create_game(txn, &unique_str("game"), 7, 50_00, creator_id)
        .await?;

    for &player_id in &player_ids[1..] {
        service.join_game(txn, &game.id, player_id).await?;
    }

    let mut latest = (game, Vec::new());
    for &player_id in player_ids {
        latest = service
            .record_deposit(txn, &latest.0.id, player_id, &unique_wallet_ref("tx"))
            .await?;
    }

    Ok(latest)
}

/// Backdate a game's end time so completion no longer needs an override.
///
/// Goes through the adapter directly: the lifecycle service has no operation
/// that moves `ends_at` into the past.
pub async fn force_game_ended(txn: &DatabaseTransaction, game_id: &str) -> Result<Game, AppError> {
    let model = games_sea::require_game(txn, game_id).await?;
    let past = OffsetDateTime::now_utc() - Duration::hours(1);

    let updated = games_sea::update_game(
        txn,
        GameUpdate::new(game_id, model.lock_version).with_ends_at(past),
    )
    .await?;

    Ok(Game::from(updated))
}
