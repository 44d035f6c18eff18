//! SeaORM adapter for player rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{game_players, games};

pub mod dto;

pub use dto::{PlayerCreate, PlayerSetDeposited};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    player_id: i64,
) -> Result<Option<game_players::Model>, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .filter(game_players::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

/// All player rows of a game in join order (joined_at, then insertion id for
/// rows created in the same instant).
pub async fn find_all_by_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<game_players::Model>, sea_orm::DbErr> {
    game_players::Entity::find()
        .filter(game_players::Column::GameId.eq(game_id))
        .order_by_asc(game_players::Column::JoinedAt)
        .order_by_asc(game_players::Column::Id)
        .all(conn)
        .await
}

/// A player's memberships paired with their games, across all games.
pub async fn find_with_games_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<(game_players::Model, games::Model)>, sea_orm::DbErr> {
    let rows = game_players::Entity::find()
        .filter(game_players::Column::PlayerId.eq(player_id))
        .find_also_related(games::Entity)
        .all(conn)
        .await?;

    // The FK guarantees a game for every membership; drop any orphan rather
    // than invent one.
    Ok(rows
        .into_iter()
        .filter_map(|(membership, game)| game.map(|game| (membership, game)))
        .collect())
}

pub async fn create_player(
    txn: &DatabaseTransaction,
    dto: PlayerCreate,
) -> Result<game_players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let player_active = game_players::ActiveModel {
        id: NotSet,
        game_id: Set(dto.game_id),
        player_id: Set(dto.player_id),
        deposit_amount: Set(dto.deposit_amount),
        has_deposited: Set(false),
        wallet_reference: NotSet,
        joined_at: Set(now),
        updated_at: Set(now),
    };

    player_active.insert(txn).await
}

/// Mark a player's deposit confirmed, storing the external payment reference.
pub async fn set_deposited(
    txn: &DatabaseTransaction,
    dto: PlayerSetDeposited,
) -> Result<game_players::Model, sea_orm::DbErr> {
    let player = game_players::ActiveModel {
        id: Set(dto.id),
        game_id: NotSet,
        player_id: NotSet,
        deposit_amount: NotSet,
        has_deposited: Set(true),
        wallet_reference: Set(Some(dto.wallet_reference)),
        joined_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    player.update(txn).await
}
