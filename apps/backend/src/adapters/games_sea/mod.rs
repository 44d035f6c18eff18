//! SeaORM queries for the games table, generic over ConnectionTrait.
//!
//! Everything here speaks `DbErr`; the repos layer owns the translation to
//! domain errors.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, JoinType, NotSet, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entities::{game_players, games};

pub mod dto;

pub use dto::{GameCreate, GameUpdate};

/// Compare-and-swap on `lock_version`, then refetch.
///
/// The caller's closure sets the domain columns; this adds the
/// `lock_version + 1` bump, `updated_at`, and the id/version filters, and
/// turns a zero-row update into the right structured error (missing game vs
/// stale version, told apart by a follow-up read).
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: &str,
    current_lock_version: i32,
    configure_update: F,
) -> Result<games::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<games::Entity>) -> sea_orm::UpdateMany<games::Entity>,
{
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(games::Entity::update_many())
        .col_expr(games::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            games::Column::LockVersion,
            Expr::col(games::Column::LockVersion).add(1),
        )
        .filter(games::Column::Id.eq(id))
        .filter(games::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        // Zero rows is ambiguous; a re-read settles which case it was.
        let game = find_by_id(conn, id).await?;
        if let Some(game) = game {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, game.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        } else {
            return Err(sea_orm::DbErr::Custom(format!("GAME_NOT_FOUND:{id}")));
        }
    }

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("GAME_NOT_FOUND:{id}")))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .filter(games::Column::Id.eq(game_id))
        .one(conn)
        .await
}

/// [`find_by_id`] for call sites where the game must exist; `None` becomes a
/// structured `GAME_NOT_FOUND:` error.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<games::Model, sea_orm::DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("GAME_NOT_FOUND:{game_id}")))
}

/// Games a player belongs to, newest first.
pub async fn list_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<games::Model>, sea_orm::DbErr> {
    games::Entity::find()
        .join(JoinType::InnerJoin, games::Relation::GamePlayers.def())
        .filter(game_players::Column::PlayerId.eq(player_id))
        .order_by_desc(games::Column::CreatedAt)
        .all(conn)
        .await
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let game_active = games::ActiveModel {
        id: Set(dto.id),
        name: Set(dto.name),
        duration_days: Set(dto.duration_days),
        deposit_amount: Set(dto.deposit_amount),
        creator_id: Set(dto.creator_id),
        status: Set(games::GameStatus::Pending),
        created_at: Set(now),
        updated_at: Set(now),
        starts_at: NotSet,
        ends_at: NotSet,
        total_pot: Set(0),
        current_yield: Set(0),
        winner_id: NotSet,
        lock_version: Set(1),
    };

    game_active.insert(conn).await
}

/// Apply a `GameUpdate` with optimistic locking and return the updated model.
pub async fn update_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameUpdate,
) -> Result<games::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let GameUpdate {
        id,
        status,
        starts_at,
        ends_at,
        total_pot,
        current_yield,
        winner_id,
        expected_version,
    } = dto;

    optimistic_update_then_fetch(conn, &id, expected_version, |mut update| {
        if let Some(status) = status {
            update = update.col_expr(games::Column::Status, Expr::val(status).into());
        }
        if let Some(ts) = starts_at {
            update = update.col_expr(games::Column::StartsAt, Expr::val(Some(ts)).into());
        }
        if let Some(ts) = ends_at {
            update = update.col_expr(games::Column::EndsAt, Expr::val(Some(ts)).into());
        }
        if let Some(pot) = total_pot {
            update = update.col_expr(games::Column::TotalPot, Expr::val(pot).into());
        }
        if let Some(current_yield) = current_yield {
            update = update.col_expr(games::Column::CurrentYield, Expr::val(current_yield).into());
        }
        if let Some(winner) = winner_id {
            update = update.col_expr(games::Column::WinnerId, Expr::val(Some(winner)).into());
        }
        update
    })
    .await
}
