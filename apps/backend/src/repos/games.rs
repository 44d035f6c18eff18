//! Game repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::games_sea as games_adapter;
use crate::entities::games;
use crate::entities::games::GameStatus;
use crate::errors::domain::DomainError;

/// Game domain model
///
/// This represents a game in the domain layer, with all fields needed for
/// lifecycle logic. It's converted from the database model (games::Model)
/// when loaded through repos functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    /// Invite code; doubles as the primary key.
    pub id: String,
    pub name: String,
    pub duration_days: i32,
    pub deposit_amount: i64,
    pub creator_id: i64,
    pub status: GameStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub starts_at: Option<OffsetDateTime>,
    pub ends_at: Option<OffsetDateTime>,
    pub total_pot: i64,
    pub current_yield: i64,
    pub winner_id: Option<i64>,
    pub lock_version: i32,
}

// Free functions (generic) for game operations

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

/// Find game by id or return error if not found.
///
/// This is a convenience helper that converts `None` into a DomainError,
/// eliminating the repetitive `ok_or_else` pattern when a game must exist.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Game, DomainError> {
    let game = games_adapter::require_game(conn, game_id).await?;
    Ok(Game::from(game))
}

/// Games a player belongs to, newest first (`created_at` descending).
pub async fn list_by_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<Game>, DomainError> {
    let games = games_adapter::list_by_player(conn, player_id).await?;
    Ok(games.into_iter().map(Game::from).collect())
}

pub async fn create_game(
    txn: &DatabaseTransaction,
    dto: games_adapter::GameCreate,
) -> Result<Game, DomainError> {
    let game = games_adapter::create_game(txn, dto).await?;
    Ok(Game::from(game))
}

/// Overwrite the pot total (after a deposit) with optimistic locking.
///
/// `expected_lock_version` validates that the current lock_version matches
/// before updating.
pub async fn update_pot(
    txn: &DatabaseTransaction,
    id: &str,
    expected_lock_version: i32,
    total_pot: i64,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameUpdate::new(id, expected_lock_version).with_total_pot(total_pot);
    let game = games_adapter::update_game(txn, dto).await?;
    Ok(Game::from(game))
}

/// Flip a pending game to active with optimistic locking.
///
/// Writes status, start/end window and the final pot in one atomic update.
pub async fn activate_game(
    txn: &DatabaseTransaction,
    id: &str,
    expected_lock_version: i32,
    starts_at: OffsetDateTime,
    ends_at: OffsetDateTime,
    total_pot: i64,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameUpdate::new(id, expected_lock_version)
        .with_status(GameStatus::Active)
        .with_starts_at(starts_at)
        .with_ends_at(ends_at)
        .with_total_pot(total_pot);
    let game = games_adapter::update_game(txn, dto).await?;
    Ok(Game::from(game))
}

/// Bump the game's version without changing lifecycle fields.
///
/// Used when related rows change (a player joins) so that version-derived
/// caching keys observe the new snapshot.
pub async fn touch_game(
    txn: &DatabaseTransaction,
    id: &str,
    expected_lock_version: i32,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameUpdate::new(id, expected_lock_version);
    let game = games_adapter::update_game(txn, dto).await?;
    Ok(Game::from(game))
}

/// Overwrite the accrued yield with optimistic locking.
pub async fn update_yield(
    txn: &DatabaseTransaction,
    id: &str,
    expected_lock_version: i32,
    current_yield: i64,
) -> Result<Game, DomainError> {
    let dto =
        games_adapter::GameUpdate::new(id, expected_lock_version).with_current_yield(current_yield);
    let game = games_adapter::update_game(txn, dto).await?;
    Ok(Game::from(game))
}

/// Close an active game with its winner, with optimistic locking.
pub async fn complete_game(
    txn: &DatabaseTransaction,
    id: &str,
    expected_lock_version: i32,
    winner_id: i64,
) -> Result<Game, DomainError> {
    let dto = games_adapter::GameUpdate::new(id, expected_lock_version)
        .with_status(GameStatus::Completed)
        .with_winner_id(winner_id);
    let game = games_adapter::update_game(txn, dto).await?;
    Ok(Game::from(game))
}

// Conversions between SeaORM models and domain models

impl From<games::Model> for Game {
    fn from(model: games::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            duration_days: model.duration_days,
            deposit_amount: model.deposit_amount,
            creator_id: model.creator_id,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
            starts_at: model.starts_at,
            ends_at: model.ends_at,
            total_pot: model.total_pot,
            current_yield: model.current_yield,
            winner_id: model.winner_id,
            lock_version: model.lock_version,
        }
    }
}
