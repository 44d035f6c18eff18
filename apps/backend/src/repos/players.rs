//! Player repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::game_players_sea as players_adapter;
use crate::domain::lifecycle::PlayerStake;
use crate::domain::summary::GameParticipation;
use crate::entities::game_players;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Player domain model: one user's membership in one game.
#[derive(Debug, Clone, PartialEq)]
pub struct GamePlayer {
    pub id: i64,
    pub game_id: String,
    pub player_id: i64,
    /// Stake copied from the game's required amount at join time.
    pub deposit_amount: i64,
    pub has_deposited: bool,
    pub wallet_reference: Option<String>,
    pub joined_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl GamePlayer {
    /// The view of this row the pure lifecycle rules consume.
    pub fn stake(&self) -> PlayerStake {
        PlayerStake {
            player_id: self.player_id,
            deposit_amount: self.deposit_amount,
            has_deposited: self.has_deposited,
        }
    }
}

/// Project a player list into the stake views the domain rules take.
pub fn stakes(players: &[GamePlayer]) -> Vec<PlayerStake> {
    players.iter().map(GamePlayer::stake).collect()
}

// Free functions (generic) for player operations

pub async fn find_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    player_id: i64,
) -> Result<Option<GamePlayer>, DomainError> {
    let player = players_adapter::find_player(conn, game_id, player_id).await?;
    Ok(player.map(GamePlayer::from))
}

/// Find a player in a game or return error if not found.
pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
    player_id: i64,
) -> Result<GamePlayer, DomainError> {
    find_player(conn, game_id, player_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Player,
            format!("Player {player_id} is not in game {game_id}"),
        )
    })
}

/// All players of a game in join order.
pub async fn list_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: &str,
) -> Result<Vec<GamePlayer>, DomainError> {
    let players = players_adapter::find_all_by_game(conn, game_id).await?;
    Ok(players.into_iter().map(GamePlayer::from).collect())
}

/// A player's games seen through their membership rows, as the inputs the
/// summary computation takes.
pub async fn participations_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Vec<GameParticipation>, DomainError> {
    let rows = players_adapter::find_with_games_by_player(conn, player_id).await?;
    Ok(rows
        .into_iter()
        .map(|(membership, game)| GameParticipation {
            status: game.status,
            deposit_amount: membership.deposit_amount,
            has_deposited: membership.has_deposited,
            current_yield: game.current_yield,
            winner_id: game.winner_id,
        })
        .collect())
}

pub async fn create_player(
    txn: &DatabaseTransaction,
    dto: players_adapter::PlayerCreate,
) -> Result<GamePlayer, DomainError> {
    let player = players_adapter::create_player(txn, dto).await?;
    Ok(GamePlayer::from(player))
}

/// Mark a player's deposit confirmed, storing the external payment reference.
pub async fn mark_deposited(
    txn: &DatabaseTransaction,
    id: i64,
    wallet_reference: &str,
) -> Result<GamePlayer, DomainError> {
    let dto = players_adapter::PlayerSetDeposited::new(id, wallet_reference);
    let player = players_adapter::set_deposited(txn, dto).await?;
    Ok(GamePlayer::from(player))
}

// Conversions between SeaORM models and domain models

impl From<game_players::Model> for GamePlayer {
    fn from(model: game_players::Model) -> Self {
        Self {
            id: model.id,
            game_id: model.game_id,
            player_id: model.player_id,
            deposit_amount: model.deposit_amount,
            has_deposited: model.has_deposited,
            wallet_reference: model.wallet_reference,
            joined_at: model.joined_at,
            updated_at: model.updated_at,
        }
    }
}
