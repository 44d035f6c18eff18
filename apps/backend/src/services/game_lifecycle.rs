//! Game lifecycle orchestration service - bridges pure domain rules with DB
//! persistence.
//!
//! Every method runs inside a caller-supplied transaction; handlers obtain one
//! through `with_txn`. Game-row writes go through the optimistic-lock repo
//! helpers, and a stale-version conflict is retried from a fresh read before
//! surfacing as a typed conflict.

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::adapters::game_players_sea::PlayerCreate;
use crate::adapters::games_sea::GameCreate;
use crate::domain::payout::{compute_payout, PayoutBreakdown};
use crate::domain::summary::{summarize, PlayerSummary};
use crate::domain::{derive_game_transitions, lifecycle, GameLifecycleView, GameTransition};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{self as games_repo, Game};
use crate::repos::players::{self as players_repo, GamePlayer};
use crate::utils::invite_code::{generate_invite_code, is_valid_invite_code};

/// Attempts at drawing an unused invite code before giving up.
const MAX_CODE_ATTEMPTS: usize = 5;

/// Re-reads of the game row after a stale-version conflict.
const MAX_LOCK_RETRIES: usize = 3;

/// Game lifecycle service.
pub struct GameLifecycleService;

impl GameLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Create a `pending` game with the creator as its first (not yet
    /// deposited) player.
    pub async fn create_game(
        &self,
        txn: &DatabaseTransaction,
        name: &str,
        duration_days: i32,
        deposit_amount: i64,
        creator_id: i64,
    ) -> Result<(Game, Vec<GamePlayer>), AppError> {
        let name = lifecycle::validate_new_game(name, duration_days, deposit_amount)?;

        // The id doubles as the invite code; draw until unused. With a 32^10
        // code space a second draw is already unlikely.
        let mut code = generate_invite_code();
        let mut attempts = 1;
        while games_repo::find_by_id(txn, &code).await?.is_some() {
            if attempts >= MAX_CODE_ATTEMPTS {
                return Err(AppError::internal(
                    "Could not allocate an unused invite code",
                ));
            }
            warn!(code = %code, attempts, "Invite code collision, drawing a new one");
            code = generate_invite_code();
            attempts += 1;
        }

        let game = games_repo::create_game(
            txn,
            GameCreate::new(&code, &name, duration_days, deposit_amount, creator_id),
        )
        .await?;

        let creator = players_repo::create_player(
            txn,
            PlayerCreate::new(&game.id, creator_id, game.deposit_amount),
        )
        .await?;

        info!(
            game_id = %game.id,
            creator_id,
            duration_days,
            deposit_amount,
            "Game created"
        );

        Ok((game, vec![creator]))
    }

    /// Join a pending game by its invite code.
    pub async fn join_game(
        &self,
        txn: &DatabaseTransaction,
        invite_code: &str,
        player_id: i64,
    ) -> Result<(Game, Vec<GamePlayer>), AppError> {
        if !is_valid_invite_code(invite_code) {
            return Err(DomainError::validation(
                ValidationKind::InvalidInviteCode,
                "Invite code must be 10 characters from the Crockford Base32 alphabet",
            )
            .into());
        }

        let mut game = games_repo::require_game(txn, invite_code).await?;
        let players = players_repo::list_players(txn, invite_code).await?;
        lifecycle::can_join(&game.status, &players_repo::stakes(&players), player_id)?;

        // The unique index on (game_id, player_id) backs this up against a
        // concurrent join by the same player.
        players_repo::create_player(
            txn,
            PlayerCreate::new(&game.id, player_id, game.deposit_amount),
        )
        .await?;

        // The game's version feeds the ETag, so the membership change must
        // bump it; this also serializes the join against concurrent deposits.
        let mut last_error = None;

        for retry in 0..MAX_LOCK_RETRIES {
            match games_repo::touch_game(txn, invite_code, game.lock_version).await {
                Ok(updated) => {
                    info!(game_id = %updated.id, player_id, "Player joined game");
                    let players = players_repo::list_players(txn, invite_code).await?;
                    return Ok((updated, players));
                }
                Err(e) if e.is_optimistic_lock() => {
                    warn!(game_id = %game.id, retry, "Concurrent game update during join, retrying");
                    last_error = Some(e);
                    game = games_repo::require_game(txn, invite_code).await?;
                    lifecycle::ensure_pending(&game.status)?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(lock_retries_exhausted(last_error, "Join"))
    }

    /// Record a confirmed deposit for a player. Idempotent: payment
    /// confirmations may be re-delivered, also after the game has since
    /// activated.
    ///
    /// A successful first deposit recomputes the pot and activates the game
    /// when every player has now deposited, atomically with the deposit.
    pub async fn record_deposit(
        &self,
        txn: &DatabaseTransaction,
        game_id: &str,
        player_id: i64,
        wallet_reference: &str,
    ) -> Result<(Game, Vec<GamePlayer>), AppError> {
        debug!(game_id, player_id, "Recording deposit");

        let game = games_repo::require_game(txn, game_id).await?;
        let player = players_repo::require_player(txn, game_id, player_id).await?;

        if player.has_deposited {
            debug!(game_id, player_id, "Deposit already recorded, no-op");
            let players = players_repo::list_players(txn, game_id).await?;
            return Ok((game, players));
        }

        lifecycle::ensure_pending(&game.status)?;
        players_repo::mark_deposited(txn, player.id, wallet_reference).await?;

        let game = self.settle_after_deposit(txn, game_id).await?;
        let players = players_repo::list_players(txn, game_id).await?;
        Ok((game, players))
    }

    /// Add externally-supplied yield to an active game.
    pub async fn apply_yield(
        &self,
        txn: &DatabaseTransaction,
        game_id: &str,
        amount: i64,
    ) -> Result<(Game, Vec<GamePlayer>), AppError> {
        lifecycle::validate_yield_delta(amount)?;

        let mut last_error = None;

        for retry in 0..MAX_LOCK_RETRIES {
            let game = games_repo::require_game(txn, game_id).await?;
            lifecycle::ensure_active(&game.status)?;

            let new_yield = lifecycle::accrue_yield(game.current_yield, amount)?;
            match games_repo::update_yield(txn, game_id, game.lock_version, new_yield).await {
                Ok(updated) => {
                    info!(
                        game_id = %updated.id,
                        amount,
                        current_yield = updated.current_yield,
                        "Yield applied"
                    );
                    let players = players_repo::list_players(txn, game_id).await?;
                    return Ok((updated, players));
                }
                Err(e) if e.is_optimistic_lock() => {
                    warn!(game_id, retry, "Concurrent game update during yield accrual, retrying");
                    last_error = Some(e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(lock_retries_exhausted(last_error, "Yield accrual"))
    }

    /// Resolve an active game: set the winner and close it.
    ///
    /// The active window must be over unless `override_end_time` is set, and
    /// the winner must be one of the game's players. Succeeds exactly once; on
    /// a repeat call the fresh read sees `completed` and fails the state gate.
    pub async fn complete_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: &str,
        winner_id: i64,
        override_end_time: bool,
    ) -> Result<(Game, Vec<GamePlayer>), AppError> {
        let mut last_error = None;

        for retry in 0..MAX_LOCK_RETRIES {
            let game = games_repo::require_game(txn, game_id).await?;
            lifecycle::ensure_active(&game.status)?;

            let players = players_repo::list_players(txn, game_id).await?;
            let stakes = players_repo::stakes(&players);
            lifecycle::validate_completion(
                OffsetDateTime::now_utc(),
                game.ends_at,
                override_end_time,
                &stakes,
                winner_id,
            )?;

            match games_repo::complete_game(txn, game_id, game.lock_version, winner_id).await {
                Ok(updated) => {
                    self.log_transitions(&game, &updated, players.len());
                    return Ok((updated, players));
                }
                Err(e) if e.is_optimistic_lock() => {
                    warn!(game_id, retry, "Concurrent game update during completion, retrying");
                    last_error = Some(e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(lock_retries_exhausted(last_error, "Completion"))
    }

    /// Latest committed snapshot of a game with its players.
    pub async fn get_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: &str,
    ) -> Result<(Game, Vec<GamePlayer>), AppError> {
        let game = games_repo::require_game(txn, game_id).await?;
        let players = players_repo::list_players(txn, game_id).await?;
        Ok((game, players))
    }

    /// Games the player belongs to, newest first.
    pub async fn list_games_for_player(
        &self,
        txn: &DatabaseTransaction,
        player_id: i64,
    ) -> Result<Vec<Game>, AppError> {
        Ok(games_repo::list_by_player(txn, player_id).await?)
    }

    /// Dashboard aggregates across every game the player belongs to.
    pub async fn summarize_for_player(
        &self,
        txn: &DatabaseTransaction,
        player_id: i64,
    ) -> Result<PlayerSummary, AppError> {
        let participations = players_repo::participations_for_player(txn, player_id).await?;
        Ok(summarize(player_id, &participations))
    }

    /// Per-player settlement view; prospective while the game still runs.
    pub async fn payout_for_game(
        &self,
        txn: &DatabaseTransaction,
        game_id: &str,
    ) -> Result<PayoutBreakdown, AppError> {
        let game = games_repo::require_game(txn, game_id).await?;
        let players = players_repo::list_players(txn, game_id).await?;
        let stakes = players_repo::stakes(&players);
        Ok(compute_payout(
            game.status,
            game.total_pot,
            game.current_yield,
            game.winner_id,
            &stakes,
        ))
    }

    /// Recompute the pot from the player rows and write it back, activating
    /// the game when every player has now deposited. The pot write and the
    /// activation are one optimistic-lock update, retried from a fresh read.
    async fn settle_after_deposit(
        &self,
        txn: &DatabaseTransaction,
        game_id: &str,
    ) -> Result<Game, AppError> {
        let mut last_error = None;

        for retry in 0..MAX_LOCK_RETRIES {
            let game = games_repo::require_game(txn, game_id).await?;
            let players = players_repo::list_players(txn, game_id).await?;
            let stakes = players_repo::stakes(&players);
            let pot = lifecycle::total_pot(&stakes);

            let result = if lifecycle::all_deposited(&stakes) {
                let starts_at = OffsetDateTime::now_utc();
                let ends_at = lifecycle::ends_at_for(starts_at, game.duration_days);
                games_repo::activate_game(txn, game_id, game.lock_version, starts_at, ends_at, pot)
                    .await
            } else {
                games_repo::update_pot(txn, game_id, game.lock_version, pot).await
            };

            match result {
                Ok(updated) => {
                    self.log_transitions(&game, &updated, players.len());
                    return Ok(updated);
                }
                Err(e) if e.is_optimistic_lock() => {
                    warn!(game_id, retry, "Concurrent game update during deposit, retrying");
                    last_error = Some(e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(lock_retries_exhausted(last_error, "Deposit settlement"))
    }

    /// Log edge-triggered lifecycle events derived from a before/after pair.
    fn log_transitions(&self, before: &Game, after: &Game, player_count: usize) {
        let before_view = GameLifecycleView {
            version: before.lock_version,
            status: before.status.clone(),
        };
        let after_view = GameLifecycleView {
            version: after.lock_version,
            status: after.status.clone(),
        };

        for transition in derive_game_transitions(&before_view, &after_view) {
            match transition {
                GameTransition::GameActivated => info!(
                    game_id = %after.id,
                    total_pot = after.total_pot,
                    player_count,
                    ends_at = ?after.ends_at,
                    "game_activated"
                ),
                GameTransition::GameCompleted => info!(
                    game_id = %after.id,
                    total_pot = after.total_pot,
                    current_yield = after.current_yield,
                    winner_id = ?after.winner_id,
                    "game_completed"
                ),
            }
        }
    }
}

impl Default for GameLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_retries_exhausted(last_error: Option<DomainError>, operation: &str) -> AppError {
    last_error
        .map(AppError::from)
        .unwrap_or_else(|| AppError::internal(format!("{operation} failed with no error details")))
}
