//! Pure lifecycle rules for games and their players.
//!
//! Everything here operates on plain values; persistence and transactions
//! live in the repos/services layers.

use time::{Duration, OffsetDateTime};

use crate::entities::games::GameStatus;
use crate::errors::domain::{
    ConflictKind, DomainError, InvalidStateKind, NotFoundKind, ValidationKind,
};

/// Minimal per-player view the lifecycle rules need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStake {
    pub player_id: i64,
    pub deposit_amount: i64,
    pub has_deposited: bool,
}

/// Validate game creation arguments, returning the trimmed display name.
pub fn validate_new_game(
    name: &str,
    duration_days: i32,
    deposit_amount: i64,
) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            "Game name must not be empty",
        ));
    }
    if duration_days <= 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidDuration,
            "Duration must be at least one day",
        ));
    }
    if deposit_amount <= 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidDepositAmount,
            "Deposit amount must be positive",
        ));
    }
    Ok(trimmed.to_string())
}

/// Gate for operations that only make sense before the game starts (join, deposit).
pub fn ensure_pending(status: &GameStatus) -> Result<(), DomainError> {
    match status {
        GameStatus::Pending => Ok(()),
        GameStatus::Active => Err(DomainError::invalid_state(
            InvalidStateKind::NotPending,
            "Game has already started",
        )),
        GameStatus::Completed => Err(DomainError::invalid_state(
            InvalidStateKind::AlreadyCompleted,
            "Game is already completed",
        )),
    }
}

/// Gate for operations that only make sense while the game runs (yield, completion).
pub fn ensure_active(status: &GameStatus) -> Result<(), DomainError> {
    match status {
        GameStatus::Active => Ok(()),
        GameStatus::Pending => Err(DomainError::invalid_state(
            InvalidStateKind::NotActive,
            "Game has not started yet",
        )),
        GameStatus::Completed => Err(DomainError::invalid_state(
            InvalidStateKind::AlreadyCompleted,
            "Game is already completed",
        )),
    }
}

/// Pot implied by the current player set: the sum of stakes of players who
/// have deposited.
pub fn total_pot(stakes: &[PlayerStake]) -> i64 {
    stakes
        .iter()
        .filter(|s| s.has_deposited)
        .map(|s| s.deposit_amount)
        .sum()
}

/// A game activates when every current player has deposited.
///
/// An empty player set never activates; games always carry at least the
/// creator, so this only guards against misuse.
pub fn all_deposited(stakes: &[PlayerStake]) -> bool {
    !stakes.is_empty() && stakes.iter().all(|s| s.has_deposited)
}

pub fn contains_player(stakes: &[PlayerStake], player_id: i64) -> bool {
    stakes.iter().any(|s| s.player_id == player_id)
}

/// End of the active window for a game started at `starts_at`.
pub fn ends_at_for(starts_at: OffsetDateTime, duration_days: i32) -> OffsetDateTime {
    starts_at + Duration::days(i64::from(duration_days))
}

/// Check a join attempt against the game's status and current player set.
pub fn can_join(
    status: &GameStatus,
    stakes: &[PlayerStake],
    player_id: i64,
) -> Result<(), DomainError> {
    ensure_pending(status)?;
    if contains_player(stakes, player_id) {
        return Err(DomainError::conflict(
            ConflictKind::AlreadyJoined,
            format!("Player {player_id} is already in this game"),
        ));
    }
    Ok(())
}

/// Yield deltas are non-negative; the accrued figure never decreases.
pub fn validate_yield_delta(amount: i64) -> Result<(), DomainError> {
    if amount < 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidYield,
            "Yield delta must not be negative",
        ));
    }
    Ok(())
}

/// Accrued total after applying a delta; validates the delta and rejects
/// totals that leave the `i64` range.
pub fn accrue_yield(current_yield: i64, delta: i64) -> Result<i64, DomainError> {
    validate_yield_delta(delta)?;
    current_yield.checked_add(delta).ok_or_else(|| {
        DomainError::validation(
            ValidationKind::InvalidYield,
            "Yield delta overflows the accrued total",
        )
    })
}

/// Check a completion attempt.
///
/// The active window must be over unless the caller supplies the override
/// flag, and the winner must be one of the game's players.
pub fn validate_completion(
    now: OffsetDateTime,
    ends_at: Option<OffsetDateTime>,
    override_end_time: bool,
    stakes: &[PlayerStake],
    winner_id: i64,
) -> Result<(), DomainError> {
    if !override_end_time {
        match ends_at {
            Some(e) if now >= e => {}
            Some(e) => {
                return Err(DomainError::validation(
                    ValidationKind::GameNotEnded,
                    format!("Game runs until {e}; completing earlier requires the override flag"),
                ));
            }
            None => {
                return Err(DomainError::validation(
                    ValidationKind::GameNotEnded,
                    "Game has no end time yet",
                ));
            }
        }
    }
    if !contains_player(stakes, winner_id) {
        return Err(DomainError::not_found(
            NotFoundKind::Player,
            format!("Winner {winner_id} is not a player of this game"),
        ));
    }
    Ok(())
}
