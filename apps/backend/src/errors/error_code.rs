//! Machine-readable error codes.
//!
//! Every problem response carries exactly one of these, so clients switch on
//! a stable SCREAMING_SNAKE_CASE string instead of parsing the human detail.
//! New codes are added here, never as ad-hoc strings at a call site.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Input validation
    /// Game name empty or malformed
    InvalidGameName,
    /// Duration must be a positive number of days
    InvalidDuration,
    /// Deposit amount must be positive minor units
    InvalidDepositAmount,
    /// Yield delta must be non-negative
    InvalidYield,
    /// Invite code malformed (wrong length or alphabet)
    InvalidInviteCode,
    /// Completion attempted before the game's end time without override
    GameNotEnded,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Missing resources
    /// Game not found
    GameNotFound,
    /// Player not found in the game
    PlayerNotFound,
    /// General not found error
    NotFound,

    // Lifecycle State Conflicts
    /// Operation requires a pending game
    GameNotPending,
    /// Operation requires an active game
    GameNotActive,
    /// Game already completed; terminal state
    GameAlreadyCompleted,
    /// Player already joined this game
    AlreadyJoined,
    /// Invite code already exists
    InviteCodeConflict,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // Infrastructure
    /// Database error
    DbError,
    /// Persistence store unreachable
    StoreUnavailable,
    /// Database timeout (gateway timeout)
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// The exact string clients see in the problem body's `code` field.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Input validation
            Self::InvalidGameName => "INVALID_GAME_NAME",
            Self::InvalidDuration => "INVALID_DURATION",
            Self::InvalidDepositAmount => "INVALID_DEPOSIT_AMOUNT",
            Self::InvalidYield => "INVALID_YIELD",
            Self::InvalidInviteCode => "INVALID_INVITE_CODE",
            Self::GameNotEnded => "GAME_NOT_ENDED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Missing resources
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Lifecycle State Conflicts
            Self::GameNotPending => "GAME_NOT_PENDING",
            Self::GameNotActive => "GAME_NOT_ACTIVE",
            Self::GameAlreadyCompleted => "GAME_ALREADY_COMPLETED",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::InviteCodeConflict => "INVITE_CODE_CONFLICT",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",

            // Infrastructure
            Self::DbError => "DB_ERROR",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_strings_match_variants() {
        let cases: [(ErrorCode, &str); 23] = [
            (ErrorCode::InvalidGameName, "INVALID_GAME_NAME"),
            (ErrorCode::InvalidDuration, "INVALID_DURATION"),
            (ErrorCode::InvalidDepositAmount, "INVALID_DEPOSIT_AMOUNT"),
            (ErrorCode::InvalidYield, "INVALID_YIELD"),
            (ErrorCode::InvalidInviteCode, "INVALID_INVITE_CODE"),
            (ErrorCode::GameNotEnded, "GAME_NOT_ENDED"),
            (ErrorCode::ValidationError, "VALIDATION_ERROR"),
            (ErrorCode::BadRequest, "BAD_REQUEST"),
            (ErrorCode::GameNotFound, "GAME_NOT_FOUND"),
            (ErrorCode::PlayerNotFound, "PLAYER_NOT_FOUND"),
            (ErrorCode::NotFound, "NOT_FOUND"),
            (ErrorCode::GameNotPending, "GAME_NOT_PENDING"),
            (ErrorCode::GameNotActive, "GAME_NOT_ACTIVE"),
            (ErrorCode::GameAlreadyCompleted, "GAME_ALREADY_COMPLETED"),
            (ErrorCode::AlreadyJoined, "ALREADY_JOINED"),
            (ErrorCode::InviteCodeConflict, "INVITE_CODE_CONFLICT"),
            (ErrorCode::OptimisticLock, "OPTIMISTIC_LOCK"),
            (ErrorCode::Conflict, "CONFLICT"),
            (ErrorCode::DbError, "DB_ERROR"),
            (ErrorCode::StoreUnavailable, "STORE_UNAVAILABLE"),
            (ErrorCode::DbTimeout, "DB_TIMEOUT"),
            (ErrorCode::Internal, "INTERNAL"),
            (ErrorCode::ConfigError, "CONFIG_ERROR"),
        ];
        for (code, expected) in cases {
            assert_eq!(code.as_str(), expected);
            assert_eq!(code.to_string(), expected);
        }
    }
}
