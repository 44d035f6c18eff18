//! The error vocabulary of the game domain.
//!
//! Services and repos speak [`DomainError`]; it knows nothing about HTTP
//! statuses or SeaORM. The single `From<DomainError> for AppError` impl in
//! `crate::error` decides how each family renders on the wire, so handlers
//! just use `?`.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Which input failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidName,
    InvalidDuration,
    InvalidDepositAmount,
    InvalidYield,
    InvalidInviteCode,
    /// Completion attempted before the game's end time without the override flag
    GameNotEnded,
    Other(String),
}

/// Lifecycle-state violation kinds: the operation is well-formed, the game's
/// current status just forbids it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidStateKind {
    NotPending,
    NotActive,
    AlreadyCompleted,
}

/// Operational failures, split where the HTTP mapping differs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    Other(String),
}

/// Which entity was missing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Game,
    Player,
    Other(String),
}

/// What the request collided with.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    AlreadyJoined,
    OptimisticLock,
    InviteCodeConflict,
    Other(String),
}

/// Every failure a service or repo can report.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Malformed or out-of-range input
    Validation(ValidationKind, String),
    /// Well-formed request that the game's current status forbids
    InvalidState(InvalidStateKind, String),
    /// Collision with existing state (membership, invite code, lock version)
    Conflict(ConflictKind, String),
    /// Entity absent in domain terms
    NotFound(NotFoundKind, String),
    /// Failure below the domain: storage, timeouts
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::InvalidState(kind, d) => write!(f, "invalid state {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }
    pub fn invalid_state(kind: InvalidStateKind, detail: impl Into<String>) -> Self {
        Self::InvalidState(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// True for conflicts a caller may sensibly retry from a fresh read.
    pub fn is_optimistic_lock(&self) -> bool {
        matches!(self, Self::Conflict(ConflictKind::OptimisticLock, _))
    }
}
