// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, InvalidStateKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_422() {
    let de = DomainError::validation(ValidationKind::InvalidName, "name must not be empty");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidGameName);
    assert_eq!(app.status().as_u16(), 422);

    let de = DomainError::validation_other("bad field");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::ValidationError);
    assert_eq!(app.status().as_u16(), 422);

    let de = DomainError::validation(ValidationKind::GameNotEnded, "game has not ended");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::GameNotEnded);
    assert_eq!(app.status().as_u16(), 422);
}

#[test]
fn maps_invalid_state_to_409() {
    let de = DomainError::invalid_state(InvalidStateKind::NotPending, "game is active");
    let app: AppError = de.into();
    assert_eq!(app.code().as_str(), "GAME_NOT_PENDING");
    assert_eq!(app.status().as_u16(), 409);

    let de = DomainError::invalid_state(InvalidStateKind::NotActive, "game is pending");
    let app: AppError = de.into();
    assert_eq!(app.code().as_str(), "GAME_NOT_ACTIVE");
    assert_eq!(app.status().as_u16(), 409);

    let de = DomainError::invalid_state(InvalidStateKind::AlreadyCompleted, "game is done");
    let app: AppError = de.into();
    assert_eq!(app.code().as_str(), "GAME_ALREADY_COMPLETED");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_conflicts() {
    let joined = DomainError::conflict(ConflictKind::AlreadyJoined, "already in game");
    let app: AppError = joined.into();
    assert_eq!(app.code().as_str(), "ALREADY_JOINED");
    assert_eq!(app.status().as_u16(), 409);

    let lock = DomainError::conflict(ConflictKind::OptimisticLock, "version mismatch");
    let app: AppError = lock.into();
    assert_eq!(app.code().as_str(), "OPTIMISTIC_LOCK");
    assert_eq!(app.status().as_u16(), 409);

    // Test generic conflict fallback
    let other = DomainError::conflict(
        ConflictKind::Other("some conflict".to_string()),
        "generic conflict",
    );
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::Game, "no game");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);

    let nf = DomainError::not_found(NotFoundKind::Player, "no player");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "PLAYER_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert_eq!(app.status().as_u16(), 504);
    // Verify it's a Timeout AppError, not Validation
    assert!(matches!(app, AppError::Timeout { .. }));

    let down = DomainError::infra(InfraErrorKind::DbUnavailable, "down");
    let app: AppError = down.into();
    assert_eq!(app.code().as_str(), "STORE_UNAVAILABLE");
    assert_eq!(app.status().as_u16(), 503);

    let other = DomainError::infra(InfraErrorKind::Other("unknown".to_string()), "other");
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "INTERNAL");
    assert_eq!(app.status().as_u16(), 500);
}

#[test]
fn domain_purity_check() {
    // This test verifies that domain modules can be used without HTTP/SeaORM imports
    // by creating DomainError instances and converting them to AppError

    // Test that we can create domain errors without HTTP imports
    let validation = DomainError::validation(ValidationKind::InvalidDuration, "test");
    let state = DomainError::invalid_state(InvalidStateKind::NotPending, "test");
    let conflict = DomainError::conflict(ConflictKind::AlreadyJoined, "test");
    let not_found = DomainError::not_found(NotFoundKind::Game, "test");
    let infra = DomainError::infra(InfraErrorKind::Timeout, "test");

    // Test that conversion to AppError works (this happens in the error module)
    let _: AppError = validation.into();
    let _: AppError = state.into();
    let _: AppError = conflict.into();
    let _: AppError = not_found.into();
    let _: AppError = infra.into();
}

#[test]
fn constructor_helpers() {
    // Test validation constructor
    let validation = DomainError::validation(ValidationKind::InvalidYield, "negative yield");
    assert!(matches!(
        validation,
        DomainError::Validation(ValidationKind::InvalidYield, _)
    ));

    // Test invalid state constructor
    let state = DomainError::invalid_state(InvalidStateKind::NotActive, "pending game");
    assert!(matches!(
        state,
        DomainError::InvalidState(InvalidStateKind::NotActive, _)
    ));

    // Test conflict constructor
    let conflict = DomainError::conflict(ConflictKind::AlreadyJoined, "already joined");
    assert!(matches!(
        conflict,
        DomainError::Conflict(ConflictKind::AlreadyJoined, _)
    ));
    assert!(!conflict.is_optimistic_lock());

    let lock = DomainError::conflict(ConflictKind::OptimisticLock, "stale");
    assert!(lock.is_optimistic_lock());

    // Test not found constructor
    let not_found = DomainError::not_found(NotFoundKind::Player, "player missing");
    assert!(matches!(
        not_found,
        DomainError::NotFound(NotFoundKind::Player, _)
    ));

    // Test infra constructor
    let infra = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    assert!(matches!(
        infra,
        DomainError::Infra(InfraErrorKind::Timeout, _)
    ));
}
