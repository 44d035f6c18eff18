use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::utils::invite_code::is_valid_invite_code;

/// Game id extracted from the `{game_id}` route segment.
///
/// Validates the invite-code shape (10 chars, Crockford Base32) before the
/// handler runs, so malformed ids fail fast with a validation error instead
/// of a not-found after a pointless lookup. Existence is the handler's
/// concern: a well-formed but unknown id still yields `GAME_NOT_FOUND`.
#[derive(Debug, Clone)]
pub struct GameId(pub String);

impl GameId {
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromRequest for GameId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}

fn extract(req: &HttpRequest) -> Result<GameId, AppError> {
    let raw = req.match_info().get("game_id").ok_or_else(|| {
        AppError::bad_request(ErrorCode::BadRequest, "Missing game_id path parameter")
    })?;

    if !is_valid_invite_code(raw) {
        return Err(AppError::validation(
            ErrorCode::InvalidInviteCode,
            format!("Malformed game id: {raw}"),
        ));
    }

    Ok(GameId(raw.to_string()))
}
