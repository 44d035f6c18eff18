//! Game lifecycle HTTP routes.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::payout::PayoutBreakdown;
use crate::entities::games::GameStatus;
use crate::error::AppError;
use crate::extractors::{GameId, ValidatedJson};
use crate::http::etag::{game_etag, if_none_match_satisfied};
use crate::repos::games::Game;
use crate::repos::players::GamePlayer;
use crate::services::GameLifecycleService;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub name: String,
    pub duration_days: i32,
    pub deposit_amount: i64,
    pub creator_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct JoinGameRequest {
    pub invite_code: String,
    pub player_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub player_id: i64,
    pub wallet_reference: String,
}

#[derive(Debug, Deserialize)]
pub struct YieldRequest {
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct CompleteGameRequest {
    pub winner_id: i64,
    /// Admin override: allow completion before the active window has elapsed.
    #[serde(default)]
    pub override_end_time: bool,
}

#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub player_id: i64,
    pub deposit_amount: i64,
    pub has_deposited: bool,
    pub wallet_reference: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

impl From<GamePlayer> for PlayerView {
    fn from(p: GamePlayer) -> Self {
        Self {
            player_id: p.player_id,
            deposit_amount: p.deposit_amount,
            has_deposited: p.has_deposited,
            wallet_reference: p.wallet_reference,
            joined_at: p.joined_at,
        }
    }
}

/// Full game snapshot as returned by every game endpoint.
#[derive(Debug, Serialize)]
pub struct GameResponse {
    pub id: String,
    /// Same value as `id`; the id doubles as the shareable invite code.
    pub invite_code: String,
    pub name: String,
    pub status: GameStatus,
    pub duration_days: i32,
    pub deposit_amount: i64,
    pub creator_id: i64,
    pub total_pot: i64,
    pub current_yield: i64,
    pub winner_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub starts_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
    pub players: Vec<PlayerView>,
}

impl GameResponse {
    fn from_parts(game: Game, players: Vec<GamePlayer>) -> Self {
        Self {
            invite_code: game.id.clone(),
            id: game.id,
            name: game.name,
            status: game.status,
            duration_days: game.duration_days,
            deposit_amount: game.deposit_amount,
            creator_id: game.creator_id,
            total_pot: game.total_pot,
            current_yield: game.current_yield,
            winner_id: game.winner_id,
            created_at: game.created_at,
            starts_at: game.starts_at,
            ends_at: game.ends_at,
            players: players.into_iter().map(PlayerView::from).collect(),
        }
    }
}

/// POST /api/games
///
/// Create a pending game with the creator as its first player. Returns 201
/// with the game snapshot; the returned id is the invite code to share.
async fn create_game(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CreateGameRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();

    let (game, players) = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let service = GameLifecycleService::new();
            service
                .create_game(
                    txn,
                    &payload.name,
                    payload.duration_days,
                    payload.deposit_amount,
                    payload.creator_id,
                )
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(GameResponse::from_parts(game, players)))
}

/// POST /api/games/join
///
/// Join a pending game by invite code.
async fn join_game(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
    body: ValidatedJson<JoinGameRequest>,
) -> Result<HttpResponse, AppError> {
    let payload = body.into_inner();

    let (game, players) = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let service = GameLifecycleService::new();
            service
                .join_game(txn, &payload.invite_code, payload.player_id)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from_parts(game, players)))
}

/// GET /api/games/{game_id}
///
/// Latest committed snapshot with a strong ETag derived from the game's lock
/// version. `If-None-Match` revalidation returns 304 with an empty body.
async fn get_game(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.into_inner();

    let (game, players) = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let service = GameLifecycleService::new();
            service.get_game(txn, &id).await
        })
    })
    .await?;

    let etag_value = game_etag(&game.id, game.lock_version);

    if let Some(header) = http_req.headers().get(IF_NONE_MATCH) {
        if let Ok(candidates) = header.to_str() {
            if if_none_match_satisfied(candidates, &etag_value) {
                return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
                    .insert_header((ETAG, etag_value))
                    .finish());
            }
        }
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag_value))
        .json(GameResponse::from_parts(game, players)))
}

/// POST /api/games/{game_id}/deposit
///
/// Record a confirmed deposit. Idempotent per (game, player); the pot and a
/// possible pending→active transition commit atomically with the deposit.
async fn record_deposit(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<DepositRequest>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.into_inner();
    let payload = body.into_inner();

    let (game, players) = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let service = GameLifecycleService::new();
            service
                .record_deposit(txn, &id, payload.player_id, &payload.wallet_reference)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from_parts(game, players)))
}

/// POST /api/games/{game_id}/yield
///
/// Add externally-supplied yield to an active game.
async fn apply_yield(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<YieldRequest>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.into_inner();
    let amount = body.into_inner().amount;

    let (game, players) = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let service = GameLifecycleService::new();
            service.apply_yield(txn, &id, amount).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from_parts(game, players)))
}

/// POST /api/games/{game_id}/complete
///
/// Resolve an active game: set the winner and close it.
async fn complete_game(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
    body: ValidatedJson<CompleteGameRequest>,
) -> Result<HttpResponse, AppError> {
    let id = game_id.into_inner();
    let payload = body.into_inner();

    let (game, players) = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let service = GameLifecycleService::new();
            service
                .complete_game(txn, &id, payload.winner_id, payload.override_end_time)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(GameResponse::from_parts(game, players)))
}

/// GET /api/games/{game_id}/payout
///
/// Per-player settlement breakdown; prospective while the game still runs.
async fn get_payout(
    http_req: HttpRequest,
    game_id: GameId,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PayoutBreakdown>, AppError> {
    let id = game_id.into_inner();

    let breakdown = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let service = GameLifecycleService::new();
            service.payout_for_game(txn, &id).await
        })
    })
    .await?;

    Ok(web::Json(breakdown))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // "/join" is registered before "/{game_id}" so the literal segment wins.
    cfg.service(web::resource("").route(web::post().to(create_game)));
    cfg.service(web::resource("/join").route(web::post().to(join_game)));
    cfg.service(web::resource("/{game_id}").route(web::get().to(get_game)));
    cfg.service(web::resource("/{game_id}/deposit").route(web::post().to(record_deposit)));
    cfg.service(web::resource("/{game_id}/yield").route(web::post().to(apply_yield)));
    cfg.service(web::resource("/{game_id}/complete").route(web::post().to(complete_game)));
    cfg.service(web::resource("/{game_id}/payout").route(web::get().to(get_payout)));
}
