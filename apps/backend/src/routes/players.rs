//! Player-scoped read models: game list and dashboard summary.

use actix_web::{web, HttpRequest};
use serde::Serialize;
use time::OffsetDateTime;

use crate::db::txn::with_txn;
use crate::domain::summary::PlayerSummary;
use crate::entities::games::GameStatus;
use crate::error::AppError;
use crate::repos::games::Game;
use crate::services::GameLifecycleService;
use crate::state::app_state::AppState;

/// One game in a player's list; no player roster, newest first.
#[derive(Debug, Serialize)]
pub struct GameListItem {
    pub id: String,
    pub invite_code: String,
    pub name: String,
    pub status: GameStatus,
    pub duration_days: i32,
    pub deposit_amount: i64,
    pub total_pot: i64,
    pub current_yield: i64,
    pub winner_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub starts_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub ends_at: Option<OffsetDateTime>,
}

impl From<Game> for GameListItem {
    fn from(game: Game) -> Self {
        Self {
            invite_code: game.id.clone(),
            id: game.id,
            name: game.name,
            status: game.status,
            duration_days: game.duration_days,
            deposit_amount: game.deposit_amount,
            total_pot: game.total_pot,
            current_yield: game.current_yield,
            winner_id: game.winner_id,
            created_at: game.created_at,
            starts_at: game.starts_at,
            ends_at: game.ends_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlayerSummaryResponse {
    pub player_id: i64,
    #[serde(flatten)]
    pub summary: PlayerSummary,
}

/// GET /api/players/{player_id}/games
///
/// Games the player belongs to, newest first. An unknown player simply has
/// no games.
async fn list_games(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<GameListItem>>, AppError> {
    let player_id = path.into_inner();

    let games = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let service = GameLifecycleService::new();
            service.list_games_for_player(txn, player_id).await
        })
    })
    .await?;

    Ok(web::Json(games.into_iter().map(GameListItem::from).collect()))
}

/// GET /api/players/{player_id}/summary
///
/// Dashboard aggregates across every game the player belongs to.
async fn get_summary(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PlayerSummaryResponse>, AppError> {
    let player_id = path.into_inner();

    let summary = with_txn(Some(&http_req), &app_state, move |txn| {
        Box::pin(async move {
            let service = GameLifecycleService::new();
            service.summarize_for_player(txn, player_id).await
        })
    })
    .await?;

    Ok(web::Json(PlayerSummaryResponse { player_id, summary }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/{player_id}/games").route(web::get().to(list_games)));
    cfg.service(web::resource("/{player_id}/summary").route(web::get().to(get_summary)));
}
