use actix_web::{web, HttpResponse};

use crate::error::AppError;

/// GET /health — liveness probe, no database touch.
async fn health() -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().body("ok"))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
