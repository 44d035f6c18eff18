use actix_web::web;

pub mod games;
pub mod health;
pub mod players;

/// Configure application routes.
///
/// `main.rs` and the test app builder both register the same paths through
/// this function so endpoint behavior is identical in both contexts.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Liveness: /health
    cfg.configure(health::configure_routes);

    // Game lifecycle: /api/games/**
    cfg.service(web::scope("/api/games").configure(games::configure_routes));

    // Player read models: /api/players/**
    cfg.service(web::scope("/api/players").configure(players::configure_routes));
}
