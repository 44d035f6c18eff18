use actix_web::{web, App, HttpServer};
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use db_infra::{DbKind, RuntimeEnv};

mod telemetry;

/// Bind address from `BACKEND_HOST` / `BACKEND_PORT`. All config comes from
/// the process environment: docker env_file in deployment, a sourced .env in
/// local dev.
fn bind_addr() -> std::io::Result<(String, u16)> {
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .map_err(|_| std::io::Error::other("BACKEND_PORT must be a valid port number"))?;
    Ok((host, port))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let (host, port) = bind_addr()?;

    // Connects and migrates; refusing to serve without a database beats
    // serving 503s for every game route.
    let app_state = build_state()
        .with_env(RuntimeEnv::Prod)
        .with_db(DbKind::Postgres)
        .build()
        .await
        .map_err(std::io::Error::other)?;

    tracing::info!(host = %host, port, "starting potluck backend");

    let data = web::Data::new(app_state);

    // Registration is inside-out: RequestTrace runs first at request time.
    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
