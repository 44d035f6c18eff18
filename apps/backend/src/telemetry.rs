//! Tracing subscriber setup for the service binary.
//!
//! Events go out as single-line JSON with fields flattened to the top level,
//! which keeps `http.method`, `trace_id` and friends directly queryable in a
//! log pipeline. The filter comes from `RUST_LOG`, with a default that keeps
//! the SQL layers quiet. Tests install their own subscriber through
//! `backend_test_support::logging` instead.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default when `RUST_LOG` is unset: service at info, SQL noise down.
const DEFAULT_FILTER: &str = "info,actix_web=info,sqlx=warn,sea_orm=warn";

pub fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let json_layer = fmt::layer()
        .json()
        .flatten_event(true)
        .with_target(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .init();
}
