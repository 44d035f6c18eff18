//! Cross-origin policy for browser clients.
//!
//! The game UI is served from a different origin than the API (a hosted
//! mini-app shell in production, localhost during development), so every
//! browser call crosses origins. Allowed origins come from the
//! `CORS_ALLOWED_ORIGINS` env var as a comma-separated list; with nothing
//! usable configured, the policy falls back to the local dev hosts.

use std::env;

use actix_cors::Cors;
use actix_web::http::header;

use crate::middleware::request_trace::TRACE_ID_HEADER;

const DEV_FALLBACK_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://127.0.0.1:3000"];

/// Split, trim, and keep only entries that look like real web origins.
/// Literal "null" (the opaque origin) is never allow-listed.
fn parse_allowed_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty() && *entry != "null")
        .filter(|entry| entry.starts_with("http://") || entry.starts_with("https://"))
        .map(str::to_string)
        .collect()
}

pub fn cors_middleware() -> Cors {
    let configured = parse_allowed_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

    let origins: Vec<String> = if configured.is_empty() {
        DEV_FALLBACK_ORIGINS.iter().map(|s| s.to_string()).collect()
    } else {
        configured
    };

    let mut cors = Cors::default()
        // The API is GET/POST only; OPTIONS covers preflight.
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::IF_MATCH,
            header::IF_NONE_MATCH,
        ])
        // Let browser code read the trace id and the snapshot ETag.
        .expose_headers(vec![
            header::HeaderName::from_static(TRACE_ID_HEADER),
            header::ETAG,
        ])
        .max_age(3600);

    for origin in origins {
        cors = cors.allowed_origin(&origin);
    }

    cors
}

#[cfg(test)]
mod tests {
    use super::parse_allowed_origins;

    #[test]
    fn parses_comma_separated_origins() {
        let parsed =
            parse_allowed_origins("https://app.potluck.example, http://localhost:3000");
        assert_eq!(
            parsed,
            vec![
                "https://app.potluck.example".to_string(),
                "http://localhost:3000".to_string()
            ]
        );
    }

    #[test]
    fn drops_empty_null_and_schemeless_entries() {
        let parsed = parse_allowed_origins("null, ,app.potluck.example,ftp://x.example");
        assert!(parsed.is_empty());
    }

    #[test]
    fn empty_input_yields_no_origins() {
        assert!(parse_allowed_origins("").is_empty());
    }
}
