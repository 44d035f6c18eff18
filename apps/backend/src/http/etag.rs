//! ETag helpers for game snapshot caching.
//!
//! Game snapshots carry a strong ETag derived from the row's lock version;
//! `If-None-Match` revalidation turns an unchanged snapshot into a 304.

/// Generate the ETag for a game snapshot.
///
/// Format: `"game-{id}-v{version}"` (with quotes, as required by HTTP spec)
///
/// # Example
/// ```
/// # use backend::http::etag::game_etag;
/// let etag = game_etag("AB2C3D4E5F", 5);
/// assert_eq!(etag, r#""game-AB2C3D4E5F-v5""#);
/// ```
pub fn game_etag(id: &str, version: i32) -> String {
    format!(r#""game-{id}-v{version}""#)
}

/// True when an `If-None-Match` header value matches the current ETag.
///
/// Handles `*`, comma-separated candidate lists, and the `W/` prefix
/// (RFC 7232 prescribes weak comparison for `If-None-Match`).
pub fn if_none_match_satisfied(header: &str, current_etag: &str) -> bool {
    let current = strip_weak_prefix(current_etag);
    header
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || strip_weak_prefix(candidate) == current)
}

fn strip_weak_prefix(etag: &str) -> &str {
    etag.strip_prefix("W/").unwrap_or(etag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_etag_format() {
        assert_eq!(game_etag("AB2C3D4E5F", 5), r#""game-AB2C3D4E5F-v5""#);
        assert_eq!(game_etag("0000000000", 1), r#""game-0000000000-v1""#);
    }

    #[test]
    fn test_if_none_match_exact() {
        let etag = game_etag("AB2C3D4E5F", 3);
        assert!(if_none_match_satisfied(&etag, &etag));
        assert!(!if_none_match_satisfied(
            &game_etag("AB2C3D4E5F", 2),
            &etag
        ));
    }

    #[test]
    fn test_if_none_match_list() {
        let current = game_etag("AB2C3D4E5F", 3);
        let header = format!(r#""game-XYZ-v1", {current}, "game-QQQ-v9""#);
        assert!(if_none_match_satisfied(&header, &current));
    }

    #[test]
    fn test_if_none_match_star() {
        assert!(if_none_match_satisfied("*", &game_etag("AB2C3D4E5F", 3)));
    }

    #[test]
    fn test_if_none_match_weak_prefix() {
        let current = game_etag("AB2C3D4E5F", 3);
        let weak = format!("W/{current}");
        assert!(if_none_match_satisfied(&weak, &current));
    }

    #[test]
    fn test_if_none_match_mismatch() {
        let current = game_etag("AB2C3D4E5F", 3);
        assert!(!if_none_match_satisfied(r#""unrelated""#, &current));
        assert!(!if_none_match_satisfied("", &current));
    }
}
