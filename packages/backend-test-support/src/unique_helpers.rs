//! Unique test data.
//!
//! Suites that share a database (or re-run against a persistent one) must not
//! collide on names or payment references, so every generated value embeds a
//! fresh ULID.

use ulid::Ulid;

/// Unique `{prefix}-{ulid}` string, for game names and similar labels.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("game");
/// let b = unique_str("game");
/// assert_ne!(a, b);
/// assert!(a.starts_with("game-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Unique payment reference, for `wallet_reference` fields in deposit tests.
/// Same `{prefix}-{ulid}` shape; the separate name keeps call sites readable.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_wallet_ref;
///
/// let tx1 = unique_wallet_ref("tx");
/// let tx2 = unique_wallet_ref("tx");
/// assert_ne!(tx1, tx2);
/// ```
pub fn unique_wallet_ref(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
