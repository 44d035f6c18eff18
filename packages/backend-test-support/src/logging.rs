//! Shared logging setup for unit and integration tests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install the test tracing subscriber, once per process.
///
/// Safe to call from every test and every `ctor`; repeat calls are no-ops.
/// The filter comes from `POTLUCK_TEST_LOG` if set, falling back to
/// `RUST_LOG`, and defaults to `warn` so a green run stays quiet.
///
/// Uses `with_test_writer()` so cargo and nextest capture output per test,
/// and `without_time()` to keep assertions on log output stable.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("POTLUCK_TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // try_init: some other harness may have installed a subscriber first.
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
