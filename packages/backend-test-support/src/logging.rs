//! Test logging bootstrap.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a tracing subscriber for tests, at most once per process.
///
/// Filter precedence is `TEST_LOG`, then `RUST_LOG`, then `warn`. Output goes
/// through the test writer so cargo captures it per test, and timestamps are
/// omitted to keep failures diffable. Safe to call from any number of tests.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        // Another harness may already own the global subscriber.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .with_target(false)
            .try_init();
    });
}

