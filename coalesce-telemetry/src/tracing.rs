//! Tracing initialization for binaries and tests.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default directives applied when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVES: &str = "coalesce=info";

/// Initializes structured logging with configurable log levels via the `RUST_LOG`
/// environment variable.
///
/// Falls back to the supplied directives when `RUST_LOG` is unset. Panics if a global
/// subscriber is already installed, so binaries should call this exactly once at
/// startup.
pub fn init_tracing(default_directives: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    ::tracing::debug!(default_directives, "tracing initialized");
}

/// Initializes tracing for tests.
///
/// Safe to call at the top of every test: installation failures from earlier tests in
/// the same process are ignored, and output is routed through the test writer so it is
/// captured per test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_DIRECTIVES.into()))
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}
