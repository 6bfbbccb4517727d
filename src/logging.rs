use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// Reads `RUST_LOG` (e.g. `RUST_LOG=packing_plan_rs=debug`). Defaults to
/// `warn` so skipped rows surface without cluttering the plan tables.
/// Output goes to stderr.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Subscriber for tests: debug level, captured by the test harness.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
