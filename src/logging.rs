use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber for the binaries.
///
/// `RUST_LOG` selects the filter (default `info`), e.g.
/// `RUST_LOG=workforce_plan=debug` to see one event per generated module.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Debug-level subscriber routed through the test harness; safe to call
/// from every test.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
