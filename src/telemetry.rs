use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber once per process. Later calls are no-ops, so
/// every test may call it. `RUST_LOG` overrides `default_level`.
pub fn init_tracing(default_level: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_test_writer()
        .try_init()
        .is_ok()
}
