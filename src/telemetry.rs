use tracing_subscriber::EnvFilter;

// RUST_LOG wins over `default_filter`; repeat calls keep the first subscriber
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
