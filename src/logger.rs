use tracing_subscriber::{EnvFilter, FmtSubscriber};

const LOG_ENV: &str = "TPDASH_LOG";

/// Installs the global subscriber, writing to stderr so summaries on stdout
/// stay machine-readable.
pub fn init_logging(verbose: bool) {
    let directives = std::env::var(LOG_ENV)
        .or_else(|_unset| std::env::var("RUST_LOG"))
        .ok();
    let filter = build_filter(directives.as_deref(), verbose);

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn build_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    let fallback = if verbose { "debug" } else { "info" };
    directives.map_or_else(
        || EnvFilter::new(fallback),
        |value| EnvFilter::try_new(value).unwrap_or_else(|_invalid| EnvFilter::new(fallback)),
    )
}
