use tracing_subscriber::EnvFilter;

/// Maps repeated `-v` flags to a default filter directive.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set; otherwise the level follows `verbosity`.
/// * Writes to stderr so reports on stdout stay machine-readable.
/// * Strips timestamps and target names to keep CLI output clean.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second initialisation (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
}
