use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "PHOTOMANIA_LOG";

/// Installs the stderr subscriber. Verbosity comes from `PHOTOMANIA_LOG`
/// (an `EnvFilter` directive such as `debug` or `photomania=info`) and
/// defaults to warnings only.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded in another program.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
