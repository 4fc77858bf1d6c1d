use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Setup diagnostic logging on stderr.
///
/// The level is `warn` by default and `debug` with `verbose`; `RUST_LOG`
/// overrides both. User-facing output does not go through here.
///
/// Calling this twice is harmless: the second subscriber is not installed.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let result = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .try_init();

    if result.is_ok() {
        tracing::debug!(verbose, "logging initialized");
    }
}
