//! Logging setup
//!
//! Console output goes through a `tracing` fmt subscriber on stderr. The
//! level comes from `FOUNDATION_INSTALLER_LOG`, then `--verbose`, then
//! `[logging] level` in installer.toml.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Environment variable overriding the configured level
pub const LOG_ENV: &str = "FOUNDATION_INSTALLER_LOG";

/// Resolve the filter directive from the environment, the verbose flag and
/// the configured level, in that order
pub fn filter_directive(configured: &str, verbose: bool) -> String {
    if let Ok(env) = std::env::var(LOG_ENV) {
        if !env.trim().is_empty() {
            return env;
        }
    }
    if verbose {
        "debug".to_string()
    } else {
        configured.to_string()
    }
}

/// Install the global subscriber writing to stderr
///
/// Silent runs only report errors so scripted callers get clean output.
pub fn init_logging(configured: &str, verbose: bool, silent: bool) {
    let directive = if silent && !verbose {
        "error".to_string()
    } else {
        filter_directive(configured, verbose)
    };
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();

    // A second init (tests, embedding) keeps the first subscriber
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Global subscriber already installed");
    }
}
