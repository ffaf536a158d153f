//! Logging setup for the CLI.
//!
//! Logs go to stderr so that `--format json` output on stdout stays parseable.
//! `RUST_LOG` wins over `--verbose` when set.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "docio=debug,docio_cli=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(verbose))
        .try_init();

    tracing::debug!(verbose, "Logging initialized");
}
