//! Tracing subscriber setup for the CLI.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `verbose` when set. `json` switches to one JSON
/// object per event.
pub fn init_tracing(verbose: bool, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    if json {
        let layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        tracing::subscriber::set_global_default(Registry::default().with(filter).with(layer))?;
    } else {
        let layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
        tracing::subscriber::set_global_default(Registry::default().with(filter).with(layer))?;
    }
    Ok(())
}
