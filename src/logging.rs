//! Diagnostic logging setup.
//!
//! User-facing progress goes through [`crate::ui`]; this only wires `tracing`
//! output to stderr. `RUST_LOG` takes precedence over the `-v` count.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::error::{ChangelogTagError, Result};

/// Map the number of `-v` flags to a level for this crate
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            EnvFilter::try_new(format!("changelog_tag={}", level_for_verbosity(verbose)))
        })
        .map_err(|e| ChangelogTagError::config(format!("invalid log filter: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| ChangelogTagError::config(format!("cannot initialise logging: {}", e)))
}
