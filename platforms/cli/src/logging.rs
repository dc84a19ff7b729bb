//! Logging setup for the CLI, built on `tracing-subscriber`.

use std::io;
use tracing_subscriber::EnvFilter;

/// Maps the number of `-v` flags to a default filter level.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs a stderr subscriber. `RUST_LOG` takes precedence over the verbosity flags.
///
/// Progress events are let through when `progress` is set, whatever the level.
pub fn init(verbosity: u8, progress: bool) {
    let mut directives = level_for(verbosity).to_string();
    if progress {
        directives.push_str(",tmsim::progress=info");
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}
