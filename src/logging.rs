//! Tracing/logging initialization.
//!
//! Logs go to stderr so they never interleave with shell output on stdout.
//! `RUST_LOG` wins over everything else; otherwise the settings filter is
//! used, raised by each `-v` on the command line.

use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Pick the effective filter directive for a base filter and `-v` count
pub fn filter_directive(base: &str, verbosity: u8) -> String {
    match verbosity {
        0 => base.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialize tracing for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(base_filter: &str, format: LogFormat, verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::try_new(filter_directive(base_filter, verbosity))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
