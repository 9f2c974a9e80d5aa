//! Subscriber setup for binaries. Library code only emits `tracing` events.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// JSON logs at `info` unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    init_tracing_with("info", true);
}

/// Install a global subscriber. `RUST_LOG` overrides `default_filter`;
/// `json` picks machine-readable lines over the compact human format.
pub fn init_tracing_with(default_filter: &str, json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    if json {
        let fmt_layer = fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_ansi(false)
            .json();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().compact().without_time())
            .try_init()
            .ok();
    }
}
