//! Diagnostic logging for the `colab` binary.
//!
//! Events go to stderr so stdout stays reserved for JSON payloads.
//! `RUST_LOG` selects levels (default `colab=info`); `RUST_LOG_FORMAT=json`
//! switches to one JSON object per event.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "colab=info";

/// Install the global subscriber. Later calls are no-ops.
pub fn init(quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if quiet { "colab=warn" } else { DEFAULT_FILTER })
    });

    let is_json = std::env::var("RUST_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    if is_json {
        let _ = subscriber.json().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
