//! Structured logging setup for the generator service.
//!
//! - LOG_LEVEL: an `EnvFilter` directive string. Unset or unparsable falls
//!   back to [`DEFAULT_FILTER`].
//! - LOG_FORMAT=json: one JSON object per event; anything else is the
//!   human-readable fmt output.
//!
//! Pipeline events log under `quizgen`, the HTTP/WS layer under
//! `quizgen_backend`. Per-request spans come from tower-http's TraceLayer.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,quizgen=debug,quizgen_backend=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    if json_logs_requested() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn json_logs_requested() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.trim().eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
