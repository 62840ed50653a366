//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! - LOG_LEVEL controls the filter (e.g. "debug" or directives like
//!   "info,practice=debug,mathtutor_backend=debug,tower_http=info").
//! - LOG_FORMAT selects "pretty" (default) or "json" structured logs.
//!
//! Targets in use: `mathtutor_backend` for service lifecycle, `practice` for
//! problem generation, answer checks and scoring.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,practice=debug,mathtutor_backend=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => {
            builder.json().init();
        }
        _ => {
            builder.init();
        }
    }
}
