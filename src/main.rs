//! Math Tutor · practice backend
//!
//! - Axum HTTP + WebSocket API
//! - Static UI fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT              : u16 (default 3000)
//!   TUTOR_CONFIG_PATH : path to TOML config (tolerances, scoring, messages, session limits)
//!   LOG_LEVEL         : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT        : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing::{info, warn};

use mathtutor_backend::routes::build_router;
use mathtutor_backend::state::AppState;
use mathtutor_backend::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let state = Arc::new(AppState::new());
  let app = build_router(state.clone());

  let sweeper = state.clone();
  tokio::spawn(async move {
    let mut every = tokio::time::interval(Duration::from_secs(60));
    loop {
      every.tick().await;
      sweeper.sweep_idle().await;
    }
  });

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "mathtutor_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
  info!(target: "mathtutor_backend", "Server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "mathtutor_backend", error = %e, "Could not listen for Ctrl-C; running until killed");
    std::future::pending::<()>().await;
  }
  info!(target: "mathtutor_backend", "Shutdown signal received");
}
