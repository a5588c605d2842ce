//! Quizgen · Assignment & Quiz Generator Backend
//!
//! - Axum HTTP + WebSocket API around a small text pipeline:
//!   concept extraction -> essay assignments -> multiple-choice quiz
//! - Static front end fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   GENERATOR_CONFIG_PATH : path to TOML config (templates, stems, topic boilerplate, seed)
//!   GENERATOR_SEED        : u64, fixes the RNG for reproducible output
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod concepts;
mod assignments;
mod quiz;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared application state (generators, topic boilerplate, RNG).
  let state = Arc::new(AppState::new());

  // HTTP router with routes, CORS and tracing layers.
  let app = build_router(state);

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "quizgen_backend", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "quizgen_backend", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    warn!(target: "quizgen_backend", error = %e, "Failed to listen for Ctrl+C; running until killed");
    std::future::pending::<()>().await;
  }
}
