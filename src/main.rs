//! StudyForge · Learning Content Backend
//!
//! - Axum HTTP API: quiz generation + grading, news dashboards, topic explainers
//! - Optional chat-completions backend (via environment variables); without it,
//!   or whenever it fails, deterministic fallback content is served
//! - Static SPA fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT               : u16 (default 5001)
//!   LLM_API_KEY        : enables the completion backend (CEREBRAS_API_KEY also accepted)
//!   LLM_BASE_URL       : default "https://api.cerebras.ai/v1"
//!   LLM_MODEL          : default "llama3.1-8b"
//!   LLM_TIMEOUT_SECS   : default 45
//!   AGENT_CONFIG_PATH  : path to TOML config (prompt overrides)
//!   LOG_LEVEL          : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT         : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod error;
mod config;
mod extract;
mod validate;
mod fallback;
mod llm;
mod generator;
mod grading;
mod state;
mod protocol;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Shared state: in-memory stores + generator (backend client, prompts).
  let state = Arc::new(AppState::new());

  let app = build_router(state.clone());

  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5001)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "studyforge", %addr, backend = state.generator.is_online(), "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "studyforge", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  info!(target: "studyforge", "Shutdown signal received");
}
