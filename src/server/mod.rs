// src/server/mod.rs
// =============================================================================
// This module runs the HTTP service.
//
// The configuration lives in AppState and is shared read-only by every
// request through an Arc. The wiki page JSON is kept as the raw string and
// parsed per request, so a broken config shows up as a 500 on / and /bash
// while /fetch keeps working.
// =============================================================================

mod routes;

use crate::wiki::WikiFetcher;
use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use routes::router;

pub struct AppState {
    pub fetcher: WikiFetcher,
    pub wiki_pages: String,
    pub exclude_prefixes: Vec<String>,
}

// Binds to `addr` and serves until Ctrl-C
pub async fn serve(addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler we simply run until killed
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
