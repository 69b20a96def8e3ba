//! HTTP server implementation using Axum.

use crate::handler::{handle_get_links, handle_health, handle_save_links};
use crate::store::LinkStore;
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    /// Single-blob collection storage
    pub store: LinkStore,
}

/// Start the links HTTP server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(store: LinkStore, host: &str, port: u16) -> anyhow::Result<SocketAddr> {
    let state = Arc::new(AppState { store });

    // Configure CORS for browser front ends on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = Router::new()
        .route("/health", get(handle_health))
        .route(
            "/api/links",
            get(handle_get_links)
                .post(handle_save_links)
                .put(handle_save_links),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse the address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    // Bind to the address
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });

    Ok(actual_addr)
}
