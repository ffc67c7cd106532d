pub mod api;
pub mod demo;
pub mod error;

pub use demo::DemoState;
pub use error::ApiError;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Browser origins allowed to call the strict API (the demo frontend).
pub const API_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5000", "http://127.0.0.1:5000"];

/// Strict API: `/health` and `POST /calculate-risk`.
pub fn api_router() -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/calculate-risk", post(api::calculate_risk))
        .layer(api_cors())
}

fn api_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(API_ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

/// Demo service: `/health`, both scoring endpoints, and the HTML page at `/`.
pub fn demo_router(state: DemoState) -> Router {
    Router::new()
        .route("/", get(demo::demo_page))
        .route("/health", get(demo::health))
        .route("/api/organizer-risk", post(demo::organizer_risk))
        .route("/api/group-risk", post(demo::group_risk))
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve `router` until Ctrl-C.
pub async fn serve(router: Router, addr: &str, name: &str) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {} to {}", name, addr))?;
    let local_addr = listener
        .local_addr()
        .context("Failed to read listener address")?;
    info!("{} listening on http://{}", name, local_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| format!("{} stopped with an error", name))?;

    info!("{} shut down", name);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
