//! Score server (axum).
//!
//! Serves:
//! - `GET  /score`: high score for the token's game message
//! - `POST /score`: submit a score (`force=true` upstream)
//! - `GET  /health`: liveness probe, not token gated
//!
//! Every `/score` request must carry a valid `token` header.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use mgb_core::{config::Config, ports::GameApi, token::TokenCodec};

pub mod auth;
pub mod error;
pub mod routes;

/// Shared, read-only state for the score routes.
#[derive(Clone)]
pub struct ScoreState {
    pub api: Arc<dyn GameApi>,
    pub codec: TokenCodec,
}

impl ScoreState {
    pub fn new(cfg: &Config, api: Arc<dyn GameApi>) -> Self {
        Self {
            api,
            codec: TokenCodec::new(cfg.secret_key.as_bytes()),
        }
    }
}

/// Build the axum router for the score server.
pub fn build_router(state: ScoreState) -> Router {
    Router::new()
        .route("/score", get(routes::get_score).post(routes::post_score))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ))
        .route("/health", get(routes::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the score server's listener. Must succeed before the bot starts
/// issuing tokens.
pub async fn bind(addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind score server to {addr}"))?;
    tracing::info!("score server listening on http://{}", listener.local_addr()?);
    Ok(listener)
}

/// Run the score server on `listener` until `shutdown` is cancelled.
pub async fn serve(
    listener: TcpListener,
    state: ScoreState,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("score server failed")?;

    tracing::info!("score server stopped");
    Ok(())
}
