// SPDX-FileCopyrightText: 2026 Parlor Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. Business decisions live
//! in the engine; handlers only translate between HTTP and the store and
//! generator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    Router,
    routing::{delete, get, post},
};
use parlor_config::model::GatewayConfig;
use parlor_core::{ConversationStore, ParlorError};
use parlor_engine::ResponseGenerator;
use tower_http::cors::CorsLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Conversation persistence.
    pub store: Arc<dyn ConversationStore>,
    /// Response generation pipeline.
    pub engine: Arc<ResponseGenerator>,
    /// Upper bound on one generation call. The engine itself never times out.
    pub generate_timeout: Duration,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(
        store: Arc<dyn ConversationStore>,
        engine: Arc<ResponseGenerator>,
        generate_timeout: Duration,
    ) -> Self {
        Self {
            store,
            engine,
            generate_timeout,
            start_time: Instant::now(),
        }
    }
}

/// Builds the full application router.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/chat/create", post(handlers::create_session))
        .route("/api/chat/message", post(handlers::post_message))
        .route("/api/chat/history/{session_id}", get(handlers::get_history))
        .route("/api/chat/escalate", post(handlers::escalate_session))
        .route("/api/chat/{session_id}", delete(handlers::delete_session))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// Binds to the configured host:port and serves until the process exits.
pub async fn start_server(config: &GatewayConfig, state: GatewayState) -> Result<(), ParlorError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ParlorError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| ParlorError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}
