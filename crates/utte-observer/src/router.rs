//! Axum router construction for the observer server.
//!
//! Assembles the stream endpoint and the REST routes into a single
//! [`Router`] with CORS and request tracing.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete router.
///
/// - `GET /ws/universe` -- `WebSocket` universe stream
/// - `GET /api/planets` -- planet list
/// - `GET /api/npcs` -- NPC list
/// - `GET /api/status` -- tick and counts
/// - `GET /healthz` -- liveness
///
/// Any other path answers with a JSON 404.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ws/universe", get(ws::ws_universe))
        .route("/api/planets", get(handlers::list_planets))
        .route("/api/npcs", get(handlers::list_npcs))
        .route("/api/status", get(handlers::status))
        .route("/healthz", get(handlers::healthz))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
