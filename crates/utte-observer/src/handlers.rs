//! REST endpoint handlers for the observer server.
//!
//! The read endpoints take the world lock and build a full snapshot, so
//! they never observe a half-applied tick and never touch the hand-off
//! slots.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/api/planets` | Every planet, owners embedded |
//! | `GET` | `/api/npcs` | Every NPC |
//! | `GET` | `/api/status` | Tick and entity counts |
//! | `GET` | `/healthz` | Liveness probe |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use serde::Serialize;
use utte_types::{NpcList, PlanetList};

use crate::error::ObserverError;
use crate::state::AppState;

/// Response body for `GET /api/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    /// Last completed tick.
    pub tick: u64,
    /// Planet count.
    pub planets: usize,
    /// NPC count.
    pub npcs: usize,
    /// Events currently in effect.
    pub active_events: usize,
    /// Stream connections currently open.
    pub open_streams: usize,
}

/// List every planet.
pub async fn list_planets(State(state): State<Arc<AppState>>) -> Json<PlanetList> {
    Json(state.world.planet_list().await)
}

/// List every NPC.
pub async fn list_npcs(State(state): State<Arc<AppState>>) -> Json<NpcList> {
    Json(state.world.npc_list().await)
}

/// Current tick and counts.
pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let world = state.world.status().await;
    Json(StatusResponse {
        tick: world.tick,
        planets: world.planets,
        npcs: world.npcs,
        active_events: world.active_events,
        open_streams: state.open_streams(),
    })
}

/// Liveness probe: always `204 No Content`.
pub async fn healthz() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// JSON 404 for unknown routes.
pub async fn not_found(uri: Uri) -> ObserverError {
    ObserverError::NotFound(uri.path().to_owned())
}
