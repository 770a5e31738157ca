//! Observer server for the UTTE Universe.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` stream** (`/ws/universe`) running the client-driven
//!   subscribe/pause/resume/unsubscribe protocol over the engine's
//!   hand-off slots
//! - **REST reads** (`/api/planets`, `/api/npcs`) taken under the world
//!   lock
//! - **Status** (`/api/status`) and **liveness** (`/healthz`)
//!
//! # Architecture
//!
//! Streams never block the engine: each connection drains the latest
//! snapshot from the [`UpdateDistribution`] only when it is active and has
//! just read a command. REST reads share the engine's world lock.
//!
//! [`UpdateDistribution`]: utte_core::UpdateDistribution

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

pub use error::{ObserverError, StreamError};
pub use protocol::{CommandStream, Inbound, StreamReport, StreamState, run_stream};
pub use router::build_router;
pub use server::ServerError;
pub use startup::{ObserverHandle, StartupError, spawn_observer};
pub use state::AppState;
