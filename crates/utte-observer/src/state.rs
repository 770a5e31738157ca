//! Shared application state for the observer server.
//!
//! [`AppState`] holds the same [`SharedWorld`] and [`UpdateDistribution`]
//! the engine uses, plus the shutdown signal and a count of open streams.
//! Unary reads lock the world; streams only ever drain the hand-offs.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use utte_core::{ShutdownSignal, SharedWorld, UpdateDistribution};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The live world, read under its lock by the unary endpoints.
    pub world: SharedWorld,
    /// Hand-off slots the stream connections drain.
    pub updates: UpdateDistribution,
    /// Fired when the process is shutting down.
    pub shutdown: ShutdownSignal,
    open_streams: Arc<AtomicUsize>,
}

impl AppState {
    /// Create application state over the engine's world and hand-offs.
    pub fn new(world: SharedWorld, updates: UpdateDistribution, shutdown: ShutdownSignal) -> Self {
        Self {
            world,
            updates,
            shutdown,
            open_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of stream connections currently open.
    pub fn open_streams(&self) -> usize {
        self.open_streams.load(Ordering::Relaxed)
    }

    /// Register an open stream. The count drops when the guard does.
    pub fn track_stream(&self) -> StreamGuard {
        self.open_streams.fetch_add(1, Ordering::Relaxed);
        StreamGuard {
            counter: Arc::clone(&self.open_streams),
        }
    }
}

/// Keeps one stream counted in [`AppState::open_streams`].
#[derive(Debug)]
pub struct StreamGuard {
    counter: Arc<AtomicUsize>,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_tracks_open_streams() {
        let state = AppState::default();
        assert_eq!(state.open_streams(), 0);
        let first = state.track_stream();
        let second = state.clone().track_stream();
        assert_eq!(state.open_streams(), 2);
        drop(first);
        assert_eq!(state.open_streams(), 1);
        drop(second);
        assert_eq!(state.open_streams(), 0);
    }
}
