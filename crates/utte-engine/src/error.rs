//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure that can stop the process: bad
//! configuration, a seeding range that cannot be sampled, an observer that
//! cannot bind, or a task that died.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: utte_core::ConfigError,
    },

    /// Initial universe generation failed.
    #[error("seed error: {source}")]
    Seed {
        /// The underlying seeding error.
        #[from]
        source: utte_world::SeedError,
    },

    /// Observer server failed to start.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying startup error.
        #[from]
        source: utte_observer::StartupError,
    },

    /// Installing the Ctrl-C handler failed.
    #[error("signal error: {source}")]
    Signal {
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A background task panicked or was cancelled.
    #[error("task error: {source}")]
    Task {
        /// The underlying join error.
        #[from]
        source: tokio::task::JoinError,
    },
}
