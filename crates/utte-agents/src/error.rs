//! Error types for the utte-agents crate.
//!
//! Cargo and trade mutators return typed errors rather than panicking. The
//! per-tick decision functions turn these into logged, non-fatal outcomes.

use utte_types::Resource;

/// Errors that can occur during NPC cargo and trade operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// Attempted to remove more of a resource than the NPC carries.
    #[error("insufficient cargo: wanted {requested} of {resource} but only have {available}")]
    InsufficientCargo {
        /// The resource being removed.
        resource: Resource,
        /// The quantity requested.
        requested: u32,
        /// The quantity carried.
        available: u32,
    },

    /// The NPC cannot pay for a purchase.
    #[error("insufficient credits: need {required}, have {available}")]
    InsufficientCredits {
        /// Price of the purchase.
        required: u64,
        /// Current balance.
        available: u64,
    },

    /// An arithmetic overflow occurred during a cargo or price computation.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },
}
