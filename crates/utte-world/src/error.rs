//! Error types for the `utte-world` crate.

use utte_types::{BuildingType, PlanetType, Resource};

/// Errors that can occur during world-model operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// The building type may not be placed on this planet type.
    #[error("{building} cannot be built on a {planet_type} planet")]
    Placement {
        /// The rejected building type.
        building: BuildingType,
        /// The planet type it was placed on.
        planet_type: PlanetType,
    },

    /// The planet does not hold enough of a resource.
    #[error("insufficient {resource}: required {required}, available {available}")]
    InsufficientResource {
        /// The lacking resource.
        resource: Resource,
        /// Amount needed.
        required: u32,
        /// Amount held.
        available: u32,
    },

    /// A building index does not exist on the planet.
    #[error("no building at index {0}")]
    BuildingNotFound(usize),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in world calculation")]
    ArithmeticOverflow,
}

/// Errors raised while generating the initial universe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    /// A configured range is empty or inverted.
    #[error("seed range `{field}` is empty: [{min}, {max})")]
    EmptyRange {
        /// The offending configuration field.
        field: String,
        /// Lower bound (inclusive).
        min: u32,
        /// Upper bound (exclusive).
        max: u32,
    },
}
