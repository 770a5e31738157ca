//! Production, events, construction, and seeding for the UTTE Universe.
//!
//! This crate holds the world-model rules that run inside a tick:
//! resource production, random world events, and building placement and
//! upgrades. It also generates the initial universe.
//!
//! # Modules
//!
//! - [`construction`] -- Placement rules, build, and upgrade costs.
//! - [`error`] -- Error types for world-model operations and seeding.
//! - [`events`] -- Event triggering, boost application, and expiry.
//! - [`production`] -- Per-tick building output with planet and building
//!   multipliers.
//! - [`random`] -- The [`RandomSource`] abstraction and its `rand`-backed
//!   and scripted implementations.
//! - [`seed`] -- Initial planets and NPCs from a [`SeedConfig`].

pub mod construction;
pub mod error;
pub mod events;
pub mod production;
pub mod random;
pub mod seed;

// Re-export primary types at crate root.
pub use construction::{build, can_build, upgrade, upgrade_cost};
pub use error::{SeedError, WorldError};
pub use events::{EVENT_DURATION, maybe_trigger_event, update_events};
pub use production::produce_resources;
pub use random::{RandomSource, RngSource, ScriptedRandom};
pub use seed::{IntRange, NpcSeedConfig, SeedConfig, seed_universe};
