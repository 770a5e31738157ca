//! Shared type definitions for the UTTE Universe simulation.
//!
//! This crate is the single source of truth for the entities the engine
//! mutates and the views it publishes. Wire views flow downstream to
//! `TypeScript` via `ts-rs` for the universe viewer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for planets and NPCs
//! - [`enums`] -- Resources, planet types and building types
//! - [`structs`] -- Core entity structs (planets, buildings, NPCs, events)
//! - [`wire`] -- JSON views and inbound stream commands

pub mod enums;
pub mod ids;
pub mod structs;
pub mod wire;

// Re-export all public types at crate root for convenience.
pub use enums::{BuildingType, PlanetType, Resource};
pub use ids::{NpcId, PlanetId};
pub use structs::{Building, EventTarget, Npc, Planet, WorldEvent, normalized_modifier};
pub use wire::{
    BuildingView, ClientCommand, CommandType, EventView, NpcList, NpcView, PlanetList, PlanetView,
    UniverseState,
};
