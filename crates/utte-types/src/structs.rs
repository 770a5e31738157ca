//! Core entity structs: planets, buildings, NPCs and world events.
//!
//! These are the mutable world-model records owned by the simulation
//! engine. Quantities are unsigned, so a resource pool can never be
//! negative; every mutator checks availability before subtracting.
//!
//! Multipliers are stored as `f64`. A multiplier that is absent or exactly
//! `0.0` means "unset" and reads as `1.0` through [`normalized_modifier`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::{BuildingType, PlanetType, Resource};
use crate::ids::{NpcId, PlanetId};

/// Read a multiplier from a modifier map, treating absent and zero
/// entries as neutral (`1.0`).
pub fn normalized_modifier(modifiers: &BTreeMap<Resource, f64>, resource: Resource) -> f64 {
    match modifiers.get(&resource).copied() {
        Some(value) if value != 0.0 => value,
        _ => 1.0,
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// A building standing on a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Kind of building.
    pub building_type: BuildingType,
    /// Current level, always at least 1. Only ever increases.
    pub level: u32,
    /// Base output per tick, per resource.
    pub production: BTreeMap<Resource, u32>,
    /// Building-local multipliers, per resource.
    pub modifiers: BTreeMap<Resource, f64>,
    /// Cost to build; upgrade cost scales with level.
    pub build_cost: BTreeMap<Resource, u32>,
}

impl Building {
    /// Create a level-1 building with no production, modifiers or cost.
    pub const fn new(building_type: BuildingType) -> Self {
        Self {
            building_type,
            level: 1,
            production: BTreeMap::new(),
            modifiers: BTreeMap::new(),
            build_cost: BTreeMap::new(),
        }
    }

    /// Normalized building multiplier for a resource.
    pub fn modifier(&self, resource: Resource) -> f64 {
        normalized_modifier(&self.modifiers, resource)
    }
}

// ---------------------------------------------------------------------------
// Planet
// ---------------------------------------------------------------------------

/// A planet: resource pool, modifiers, buildings and an optional owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    /// Stable identity.
    pub id: PlanetId,
    /// Human-readable name.
    pub name: String,
    /// Planet category.
    pub planet_type: PlanetType,
    /// Stored quantity per resource.
    pub resources: BTreeMap<Resource, u32>,
    /// Planet-wide multipliers, per resource.
    pub modifiers: BTreeMap<Resource, f64>,
    /// Buildings in construction order. Never shrinks, so an index is a
    /// stable building reference.
    pub buildings: Vec<Building>,
    /// The NPC that colonized this planet, if any.
    pub owner: Option<NpcId>,
}

impl Planet {
    /// Create an empty, unowned planet.
    pub fn new(name: impl Into<String>, planet_type: PlanetType) -> Self {
        Self {
            id: PlanetId::new(),
            name: name.into(),
            planet_type,
            resources: BTreeMap::new(),
            modifiers: BTreeMap::new(),
            buildings: Vec::new(),
            owner: None,
        }
    }

    /// Stored quantity of a resource (0 when absent).
    pub fn resource(&self, resource: Resource) -> u32 {
        self.resources.get(&resource).copied().unwrap_or(0)
    }

    /// Normalized planet multiplier for a resource.
    pub fn modifier(&self, resource: Resource) -> f64 {
        normalized_modifier(&self.modifiers, resource)
    }

    /// Whether an NPC has claimed this planet.
    pub const fn is_colonized(&self) -> bool {
        self.owner.is_some()
    }

    /// Whether the given NPC owns this planet.
    pub fn is_owned_by(&self, npc: NpcId) -> bool {
        self.owner == Some(npc)
    }
}

// ---------------------------------------------------------------------------
// NPC
// ---------------------------------------------------------------------------

/// An autonomous trading and colonizing agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    /// Stable identity.
    pub id: NpcId,
    /// Human-readable name.
    pub name: String,
    /// Unit price this NPC offers, per resource.
    pub offer: BTreeMap<Resource, u32>,
    /// Credit balance.
    pub credits: u64,
    /// Carried quantity per resource.
    pub cargo: BTreeMap<Resource, u32>,
    /// Maximum total cargo across all resources.
    pub max_cargo: u32,
    /// Earliest time this NPC may colonize again. `None` means no
    /// cooldown is pending.
    pub colonization_cooldown: Option<DateTime<Utc>>,
}

impl Npc {
    /// Create an NPC with no offers, credits or cargo.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NpcId::new(),
            name: name.into(),
            offer: BTreeMap::new(),
            credits: 0,
            cargo: BTreeMap::new(),
            max_cargo: 0,
            colonization_cooldown: None,
        }
    }

    /// Offered unit price for a resource (0 when absent).
    pub fn offer_price(&self, resource: Resource) -> u32 {
        self.offer.get(&resource).copied().unwrap_or(0)
    }

    /// Carried quantity of a resource (0 when absent).
    pub fn cargo_of(&self, resource: Resource) -> u32 {
        self.cargo.get(&resource).copied().unwrap_or(0)
    }

    /// Whether the colonization cooldown is still running at `now`.
    pub fn cooldown_active(&self, now: DateTime<Utc>) -> bool {
        self.colonization_cooldown.is_some_and(|until| now < until)
    }
}

// ---------------------------------------------------------------------------
// World events
// ---------------------------------------------------------------------------

/// What a world event acts upon. The variant is authoritative: a planet
/// event never carries a building reference and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTarget {
    /// The whole planet's modifiers.
    Planet {
        /// The affected planet.
        planet: PlanetId,
    },
    /// One building's modifiers.
    Building {
        /// The planet the building stands on.
        planet: PlanetId,
        /// Position of the building in the planet's building list.
        index: usize,
    },
}

impl EventTarget {
    /// The planet this target lives on.
    pub const fn planet(&self) -> PlanetId {
        match *self {
            Self::Planet { planet } | Self::Building { planet, .. } => planet,
        }
    }

    /// Wire discriminator: 0 for planets, 1 for buildings.
    pub const fn code(&self) -> u8 {
        match self {
            Self::Planet { .. } => 0,
            Self::Building { .. } => 1,
        }
    }
}

/// A temporary boost (or penalty) applied to a planet or building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    /// Display name, e.g. "Iron Boom".
    pub name: String,
    /// What the event acts upon.
    pub target: EventTarget,
    /// Multiplier applied per resource while the event is active.
    pub boost: BTreeMap<Resource, f64>,
    /// Total lifetime in ticks.
    pub duration: u32,
    /// Ticks left before the boost is reverted. Never exceeds `duration`.
    pub remaining_ticks: u32,
}
