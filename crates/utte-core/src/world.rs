//! The mutable world model and its shared, exclusive-access handle.
//!
//! [`World`] owns every planet, NPC and active event. The engine holds the
//! [`SharedWorld`] lock for a whole tick, and the unary read endpoints take
//! the same lock to build their snapshots, so a reader never observes a
//! half-applied tick.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};
use utte_types::{EventView, Npc, NpcList, NpcView, Planet, PlanetList, PlanetView, WorldEvent};

/// Every entity in the universe plus the tick counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct World {
    /// All planets, in seeding order.
    pub planets: Vec<Planet>,
    /// All NPCs, in seeding order.
    pub npcs: Vec<Npc>,
    /// Events currently in effect.
    pub events: Vec<WorldEvent>,
    /// Number of completed ticks.
    pub tick: u64,
}

/// Counts describing the current world, for status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorldStatus {
    /// Number of completed ticks.
    pub tick: u64,
    /// Planet count.
    pub planets: usize,
    /// NPC count.
    pub npcs: usize,
    /// Events currently in effect.
    pub active_events: usize,
}

impl World {
    /// Create a world at tick zero with no events.
    pub const fn new(planets: Vec<Planet>, npcs: Vec<Npc>) -> Self {
        Self {
            planets,
            npcs,
            events: Vec::new(),
            tick: 0,
        }
    }

    /// Wire view of every planet, owners resolved.
    pub fn planet_views(&self) -> Vec<PlanetView> {
        self.planets
            .iter()
            .map(|planet| PlanetView::from_planet(planet, &self.npcs))
            .collect()
    }

    /// Wire view of every NPC.
    pub fn npc_views(&self) -> Vec<NpcView> {
        self.npcs.iter().map(NpcView::from).collect()
    }

    /// Wire view of every active event, targets resolved.
    pub fn event_views(&self) -> Vec<EventView> {
        self.events
            .iter()
            .map(|event| EventView::from_event(event, &self.planets))
            .collect()
    }

    /// Response body for the planets read endpoint.
    pub fn planet_list(&self) -> PlanetList {
        PlanetList {
            planets: self.planet_views(),
        }
    }

    /// Response body for the NPC read endpoint.
    pub fn npc_list(&self) -> NpcList {
        NpcList {
            npcs: self.npc_views(),
        }
    }

    /// Current counts.
    pub fn status(&self) -> WorldStatus {
        WorldStatus {
            tick: self.tick,
            planets: self.planets.len(),
            npcs: self.npcs.len(),
            active_events: self.events.len(),
        }
    }
}

/// Cloneable handle to the one [`World`], serialized behind an async mutex.
#[derive(Debug, Clone, Default)]
pub struct SharedWorld {
    inner: Arc<Mutex<World>>,
}

impl SharedWorld {
    /// Wrap a world for shared access.
    pub fn new(world: World) -> Self {
        Self {
            inner: Arc::new(Mutex::new(world)),
        }
    }

    /// Acquire exclusive access.
    pub async fn lock(&self) -> MutexGuard<'_, World> {
        self.inner.lock().await
    }

    /// Snapshot of all planets, taken under the lock.
    pub async fn planet_list(&self) -> PlanetList {
        self.lock().await.planet_list()
    }

    /// Snapshot of all NPCs, taken under the lock.
    pub async fn npc_list(&self) -> NpcList {
        self.lock().await.npc_list()
    }

    /// Current counts, taken under the lock.
    pub async fn status(&self) -> WorldStatus {
        self.lock().await.status()
    }
}
