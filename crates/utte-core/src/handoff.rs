//! Single-slot hand-offs between the engine and stream consumers.
//!
//! The engine publishes one snapshot per tick into each of three slots
//! (planets, NPCs, events). Publishing never blocks: a snapshot nobody has
//! taken yet is replaced, so a consumer always sees the latest tick.
//! Consumers poll with [`HandoffSlot::try_take`], which never blocks
//! either. Each lock is held only for the swap.

use std::sync::{Arc, Mutex, PoisonError};

use utte_types::{EventView, NpcList, NpcView, PlanetList, PlanetView, UniverseState};

use crate::world::World;

/// A single-capacity, overwrite-on-full buffer.
#[derive(Debug)]
pub struct HandoffSlot<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Default for HandoffSlot<T> {
    fn default() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }
}

impl<T> HandoffSlot<T> {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value`, replacing any snapshot not yet taken.
    ///
    /// Returns `true` if a pending snapshot was replaced.
    pub fn publish(&self, value: T) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(value)
            .is_some()
    }

    /// Take the pending snapshot, if any, leaving the slot empty.
    pub fn try_take(&self) -> Option<T> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }

    /// Whether a snapshot is waiting.
    pub fn is_occupied(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

#[derive(Debug, Default)]
struct Slots {
    planets: HandoffSlot<Vec<PlanetView>>,
    npcs: HandoffSlot<Vec<NpcView>>,
    events: HandoffSlot<Vec<EventView>>,
}

/// The three hand-off slots, shared between the engine and every stream.
#[derive(Debug, Clone, Default)]
pub struct UpdateDistribution {
    slots: Arc<Slots>,
}

impl UpdateDistribution {
    /// Create empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a snapshot of `world` into all three slots.
    pub fn publish_world(&self, world: &World) {
        self.publish(world.planet_views(), world.npc_views(), world.event_views());
    }

    /// Publish explicit snapshots into all three slots.
    pub fn publish(&self, planets: Vec<PlanetView>, npcs: Vec<NpcView>, events: Vec<EventView>) {
        self.slots.planets.publish(planets);
        self.slots.npcs.publish(npcs);
        self.slots.events.publish(events);
    }

    /// Drain the slots into one message.
    ///
    /// Returns `None`, touching nothing else, when no planet snapshot is
    /// pending. Otherwise the NPC and event slots are drained too, and an
    /// empty slot contributes an empty list.
    pub fn drain(&self) -> Option<UniverseState> {
        let planets = self.slots.planets.try_take()?;
        let npcs = self.slots.npcs.try_take().unwrap_or_default();
        let events = self.slots.events.try_take().unwrap_or_default();
        Some(UniverseState {
            planets: PlanetList { planets },
            npcs: NpcList { npcs },
            events,
        })
    }

    /// The planets slot.
    pub fn planets(&self) -> &HandoffSlot<Vec<PlanetView>> {
        &self.slots.planets
    }

    /// The NPC slot.
    pub fn npcs(&self) -> &HandoffSlot<Vec<NpcView>> {
        &self.slots.npcs
    }

    /// The events slot.
    pub fn events(&self) -> &HandoffSlot<Vec<EventView>> {
        &self.slots.events
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use utte_types::{Npc, Planet, PlanetType};

    use super::*;

    #[test]
    fn latest_publish_wins() {
        let slot = HandoffSlot::new();
        assert!(!slot.publish(1));
        assert!(slot.publish(2));
        assert_eq!(slot.try_take(), Some(2));
        assert_eq!(slot.try_take(), None);
    }

    #[test]
    fn take_empties_slot() {
        let slot = HandoffSlot::new();
        assert!(!slot.is_occupied());
        slot.publish("tick");
        assert!(slot.is_occupied());
        slot.try_take();
        assert!(!slot.is_occupied());
    }

    #[test]
    fn two_world_publishes_leave_only_the_second() {
        let distribution = UpdateDistribution::new();
        let mut world = World::new(vec![Planet::new("Aurora-A", PlanetType::Desert)], Vec::new());
        distribution.publish_world(&world);
        world.planets.push(Planet::new("Vega-B", PlanetType::Icy));
        world.npcs.push(Npc::new("Trader Joe-A"));
        distribution.publish_world(&world);

        let state = distribution.drain().unwrap();
        assert_eq!(state.planets.planets.len(), 2);
        assert_eq!(state.npcs.npcs.len(), 1);
        assert!(distribution.drain().is_none());
    }

    #[test]
    fn empty_planets_slot_drains_nothing() {
        let distribution = UpdateDistribution::new();
        distribution.npcs().publish(vec![NpcView::from(&Npc::new("Drake-E"))]);
        assert!(distribution.drain().is_none());
        // The NPC snapshot stays pending.
        assert!(distribution.npcs().is_occupied());
    }

    #[test]
    fn missing_side_slots_default_to_empty() {
        let distribution = UpdateDistribution::new();
        let planet = Planet::new("Nova-C", PlanetType::GasGiant);
        distribution
            .planets()
            .publish(vec![PlanetView::from_planet(&planet, &[])]);
        let state = distribution.drain().unwrap();
        assert_eq!(state.planets.planets[0].name, "Nova-C");
        assert!(state.npcs.npcs.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn clones_share_slots() {
        let engine_side = UpdateDistribution::new();
        let stream_side = engine_side.clone();
        engine_side.publish(Vec::new(), Vec::new(), Vec::new());
        assert!(stream_side.drain().is_some());
    }
}
