//! Random world events: temporary multipliers on planets and buildings.
//!
//! Each tick at most one event may trigger. A random planet is picked and
//! the trigger chance is `0.05` scaled by its type (Terra-like 1.0, Desert
//! 1.5, Gas Giant 0.8, Icy 1.2). A triggered event targets either one of
//! the planet's buildings or the planet as a whole, and its name and boost
//! come from a single decision so the two always agree.
//!
//! The boost is multiplied into the target's modifiers when the event is
//! created and divided back out when it expires after [`EVENT_DURATION`]
//! ticks.

use std::collections::BTreeMap;

use tracing::{debug, info};
use utte_types::{BuildingType, EventTarget, Planet, PlanetType, Resource, WorldEvent};

use crate::random::RandomSource;

/// Base per-tick probability that an event triggers.
pub const BASE_EVENT_CHANCE: f64 = 0.05;

/// Lifetime of every event, in ticks.
pub const EVENT_DURATION: u32 = 5;

/// Probability that a planet-wide event gets a small random variation.
const JITTER_CHANCE: f64 = 0.1;

/// Trigger chance multiplier per planet type.
pub const fn type_event_multiplier(planet_type: PlanetType) -> f64 {
    match planet_type {
        PlanetType::TerraLike => 1.0,
        PlanetType::Desert => 1.5,
        PlanetType::GasGiant => 0.8,
        PlanetType::Icy => 1.2,
    }
}

/// Boost multipliers in `Resource::ALL` order: Iron, Food, Fuel.
type BoostRow = [f64; 3];

/// Pick the event name and boost for a target.
///
/// `building` is the targeted building's type, or `None` for a
/// planet-wide event. Consumes at most one draw.
fn choose_event(
    planet_type: PlanetType,
    building: Option<BuildingType>,
    random: &mut dyn RandomSource,
) -> (&'static str, BoostRow) {
    match building {
        Some(BuildingType::Mine) => {
            if random.uniform01() < 0.7 {
                ("Iron Boom", [1.5, 1.0, 1.0])
            } else {
                ("Mine Collapse", [0.5, 1.0, 1.0])
            }
        }
        Some(BuildingType::Farm) => {
            if planet_type == PlanetType::Desert && random.uniform01() < 0.5 {
                ("Drought", [1.0, 0.5, 1.0])
            } else {
                ("Bountiful Harvest", [1.0, 1.4, 1.0])
            }
        }
        Some(BuildingType::Refinery) => {
            if random.uniform01() < 0.6 {
                ("Fuel Boost", [1.0, 1.0, 1.6])
            } else {
                ("Refinery Slump", [1.0, 1.0, 0.8])
            }
        }
        Some(BuildingType::City) => ("Economic Boom", [1.1, 1.1, 1.0]),
        None => match planet_type {
            PlanetType::Desert => {
                let name = if random.uniform01() < 0.6 {
                    "Heatwave"
                } else {
                    "Resource Windfall"
                };
                (name, [1.2, 0.5, 1.0])
            }
            PlanetType::GasGiant => ("Storm Surge", [1.3, 0.0, 1.5]),
            PlanetType::Icy => ("Ice Storm", [1.0, 0.7, 1.0]),
            PlanetType::TerraLike => ("Normal Fluctuation", [1.0, 1.0, 1.0]),
        },
    }
}

/// Apply the planet-wide variation: one independent draw per resource.
fn jitter(row: &mut BoostRow, random: &mut dyn RandomSource) {
    if random.uniform01() >= JITTER_CHANCE {
        return;
    }
    for value in row {
        *value *= 1.0 + (random.uniform01() - 0.5) * 0.1;
    }
}

/// Multiply a boost into a modifier map, normalizing unset entries first.
fn apply_boost(modifiers: &mut BTreeMap<Resource, f64>, boost: &BTreeMap<Resource, f64>) {
    for (&resource, &multiplier) in boost {
        let entry = modifiers.entry(resource).or_insert(1.0);
        if *entry == 0.0 {
            *entry = 1.0;
        }
        *entry *= multiplier;
    }
}

/// Divide a boost back out of a modifier map.
///
/// Missing entries and zero multipliers are skipped. A zero entry or a
/// result within `1e-9` of one snaps to exactly `1.0`.
fn revert_boost(modifiers: &mut BTreeMap<Resource, f64>, boost: &BTreeMap<Resource, f64>) {
    for (resource, &multiplier) in boost {
        let Some(entry) = modifiers.get_mut(resource) else {
            continue;
        };
        if *entry == 0.0 {
            *entry = 1.0;
            continue;
        }
        if multiplier == 0.0 {
            continue;
        }
        *entry /= multiplier;
        if *entry == 0.0 || (*entry - 1.0).abs() < 1e-9 {
            *entry = 1.0;
        }
    }
}

/// Resolve an event target to the modifier map it acts upon.
fn target_modifiers<'a>(
    planets: &'a mut [Planet],
    target: &EventTarget,
) -> Option<(&'a str, &'a mut BTreeMap<Resource, f64>)> {
    let planet = planets.iter_mut().find(|p| p.id == target.planet())?;
    match *target {
        EventTarget::Planet { .. } => Some((planet.name.as_str(), &mut planet.modifiers)),
        EventTarget::Building { index, .. } => {
            let building = planet.buildings.get_mut(index)?;
            Some((planet.name.as_str(), &mut building.modifiers))
        }
    }
}

/// Possibly trigger a new event on a random planet.
///
/// With no planets this is a no-op and consumes no draws. On trigger the
/// boost is applied to the target immediately and the event is appended
/// to `active`. Returns whether an event was triggered.
pub fn maybe_trigger_event(
    planets: &mut [Planet],
    active: &mut Vec<WorldEvent>,
    random: &mut dyn RandomSource,
) -> bool {
    if planets.is_empty() {
        debug!("no planets available for event triggering");
        return false;
    }

    let pick = random.int_less_than(planets.len());
    let Some(planet) = planets.get_mut(pick) else {
        return false;
    };

    let chance = BASE_EVENT_CHANCE * type_event_multiplier(planet.planet_type);
    let roll = random.uniform01();
    debug!(planet = %planet.name, chance, roll, "event roll");
    if roll >= chance {
        return false;
    }

    let building_target = if !planet.buildings.is_empty() && random.uniform01() < 0.5 {
        let index = random.int_less_than(planet.buildings.len());
        planet
            .buildings
            .get(index)
            .map(|b| (index, b.building_type))
    } else {
        None
    };

    let (name, mut row) = choose_event(
        planet.planet_type,
        building_target.map(|(_, kind)| kind),
        random,
    );
    let target = match building_target {
        Some((index, _)) => EventTarget::Building {
            planet: planet.id,
            index,
        },
        None => {
            jitter(&mut row, random);
            EventTarget::Planet { planet: planet.id }
        }
    };

    let boost: BTreeMap<Resource, f64> = Resource::ALL.into_iter().zip(row).collect();
    match target {
        EventTarget::Planet { .. } => apply_boost(&mut planet.modifiers, &boost),
        EventTarget::Building { index, .. } => {
            if let Some(building) = planet.buildings.get_mut(index) {
                apply_boost(&mut building.modifiers, &boost);
            }
        }
    }

    info!(
        planet = %planet.name,
        event = name,
        target = target.code(),
        "event triggered"
    );
    active.push(WorldEvent {
        name: name.to_owned(),
        target,
        boost,
        duration: EVENT_DURATION,
        remaining_ticks: EVENT_DURATION,
    });
    true
}

/// Age every active event by one tick and expire the finished ones.
///
/// Expired events have their boost reverted on the target (skipped if the
/// target no longer resolves) and are returned in their original order.
pub fn update_events(active: &mut Vec<WorldEvent>, planets: &mut [Planet]) -> Vec<WorldEvent> {
    let (expired, surviving): (Vec<_>, Vec<_>) = std::mem::take(active)
        .into_iter()
        .map(|mut event| {
            event.remaining_ticks = event.remaining_ticks.saturating_sub(1);
            event
        })
        .partition(|event| event.remaining_ticks == 0);
    *active = surviving;

    for event in &expired {
        if let Some((planet, modifiers)) = target_modifiers(planets, &event.target) {
            revert_boost(modifiers, &event.boost);
            info!(planet, event = %event.name, "event expired");
        } else {
            debug!(event = %event.name, "expired event target no longer exists");
        }
    }
    expired
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use utte_types::Building;

    use super::*;
    use crate::random::{RngSource, ScriptedRandom};

    fn planet_with_mine(planet_type: PlanetType) -> Planet {
        let mut planet = Planet::new("Aurora-A", planet_type);
        for resource in Resource::ALL {
            planet.modifiers.insert(resource, 1.0);
        }
        let mut mine = Building::new(BuildingType::Mine);
        mine.production.insert(Resource::Iron, 10);
        mine.modifiers.insert(Resource::Iron, 1.0);
        planet.buildings.push(mine);
        planet
    }

    #[test]
    fn no_planets_is_a_no_op() {
        let mut active = vec![WorldEvent {
            name: String::from("Ice Storm"),
            target: EventTarget::Planet {
                planet: utte_types::PlanetId::new(),
            },
            boost: BTreeMap::new(),
            duration: 5,
            remaining_ticks: 3,
        }];
        let before = active.clone();
        let mut random = ScriptedRandom::new([0.0], [0]);
        assert!(!maybe_trigger_event(&mut [], &mut active, &mut random));
        assert_eq!(active, before);
        assert_eq!(random.remaining_uniforms(), 1);
    }

    #[test]
    fn roll_above_chance_does_not_trigger() {
        let mut planets = vec![planet_with_mine(PlanetType::TerraLike)];
        let mut active = Vec::new();
        let mut random = ScriptedRandom::new([0.05], [0]);
        assert!(!maybe_trigger_event(&mut planets, &mut active, &mut random));
        assert!(active.is_empty());
    }

    #[test]
    fn building_event_name_matches_boost() {
        let mut planets = vec![planet_with_mine(PlanetType::TerraLike)];
        let mut active = Vec::new();
        // trigger, building target, then Iron Boom.
        let mut random = ScriptedRandom::new([0.01, 0.2, 0.3], [0, 0]);
        assert!(maybe_trigger_event(&mut planets, &mut active, &mut random));

        let event = active.first().unwrap();
        assert_eq!(event.name, "Iron Boom");
        assert_eq!(event.boost.get(&Resource::Iron), Some(&1.5));
        assert_eq!(event.duration, 5);
        assert_eq!(event.remaining_ticks, 5);
        assert!(matches!(event.target, EventTarget::Building { index: 0, .. }));
        let mine = planets[0].buildings.first().unwrap();
        assert_eq!(mine.modifier(Resource::Iron), 1.5);
        // Planet modifiers untouched by a building event.
        assert_eq!(planets[0].modifier(Resource::Iron), 1.0);
    }

    #[test]
    fn mine_collapse_halves_iron() {
        let mut planets = vec![planet_with_mine(PlanetType::Desert)];
        let mut active = Vec::new();
        let mut random = ScriptedRandom::new([0.01, 0.2, 0.9], [0, 0]);
        assert!(maybe_trigger_event(&mut planets, &mut active, &mut random));
        assert_eq!(active[0].name, "Mine Collapse");
        assert_eq!(planets[0].buildings[0].modifier(Resource::Iron), 0.5);
    }

    #[test]
    fn planet_event_on_gas_giant() {
        let mut planets = vec![Planet::new("Orion-G", PlanetType::GasGiant)];
        let mut active = Vec::new();
        // trigger at 0.03 < 0.04, no jitter.
        let mut random = ScriptedRandom::new([0.03, 0.5], [0]);
        assert!(maybe_trigger_event(&mut planets, &mut active, &mut random));

        let event = &active[0];
        assert_eq!(event.name, "Storm Surge");
        assert_eq!(event.target, EventTarget::Planet { planet: planets[0].id });
        assert_eq!(planets[0].modifiers.get(&Resource::Iron), Some(&1.3));
        assert_eq!(planets[0].modifiers.get(&Resource::Fuel), Some(&1.5));
        assert_eq!(event.boost.len(), 3);
    }

    #[test]
    fn jitter_draws_once_per_resource() {
        let mut planets = vec![Planet::new("Terra-E", PlanetType::TerraLike)];
        let mut active = Vec::new();
        // trigger, jitter roll, then Iron/Food/Fuel variations.
        let mut random = ScriptedRandom::new([0.01, 0.05, 1.0, 0.0, 0.5], [0]);
        assert!(maybe_trigger_event(&mut planets, &mut active, &mut random));

        let boost = &active[0].boost;
        assert!((boost[&Resource::Iron] - 1.05).abs() < 1e-12);
        assert!((boost[&Resource::Food] - 0.95).abs() < 1e-12);
        assert_eq!(boost[&Resource::Fuel], 1.0);
        assert_eq!(random.remaining_uniforms(), 0);
    }

    #[test]
    fn duration_one_event_reverts_to_neutral() {
        let mut planet = Planet::new("Vega-B", PlanetType::TerraLike);
        planet.modifiers.insert(Resource::Iron, 1.5);
        let mut active = vec![WorldEvent {
            name: String::from("Iron Boom"),
            target: EventTarget::Planet { planet: planet.id },
            boost: BTreeMap::from([(Resource::Iron, 1.5)]),
            duration: 1,
            remaining_ticks: 1,
        }];
        let mut planets = vec![planet];

        let expired = update_events(&mut active, &mut planets);
        assert!(active.is_empty());
        assert_eq!(expired.len(), 1);
        assert_eq!(planets[0].modifiers.get(&Resource::Iron), Some(&1.0));
    }

    #[test]
    fn apply_then_revert_round_trips_to_one() {
        let mut random = RngSource::new(SmallRng::seed_from_u64(99));
        for planet_type in PlanetType::ALL {
            let mut planets = vec![planet_with_mine(planet_type)];
            let mut active = Vec::new();
            for _ in 0..2000 {
                maybe_trigger_event(&mut planets, &mut active, &mut random);
                if !active.is_empty() {
                    break;
                }
            }
            assert_eq!(active.len(), 1, "no event triggered on {planet_type}");
            for _ in 0..EVENT_DURATION {
                update_events(&mut active, &mut planets);
            }
            assert!(active.is_empty());
            for resource in Resource::ALL {
                assert_eq!(planets[0].modifiers.get(&resource), Some(&1.0));
            }
            assert_eq!(planets[0].buildings[0].modifier(Resource::Iron), 1.0);
        }
    }

    #[test]
    fn surviving_events_count_down() {
        let planet = Planet::new("Eos-H", PlanetType::Icy);
        let mut active = vec![WorldEvent {
            name: String::from("Ice Storm"),
            target: EventTarget::Planet { planet: planet.id },
            boost: BTreeMap::from([(Resource::Food, 0.7)]),
            duration: 5,
            remaining_ticks: 5,
        }];
        let mut planets = vec![planet];
        assert!(update_events(&mut active, &mut planets).is_empty());
        assert_eq!(active[0].remaining_ticks, 4);
    }

    #[test]
    fn dangling_target_is_skipped() {
        let mut active = vec![WorldEvent {
            name: String::from("Fuel Boost"),
            target: EventTarget::Building {
                planet: utte_types::PlanetId::new(),
                index: 7,
            },
            boost: BTreeMap::from([(Resource::Fuel, 1.6)]),
            duration: 5,
            remaining_ticks: 1,
        }];
        let mut planets = vec![Planet::new("Luna-D", PlanetType::TerraLike)];
        assert_eq!(update_events(&mut active, &mut planets).len(), 1);
        assert!(planets[0].modifiers.is_empty());
    }

    #[test]
    fn zero_entry_snaps_to_one_on_revert() {
        let mut modifiers = BTreeMap::from([(Resource::Food, 0.0)]);
        revert_boost(&mut modifiers, &BTreeMap::from([(Resource::Food, 0.0)]));
        assert_eq!(modifiers[&Resource::Food], 1.0);
    }
}
