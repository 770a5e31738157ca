//! Initial universe generation.
//!
//! [`seed_universe`] turns a [`SeedConfig`] into the planets and NPCs the
//! engine starts with. Every random choice goes through the supplied
//! [`RandomSource`], so a seeded source reproduces the same universe.
//!
//! All ranges are half-open: `min` is inclusive and `max` exclusive.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use utte_types::{Building, BuildingType, Npc, Planet, PlanetType, Resource};

use crate::error::SeedError;
use crate::random::RandomSource;

const PLANET_NAMES: [&str; 8] = [
    "Aurora", "Vega", "Nova", "Luna", "Terra", "Ceres", "Orion", "Eos",
];

const NPC_NAMES: [&str; 5] = [
    "Trader Joe",
    "Merchant Mia",
    "Captain Rex",
    "Baroness Lila",
    "Drake",
];

/// Building types that seeding may place, in placement order.
const SEEDED_BUILDINGS: [BuildingType; 3] =
    [BuildingType::Mine, BuildingType::Farm, BuildingType::Refinery];

/// Half-open integer range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    /// Inclusive lower bound.
    pub min: u32,
    /// Exclusive upper bound.
    pub max: u32,
}

impl IntRange {
    /// Create a range.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Draw a value from the range.
    pub fn sample(self, random: &mut dyn RandomSource) -> u32 {
        random.int_in_range(self.min, self.max)
    }

    fn validate(self, field: &str) -> Result<(), SeedError> {
        if self.min >= self.max {
            return Err(SeedError::EmptyRange {
                field: field.to_owned(),
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// NPC generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NpcSeedConfig {
    /// How many NPCs to create.
    pub number_of_npcs: IntRange,
    /// Offer price range per resource.
    pub offers: BTreeMap<Resource, IntRange>,
    /// Starting credits.
    pub credits: IntRange,
    /// Cargo capacity.
    pub max_cargo: IntRange,
    /// Upper bound of the initial colonization cooldown.
    pub colonization_cooldown_seconds: u32,
}

impl Default for NpcSeedConfig {
    fn default() -> Self {
        Self {
            number_of_npcs: IntRange::new(3, 8),
            offers: BTreeMap::from([
                (Resource::Iron, IntRange::new(5, 20)),
                (Resource::Food, IntRange::new(5, 15)),
                (Resource::Fuel, IntRange::new(10, 25)),
            ]),
            credits: IntRange::new(200, 50_000),
            max_cargo: IntRange::new(50, 600),
            colonization_cooldown_seconds: 3600,
        }
    }
}

/// Universe generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// How many planets to create.
    pub number_of_planets: IntRange,
    /// Starting stock range per resource.
    pub resources: BTreeMap<Resource, IntRange>,
    /// Probability that each building type is placed on a planet.
    pub building_chance: BTreeMap<BuildingType, f64>,
    /// Build cost per building type.
    pub build_costs: BTreeMap<BuildingType, BTreeMap<Resource, u32>>,
    /// Base production range of seeded buildings.
    pub production: IntRange,
    /// NPC settings.
    pub npc: NpcSeedConfig,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            number_of_planets: IntRange::new(3, 15),
            resources: BTreeMap::from([
                (Resource::Iron, IntRange::new(100, 5000)),
                (Resource::Food, IntRange::new(300, 3000)),
                (Resource::Fuel, IntRange::new(200, 2000)),
            ]),
            building_chance: BTreeMap::from([
                (BuildingType::City, 0.2),
                (BuildingType::Mine, 0.8),
                (BuildingType::Farm, 0.7),
                (BuildingType::Refinery, 0.5),
            ]),
            build_costs: BTreeMap::from([
                (
                    BuildingType::City,
                    BTreeMap::from([(Resource::Iron, 100), (Resource::Food, 50), (Resource::Fuel, 20)]),
                ),
                (
                    BuildingType::Mine,
                    BTreeMap::from([(Resource::Iron, 50), (Resource::Food, 20)]),
                ),
                (
                    BuildingType::Farm,
                    BTreeMap::from([(Resource::Iron, 30), (Resource::Food, 10)]),
                ),
                (
                    BuildingType::Refinery,
                    BTreeMap::from([(Resource::Iron, 70), (Resource::Fuel, 30)]),
                ),
            ]),
            production: IntRange::new(3, 20),
            npc: NpcSeedConfig::default(),
        }
    }
}

impl SeedConfig {
    /// Reject empty or inverted ranges.
    pub fn validate(&self) -> Result<(), SeedError> {
        self.number_of_planets.validate("number_of_planets")?;
        self.production.validate("production")?;
        for (resource, range) in &self.resources {
            range.validate(&format!("resources.{resource}"))?;
        }
        self.npc.number_of_npcs.validate("npc.number_of_npcs")?;
        self.npc.credits.validate("npc.credits")?;
        self.npc.max_cargo.validate("npc.max_cargo")?;
        for (resource, range) in &self.npc.offers {
            range.validate(&format!("npc.offers.{resource}"))?;
        }
        Ok(())
    }
}

/// Name for the `index`th entity: `"{base}-{letter}"`.
fn entity_name(bases: &[&str], index: usize) -> String {
    let base = bases
        .get(index.checked_rem(bases.len()).unwrap_or(0))
        .copied()
        .unwrap_or_default();
    let offset = u8::try_from(index.checked_rem(26).unwrap_or(0)).unwrap_or(0);
    let letter = char::from(b'A'.saturating_add(offset));
    format!("{base}-{letter}")
}

/// Name of the `index`th seeded planet.
pub fn planet_name(index: usize) -> String {
    entity_name(&PLANET_NAMES, index)
}

/// Name of the `index`th seeded NPC.
pub fn npc_name(index: usize) -> String {
    entity_name(&NPC_NAMES, index)
}

fn sample_map(
    ranges: &BTreeMap<Resource, IntRange>,
    random: &mut dyn RandomSource,
) -> BTreeMap<Resource, u32> {
    Resource::ALL
        .into_iter()
        .map(|resource| {
            let value = ranges.get(&resource).map_or(0, |range| range.sample(random));
            (resource, value)
        })
        .collect()
}

fn generate_buildings(
    planet_type: PlanetType,
    config: &SeedConfig,
    random: &mut dyn RandomSource,
) -> Vec<Building> {
    let mut buildings = Vec::new();
    for building_type in SEEDED_BUILDINGS {
        if !building_type.allowed_on(planet_type) {
            continue;
        }
        let chance = config.building_chance.get(&building_type).copied().unwrap_or(0.0);
        if random.uniform01() >= chance {
            continue;
        }
        let Some(resource) = building_type.primary_resource() else {
            continue;
        };
        let mut building = Building::new(building_type);
        building.production.insert(resource, config.production.sample(random));
        building.modifiers.insert(resource, 1.0);
        building.build_cost = config.build_costs.get(&building_type).cloned().unwrap_or_default();
        buildings.push(building);
    }
    buildings
}

fn generate_planets(config: &SeedConfig, random: &mut dyn RandomSource) -> Vec<Planet> {
    let count = usize::try_from(config.number_of_planets.sample(random)).unwrap_or(0);
    (0..count)
        .map(|index| {
            let planet_type = PlanetType::ALL
                .get(random.int_less_than(PlanetType::ALL.len()))
                .copied()
                .unwrap_or(PlanetType::TerraLike);
            let mut planet = Planet::new(planet_name(index), planet_type);
            planet.resources = sample_map(&config.resources, random);
            planet.modifiers = Resource::ALL.into_iter().map(|r| (r, 1.0)).collect();
            planet.buildings = generate_buildings(planet_type, config, random);
            planet
        })
        .collect()
}

fn generate_npcs(
    config: &NpcSeedConfig,
    random: &mut dyn RandomSource,
    now: DateTime<Utc>,
) -> Vec<Npc> {
    let count = usize::try_from(config.number_of_npcs.sample(random)).unwrap_or(0);
    let cooldown_bound = usize::try_from(config.colonization_cooldown_seconds).unwrap_or(0);
    (0..count)
        .map(|index| {
            let mut npc = Npc::new(npc_name(index));
            npc.offer = sample_map(&config.offers, random);
            npc.credits = u64::from(config.credits.sample(random));
            npc.cargo = Resource::ALL.into_iter().map(|r| (r, 0)).collect();
            npc.max_cargo = config.max_cargo.sample(random);
            let delay = i64::try_from(random.int_less_than(cooldown_bound)).unwrap_or(0);
            npc.colonization_cooldown =
                Duration::try_seconds(delay).and_then(|delay| now.checked_add_signed(delay));
            npc
        })
        .collect()
}

/// Generate the initial planets and NPCs.
///
/// Fails if any configured range is empty or inverted.
pub fn seed_universe(
    config: &SeedConfig,
    random: &mut dyn RandomSource,
    now: DateTime<Utc>,
) -> Result<(Vec<Planet>, Vec<Npc>), SeedError> {
    config.validate()?;
    let planets = generate_planets(config, random);
    let npcs = generate_npcs(&config.npc, random, now);
    let buildings: usize = planets.iter().map(|p| p.buildings.len()).sum();
    info!(
        planets = planets.len(),
        buildings,
        npcs = npcs.len(),
        "universe seeded"
    );
    Ok((planets, npcs))
}
