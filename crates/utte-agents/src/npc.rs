//! Per-tick NPC decisions: colonize an unowned planet or trade with one.
//!
//! Each tick an NPC whose colonization cooldown has passed rolls twice:
//!
//! 1. With 5% probability (and at least one unowned planet) it colonizes a
//!    random unowned planet, founding a City (70%) or a Mine (30%), and
//!    starts a new cooldown of 600 to 4200 seconds.
//! 2. Otherwise, with 30% probability, it trades with a random planet via
//!    [`execute_trade`].
//!
//! Trading with an owned planet is a free internal transfer. Trading with
//! any other planet costs one credit per unit, and each resource leg is
//! skipped when the NPC cannot pay for it.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info};
use utte_types::{Building, BuildingType, Npc, Planet, PlanetId, Resource};
use utte_world::RandomSource;

use crate::cargo::add_cargo;

/// Probability of colonizing when an unowned planet exists.
pub const COLONIZE_CHANCE: f64 = 0.05;

/// Probability of founding a City rather than a Mine.
pub const CITY_CHANCE: f64 = 0.7;

/// Probability of trading when no colonization happened.
pub const TRADE_CHANCE: f64 = 0.3;

/// Colonization cooldown bounds in seconds, half-open.
pub const COOLDOWN_RANGE_SECS: (u32, u32) = (600, 4200);

/// Credits charged per unit in an external trade.
pub const EXTERNAL_UNIT_PRICE: u64 = 1;

/// What an NPC did during its tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NpcAction {
    /// The colonization cooldown is still running; nothing happened.
    CooldownActive,
    /// The NPC claimed a planet and founded a building on it.
    Colonized {
        /// The claimed planet.
        planet: PlanetId,
        /// The founded building.
        building: BuildingType,
    },
    /// The NPC traded with a planet.
    Traded {
        /// The trading partner.
        planet: PlanetId,
        /// What moved.
        report: TradeReport,
    },
    /// Neither roll succeeded.
    Idle,
}

/// Result of one [`execute_trade`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeReport {
    /// Whether the planet belonged to the NPC.
    pub internal: bool,
    /// Units moved into the NPC's cargo, per resource.
    pub moved: BTreeMap<Resource, u32>,
    /// Credits spent.
    pub spent: u64,
    /// Resource legs skipped for lack of credits.
    pub unaffordable: Vec<Resource>,
}

impl TradeReport {
    /// Total units moved across all resources.
    pub fn total_moved(&self) -> u64 {
        self.moved.values().map(|&q| u64::from(q)).sum()
    }
}

fn city() -> Building {
    let mut building = Building::new(BuildingType::City);
    building.production =
        BTreeMap::from([(Resource::Food, 2), (Resource::Iron, 2), (Resource::Fuel, 1)]);
    building.modifiers = Resource::ALL.into_iter().map(|r| (r, 1.0)).collect();
    building.build_cost =
        BTreeMap::from([(Resource::Food, 10), (Resource::Iron, 10), (Resource::Fuel, 5)]);
    building
}

fn mine() -> Building {
    let mut building = Building::new(BuildingType::Mine);
    building.production = BTreeMap::from([(Resource::Iron, 3)]);
    building.modifiers = BTreeMap::from([(Resource::Iron, 1.0)]);
    building.build_cost = BTreeMap::from([(Resource::Food, 5), (Resource::Iron, 15)]);
    building
}

/// Claim `planet` for `npc` and found one building on it.
///
/// Consumes one draw to choose between a City and a Mine. Founding is
/// free; no build cost is charged.
pub fn colonize_planet(npc: &Npc, planet: &mut Planet, random: &mut dyn RandomSource) -> BuildingType {
    planet.owner = Some(npc.id);
    let building = if random.uniform01() < CITY_CHANCE {
        city()
    } else {
        mine()
    };
    let kind = building.building_type;
    planet.buildings.push(building);
    info!(npc = %npc.name, planet = %planet.name, building = %kind, "planet colonized");
    kind
}

fn take_from_planet(planet: &mut Planet, resource: Resource, amount: u32) {
    let pool = planet.resources.entry(resource).or_insert(0);
    *pool = pool.saturating_sub(amount);
}

/// Move resources from `planet` into the NPC's cargo.
///
/// For each resource the NPC has an offer for, `min(planet stock, offer)`
/// units move. The transfer is free if the NPC owns the planet. Otherwise
/// each leg costs [`EXTERNAL_UNIT_PRICE`] per unit and is skipped, with
/// nothing mutated, if the NPC cannot pay.
pub fn execute_trade(npc: &mut Npc, planet: &mut Planet) -> TradeReport {
    let internal = planet.is_owned_by(npc.id);
    let mut report = TradeReport {
        internal,
        ..TradeReport::default()
    };

    for (&resource, &offer) in &npc.offer {
        let amount = planet.resource(resource).min(offer);
        if amount == 0 {
            continue;
        }

        let cost = if internal {
            0
        } else {
            u64::from(amount).saturating_mul(EXTERNAL_UNIT_PRICE)
        };
        if npc.credits < cost {
            error!(
                npc = %npc.name,
                planet = %planet.name,
                %resource,
                cost,
                credits = npc.credits,
                "not enough credits for external trade"
            );
            report.unaffordable.push(resource);
            continue;
        }

        if let Err(err) = add_cargo(&mut npc.cargo, resource, amount) {
            error!(npc = %npc.name, %resource, %err, "trade leg rejected");
            continue;
        }
        take_from_planet(planet, resource, amount);
        npc.credits = npc.credits.saturating_sub(cost);
        report.spent = report.spent.saturating_add(cost);
        report.moved.insert(resource, amount);

        if internal {
            info!(npc = %npc.name, planet = %planet.name, %resource, amount, "internal transfer");
        } else {
            info!(npc = %npc.name, planet = %planet.name, %resource, amount, cost, "external trade");
        }
    }
    report
}

/// Run one tick of colonization and trade decisions for `npc`.
pub fn run_npc_logic(
    npc: &mut Npc,
    planets: &mut [Planet],
    random: &mut dyn RandomSource,
    now: DateTime<Utc>,
) -> NpcAction {
    if npc.cooldown_active(now) {
        debug!(npc = %npc.name, "colonization cooldown active");
        return NpcAction::CooldownActive;
    }

    let candidates: Vec<usize> = planets
        .iter()
        .enumerate()
        .filter(|(_, planet)| !planet.is_colonized())
        .map(|(index, _)| index)
        .collect();

    if !candidates.is_empty() && random.uniform01() < COLONIZE_CHANCE {
        let pick = random.int_less_than(candidates.len());
        if let Some(planet) = candidates.get(pick).and_then(|&i| planets.get_mut(i)) {
            let building = colonize_planet(npc, planet, random);
            let (min, max) = COOLDOWN_RANGE_SECS;
            let delay = Duration::seconds(i64::from(random.int_in_range(min, max)));
            npc.colonization_cooldown = now.checked_add_signed(delay);
            return NpcAction::Colonized {
                planet: planet.id,
                building,
            };
        }
    }

    if !planets.is_empty() && random.uniform01() < TRADE_CHANCE {
        let pick = random.int_less_than(planets.len());
        if let Some(planet) = planets.get_mut(pick) {
            debug!(npc = %npc.name, planet = %planet.name, "attempting trade");
            let report = execute_trade(npc, planet);
            return NpcAction::Traded {
                planet: planet.id,
                report,
            };
        }
    }

    NpcAction::Idle
}
