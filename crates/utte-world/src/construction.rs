//! Building placement, construction, and upgrades.
//!
//! Placement follows [`BuildingType::allowed_on`]: farms need a terra-like
//! or icy world, mines cannot go on a gas giant, and refineries and cities
//! go anywhere. Costs are paid from the planet's own resource pool and are
//! all-or-nothing: either every resource is deducted or nothing is.
//!
//! [`BuildingType::allowed_on`]: utte_types::BuildingType::allowed_on

use std::collections::BTreeMap;

use tracing::{debug, error, info};
use utte_types::{Building, Planet, Resource};

use crate::error::WorldError;

/// Check that every cost in `cost` is covered by the planet's pool.
fn check_affordable(planet: &Planet, cost: &BTreeMap<Resource, u32>) -> Result<(), WorldError> {
    for (&resource, &required) in cost {
        let available = planet.resource(resource);
        if available < required {
            return Err(WorldError::InsufficientResource {
                resource,
                required,
                available,
            });
        }
    }
    Ok(())
}

/// Deduct an already-checked cost from the planet's pool.
fn pay(planet: &mut Planet, cost: &BTreeMap<Resource, u32>) {
    for (&resource, &amount) in cost {
        let pool = planet.resources.entry(resource).or_insert(0);
        *pool = pool.saturating_sub(amount);
        debug!(planet = %planet.name, %resource, amount, "resource deducted");
    }
}

/// Whether `building` may be placed on `planet` and the planet can pay
/// for it.
pub fn can_build(planet: &Planet, building: &Building) -> Result<(), WorldError> {
    if !building.building_type.allowed_on(planet.planet_type) {
        return Err(WorldError::Placement {
            building: building.building_type,
            planet_type: planet.planet_type,
        });
    }
    check_affordable(planet, &building.build_cost)
}

/// Build `building` on `planet`, paying its cost.
///
/// Returns `false` and leaves the planet untouched if placement or cost
/// checks fail.
pub fn build(planet: &mut Planet, building: Building) -> bool {
    if let Err(err) = can_build(planet, &building) {
        error!(planet = %planet.name, building = %building.building_type, %err, "build rejected");
        return false;
    }
    pay(planet, &building.build_cost);
    info!(planet = %planet.name, building = %building.building_type, "building constructed");
    planet.buildings.push(building);
    true
}

/// Cost of raising `building` one level: `build_cost * (level + 1)` for
/// each resource.
pub fn upgrade_cost(building: &Building) -> Result<BTreeMap<Resource, u32>, WorldError> {
    let factor = building
        .level
        .checked_add(1)
        .ok_or(WorldError::ArithmeticOverflow)?;
    building
        .build_cost
        .iter()
        .map(|(&resource, &cost)| {
            cost.checked_mul(factor)
                .map(|scaled| (resource, scaled))
                .ok_or(WorldError::ArithmeticOverflow)
        })
        .collect()
}

/// Upgrade the building at `index` on `planet`, paying from the planet's
/// pool.
///
/// Returns `false` and leaves the planet untouched if the building does
/// not exist or the planet cannot afford the full upgrade cost.
pub fn upgrade(planet: &mut Planet, index: usize) -> bool {
    match try_upgrade(planet, index) {
        Ok(level) => {
            info!(planet = %planet.name, index, level, "building upgraded");
            true
        }
        Err(err) => {
            error!(planet = %planet.name, index, %err, "upgrade rejected");
            false
        }
    }
}

fn try_upgrade(planet: &mut Planet, index: usize) -> Result<u32, WorldError> {
    let building = planet
        .buildings
        .get(index)
        .ok_or(WorldError::BuildingNotFound(index))?;
    let cost = upgrade_cost(building)?;
    let next_level = building
        .level
        .checked_add(1)
        .ok_or(WorldError::ArithmeticOverflow)?;
    check_affordable(planet, &cost)?;
    pay(planet, &cost);
    let building = planet
        .buildings
        .get_mut(index)
        .ok_or(WorldError::BuildingNotFound(index))?;
    building.level = next_level;
    Ok(next_level)
}
