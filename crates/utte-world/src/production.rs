//! Per-tick resource production.
//!
//! Every building adds its output to the planet's pool once per tick:
//!
//! ```text
//! output = base * level * planet_modifier * building_modifier
//! planet_modifier = normalized(planet.modifiers[r]) * type_modifier(planet.type, r)
//! ```
//!
//! The result is truncated toward zero. Planet type modifiers:
//!
//! | Type       | Iron | Food | Fuel |
//! |------------|------|------|------|
//! | Terra-like | 1.0  | 1.0  | 1.0  |
//! | Desert     | 1.2  | 0.5  | 1.2  |
//! | Gas Giant  | 1.5  | 0.0  | 1.5  |
//! | Icy        | 1.0  | 0.7  | 1.0  |

use tracing::trace;
use utte_types::{Building, Planet, PlanetType, Resource};

/// Fixed multiplier a planet's type applies to a resource.
#[allow(clippy::match_same_arms)]
pub const fn type_modifier(planet_type: PlanetType, resource: Resource) -> f64 {
    match (planet_type, resource) {
        (PlanetType::TerraLike, _) => 1.0,
        (PlanetType::Desert, Resource::Food) => 0.5,
        (PlanetType::Desert, _) => 1.2,
        (PlanetType::GasGiant, Resource::Food) => 0.0,
        (PlanetType::GasGiant, _) => 1.5,
        (PlanetType::Icy, Resource::Food) => 0.7,
        (PlanetType::Icy, _) => 1.0,
    }
}

/// Output of one building for one resource on the given planet.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn building_output(planet: &Planet, building: &Building, resource: Resource) -> u32 {
    let base = building.production.get(&resource).copied().unwrap_or(0);
    let planet_modifier = planet.modifier(resource) * type_modifier(planet.planet_type, resource);
    let output = f64::from(base)
        * f64::from(building.level)
        * planet_modifier
        * building.modifier(resource);
    // Float-to-int casts saturate and map NaN to zero.
    output as u32
}

/// Run one production pass over every planet.
///
/// Returns the total number of units produced across the universe.
pub fn produce_resources(planets: &mut [Planet]) -> u64 {
    let mut total: u64 = 0;
    for planet in planets {
        let mut gains = Vec::new();
        for building in &planet.buildings {
            for &resource in building.production.keys() {
                gains.push((resource, building_output(planet, building, resource)));
            }
        }
        for (resource, amount) in gains {
            let pool = planet.resources.entry(resource).or_insert(0);
            *pool = pool.saturating_add(amount);
            total = total.saturating_add(u64::from(amount));
        }
        trace!(planet = %planet.name, "production applied");
    }
    total
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use utte_types::BuildingType;

    use super::*;

    fn mine(base: u32, level: u32) -> Building {
        let mut building = Building::new(BuildingType::Mine);
        building.level = level;
        building.production.insert(Resource::Iron, base);
        building
    }

    #[test]
    fn mine_adds_base_output() {
        let mut planet = Planet::new("Terra-A", PlanetType::TerraLike);
        planet.resources.insert(Resource::Iron, 100);
        planet.buildings.push(mine(10, 1));

        let produced = produce_resources(std::slice::from_mut(&mut planet));
        assert_eq!(planet.resource(Resource::Iron), 110);
        assert_eq!(produced, 10);
    }

    #[test]
    fn zero_modifiers_yield_base_times_level() {
        let mut planet = Planet::new("Luna-D", PlanetType::TerraLike);
        planet.modifiers.insert(Resource::Iron, 0.0);
        let mut building = mine(7, 3);
        building.modifiers.insert(Resource::Iron, 0.0);
        planet.buildings.push(building);

        produce_resources(std::slice::from_mut(&mut planet));
        assert_eq!(planet.resource(Resource::Iron), 21);
    }

    #[test]
    fn gas_giant_produces_no_food() {
        let mut planet = Planet::new("Orion-G", PlanetType::GasGiant);
        let mut city = Building::new(BuildingType::City);
        city.production.insert(Resource::Food, 2);
        city.production.insert(Resource::Fuel, 2);
        planet.buildings.push(city);

        produce_resources(std::slice::from_mut(&mut planet));
        assert_eq!(planet.resource(Resource::Food), 0);
        assert_eq!(planet.resource(Resource::Fuel), 3);
    }

    #[test]
    fn output_truncates_toward_zero() {
        let mut planet = Planet::new("Nova-C", PlanetType::Icy);
        let mut farm = Building::new(BuildingType::Farm);
        farm.production.insert(Resource::Food, 5);
        planet.buildings.push(farm);

        // 5 * 0.7 = 3.5 -> 3
        let building = planet.buildings.first().unwrap();
        assert_eq!(building_output(&planet, building, Resource::Food), 3);
    }

    #[test]
    fn pool_saturates_instead_of_overflowing() {
        let mut planet = Planet::new("Eos-H", PlanetType::TerraLike);
        planet.resources.insert(Resource::Iron, u32::MAX);
        planet.buildings.push(mine(10, 1));
        produce_resources(std::slice::from_mut(&mut planet));
        assert_eq!(planet.resource(Resource::Iron), u32::MAX);
    }

    #[test]
    fn type_table() {
        assert_eq!(type_modifier(PlanetType::Desert, Resource::Food), 0.5);
        assert_eq!(type_modifier(PlanetType::Desert, Resource::Fuel), 1.2);
        assert_eq!(type_modifier(PlanetType::GasGiant, Resource::Iron), 1.5);
        assert_eq!(type_modifier(PlanetType::Icy, Resource::Iron), 1.0);
    }
}
