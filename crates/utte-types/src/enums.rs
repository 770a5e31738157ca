//! Enumeration types for the UTTE Universe simulation.
//!
//! Internally every category is a compact tagged enum. The wire layer
//! converts them to their display names ("Terra-like", "Gas Giant",
//! "Mine", "Iron") via [`Resource::name`], [`PlanetType::name`] and
//! [`BuildingType::name`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

/// A tradeable, producible resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Raw metal, the primary output of mines.
    Iron,
    /// Food, the primary output of farms.
    Food,
    /// Fuel, the primary output of refineries.
    Fuel,
}

impl Resource {
    /// Every resource, in canonical order.
    pub const ALL: [Self; 3] = [Self::Iron, Self::Food, Self::Fuel];

    /// Wire and display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Iron => "Iron",
            Self::Food => "Food",
            Self::Fuel => "Fuel",
        }
    }

    /// Parse a wire name back into a resource.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl core::fmt::Display for Resource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Planets
// ---------------------------------------------------------------------------

/// Planet category. Drives production penalties, event likelihood and
/// which buildings may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlanetType {
    /// Earth-like world, neutral for every resource.
    TerraLike,
    /// Arid world: poor food, rich in everything else.
    Desert,
    /// Gas giant: no food at all, strong fuel and iron.
    GasGiant,
    /// Frozen world with reduced food output.
    Icy,
}

impl PlanetType {
    /// Every planet type, in canonical order.
    pub const ALL: [Self; 4] = [Self::TerraLike, Self::Desert, Self::GasGiant, Self::Icy];

    /// Wire and display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::TerraLike => "Terra-like",
            Self::Desert => "Desert",
            Self::GasGiant => "Gas Giant",
            Self::Icy => "Icy",
        }
    }
}

impl core::fmt::Display for PlanetType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// Kind of building that can stand on a planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    /// Extracts iron.
    Mine,
    /// Grows food.
    Farm,
    /// Refines fuel.
    Refinery,
    /// Settlement with balanced output across all resources.
    City,
}

impl BuildingType {
    /// Every building type, in canonical order.
    pub const ALL: [Self; 4] = [Self::Mine, Self::Farm, Self::Refinery, Self::City];

    /// Wire and display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mine => "Mine",
            Self::Farm => "Farm",
            Self::Refinery => "Refinery",
            Self::City => "City",
        }
    }

    /// The resource this building is built around. Cities produce a
    /// balanced mix and have no single primary resource.
    pub const fn primary_resource(self) -> Option<Resource> {
        match self {
            Self::Mine => Some(Resource::Iron),
            Self::Farm => Some(Resource::Food),
            Self::Refinery => Some(Resource::Fuel),
            Self::City => None,
        }
    }

    /// Whether this building may be placed on a planet of the given type.
    ///
    /// Farms need soil (terra-like or icy worlds); mines cannot be sunk
    /// into a gas giant. Refineries and cities go anywhere.
    pub const fn allowed_on(self, planet_type: PlanetType) -> bool {
        match self {
            Self::Farm => matches!(planet_type, PlanetType::TerraLike | PlanetType::Icy),
            Self::Mine => !matches!(planet_type, PlanetType::GasGiant),
            Self::Refinery | Self::City => true,
        }
    }
}

impl core::fmt::Display for BuildingType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
