//! Cargo hold operations for NPCs.
//!
//! An NPC carries resources up to `max_cargo` total units. These helpers
//! use checked arithmetic throughout. Entries are kept at zero rather than
//! removed, so a view of the hold always lists every resource it has
//! carried.

use std::collections::BTreeMap;

use utte_types::Resource;

use crate::error::AgentError;

/// Total units carried across all resources.
///
/// Returns `None` if the sum overflows `u32`.
pub fn total_load(cargo: &BTreeMap<Resource, u32>) -> Option<u32> {
    let mut total: u32 = 0;
    for qty in cargo.values() {
        total = total.checked_add(*qty)?;
    }
    Some(total)
}

/// Whether the hold is at or above capacity. An overflowing load counts
/// as full.
pub fn is_full(cargo: &BTreeMap<Resource, u32>, max_cargo: u32) -> bool {
    total_load(cargo).is_none_or(|load| load >= max_cargo)
}

/// Add `amount` units of `resource` to the hold.
pub fn add_cargo(
    cargo: &mut BTreeMap<Resource, u32>,
    resource: Resource,
    amount: u32,
) -> Result<(), AgentError> {
    let entry = cargo.entry(resource).or_insert(0);
    *entry = entry
        .checked_add(amount)
        .ok_or_else(|| AgentError::ArithmeticOverflow {
            context: format!("cargo of {resource} overflowed"),
        })?;
    Ok(())
}

/// Remove `amount` units of `resource` from the hold.
///
/// Fails without mutating if the NPC carries less than `amount`.
pub fn remove_cargo(
    cargo: &mut BTreeMap<Resource, u32>,
    resource: Resource,
    amount: u32,
) -> Result<(), AgentError> {
    let available = cargo.get(&resource).copied().unwrap_or(0);
    let remaining = available
        .checked_sub(amount)
        .ok_or(AgentError::InsufficientCargo {
            resource,
            requested: amount,
            available,
        })?;
    cargo.insert(resource, remaining);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn load_sums_all_resources() {
        let cargo = BTreeMap::from([(Resource::Iron, 10), (Resource::Fuel, 5)]);
        assert_eq!(total_load(&cargo), Some(15));
        assert_eq!(total_load(&BTreeMap::new()), Some(0));
    }

    #[test]
    fn full_at_capacity() {
        let cargo = BTreeMap::from([(Resource::Food, 50)]);
        assert!(is_full(&cargo, 50));
        assert!(!is_full(&cargo, 51));
    }

    #[test]
    fn overflowing_load_is_full() {
        let cargo = BTreeMap::from([(Resource::Iron, u32::MAX), (Resource::Food, 1)]);
        assert_eq!(total_load(&cargo), None);
        assert!(is_full(&cargo, u32::MAX));
    }

    #[test]
    fn add_then_remove() {
        let mut cargo = BTreeMap::new();
        add_cargo(&mut cargo, Resource::Iron, 7).unwrap();
        remove_cargo(&mut cargo, Resource::Iron, 7).unwrap();
        assert_eq!(cargo.get(&Resource::Iron), Some(&0));
    }

    #[test]
    fn remove_more_than_held_is_rejected() {
        let mut cargo = BTreeMap::from([(Resource::Fuel, 2)]);
        let err = remove_cargo(&mut cargo, Resource::Fuel, 3).unwrap_err();
        assert_eq!(
            err,
            AgentError::InsufficientCargo {
                resource: Resource::Fuel,
                requested: 3,
                available: 2,
            }
        );
        assert_eq!(cargo.get(&Resource::Fuel), Some(&2));
    }

    #[test]
    fn add_overflow_is_rejected() {
        let mut cargo = BTreeMap::from([(Resource::Food, u32::MAX)]);
        assert!(add_cargo(&mut cargo, Resource::Food, 1).is_err());
        assert_eq!(cargo.get(&Resource::Food), Some(&u32::MAX));
    }
}
