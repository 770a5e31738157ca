//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Planets and NPCs carry strongly-typed IDs so that an owner reference
//! can never be confused with a planet reference at compile time. All IDs
//! use UUID v7 (time-ordered), so seeding order is preserved when IDs are
//! sorted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a planet.
    PlanetId
}

define_id! {
    /// Unique identifier for an NPC (autonomous trading agent).
    NpcId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        assert_ne!(PlanetId::new(), PlanetId::new());
        assert_ne!(NpcId::new(), NpcId::new());
    }

    #[test]
    fn display_matches_inner_uuid() {
        let id = NpcId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
