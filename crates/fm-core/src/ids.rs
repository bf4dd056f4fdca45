//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as `BTreeMap` keys.
//! Ordered maps keyed by these ids are what make fleet processing order a
//! pure function of the world state.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID", equal to `<inner>::MAX`.
            ///
            /// Only used at wire/CSV boundaries; in-memory state uses
            /// `Option<Id>` instead.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a fleet.
    pub struct FleetId(u32);
}

typed_id! {
    /// Identity of a ship.  A ship belongs to at most one fleet at a time.
    pub struct ShipId(u32);
}

typed_id! {
    /// Index of a star system (a node of the lane graph).
    pub struct SystemId(u32);
}

typed_id! {
    /// Identity of an empire (player or AI).  `u16` keeps owner sets compact.
    pub struct EmpireId(u16);
}

/// Encode an optional id as its raw integer, using `INVALID` for `None`.
///
/// Used by output backends that need a flat integer column.
#[inline]
pub fn raw_system(id: Option<SystemId>) -> u32 {
    id.unwrap_or(SystemId::INVALID).0
}
