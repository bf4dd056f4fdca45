//! Which fleets and ships are at each system.

use std::collections::{BTreeMap, BTreeSet};

use fm_core::{FleetId, ShipId, SystemId};

/// An object that can occupy a system.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectRef {
    Fleet(FleetId),
    Ship(ShipId),
}

/// System → occupants.  Systems with no occupants have no entry.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupancy {
    by_system: BTreeMap<SystemId, BTreeSet<ObjectRef>>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `object` was not already at `system`.
    pub fn insert(&mut self, system: SystemId, object: ObjectRef) -> bool {
        self.by_system.entry(system).or_default().insert(object)
    }

    /// Returns `true` if `object` was at `system`.
    pub fn remove(&mut self, system: SystemId, object: ObjectRef) -> bool {
        let Some(set) = self.by_system.get_mut(&system) else {
            return false;
        };
        let removed = set.remove(&object);
        if set.is_empty() {
            self.by_system.remove(&system);
        }
        removed
    }

    pub fn contains(&self, system: SystemId, object: ObjectRef) -> bool {
        self.by_system.get(&system).is_some_and(|s| s.contains(&object))
    }

    /// Occupants of `system` in ascending order (fleets before ships).
    pub fn occupants(&self, system: SystemId) -> impl Iterator<Item = ObjectRef> + '_ {
        self.by_system.get(&system).into_iter().flatten().copied()
    }

    pub fn fleets_at(&self, system: SystemId) -> impl Iterator<Item = FleetId> + '_ {
        self.occupants(system).filter_map(|o| match o {
            ObjectRef::Fleet(f) => Some(f),
            ObjectRef::Ship(_) => None,
        })
    }

    /// Systems with at least one occupant.
    pub fn occupied_systems(&self) -> impl Iterator<Item = SystemId> + '_ {
        self.by_system.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_system.is_empty()
    }
}
