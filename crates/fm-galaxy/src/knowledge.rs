//! Per-empire knowledge of the galaxy.
//!
//! Routing, reachability, visibility, and resupply all depend on *who is
//! asking*.  `Knowledge` is the single explicit object that answers those
//! questions; nothing in the engine consults process-wide state.
//!
//! An `observer` of `None` means the omniscient view (server-side checks,
//! unowned monsters): every lane is known and every system reachable.
//!
//! Supply ranges are computed elsewhere once per turn and pushed in with
//! [`Knowledge::set_supply_range`] before the movement phase runs.

use std::collections::{BTreeMap, BTreeSet};

use fm_core::{EmpireId, SystemId};

use crate::StarGraph;

/// Everything one empire knows about the galaxy.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmpireKnowledge {
    /// Lanes the empire may route along, stored as `(min, max)` pairs.
    pub known_lanes: BTreeSet<(SystemId, SystemId)>,

    /// Systems touched by at least one known lane.
    pub known_systems: BTreeSet<SystemId>,

    /// Systems a fleet of this empire has arrived at.
    pub explored: BTreeSet<SystemId>,

    /// Systems currently within detection range.
    pub visible: BTreeSet<SystemId>,

    /// Systems where this empire's fleets can refuel.
    pub supply: BTreeSet<SystemId>,
}

impl EmpireKnowledge {
    fn reveal_lane(&mut self, a: SystemId, b: SystemId) -> bool {
        self.known_systems.insert(a);
        self.known_systems.insert(b);
        self.known_lanes.insert(lane_key(a, b))
    }
}

/// Normalised key for an undirected lane.
#[inline]
fn lane_key(a: SystemId, b: SystemId) -> (SystemId, SystemId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Knowledge for every empire in the game, keyed by `EmpireId`.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Knowledge {
    empires: BTreeMap<EmpireId, EmpireKnowledge>,
}

impl Knowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `empire` with no knowledge.  Idempotent.
    pub fn register_empire(&mut self, empire: EmpireId) -> &mut EmpireKnowledge {
        self.empires.entry(empire).or_default()
    }

    pub fn empire(&self, empire: EmpireId) -> Option<&EmpireKnowledge> {
        self.empires.get(&empire)
    }

    pub fn empires(&self) -> impl Iterator<Item = EmpireId> + '_ {
        self.empires.keys().copied()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Make the lane `a`–`b` known to `empire`.  Returns `true` if it was new.
    pub fn reveal_lane(&mut self, empire: EmpireId, a: SystemId, b: SystemId) -> bool {
        self.register_empire(empire).reveal_lane(a, b)
    }

    /// Reveal every lane leaving `system` (what a fleet sees on arrival).
    pub fn reveal_lanes_of(&mut self, empire: EmpireId, system: SystemId, graph: &StarGraph) {
        if !graph.contains(system) {
            return;
        }
        let k = self.register_empire(empire);
        k.known_systems.insert(system);
        for n in graph.neighbors(system) {
            k.reveal_lane(system, n);
        }
    }

    /// Record that `empire` explored `system`: marks it explored and visible
    /// and reveals its lanes.  Returns `true` if the system was not explored
    /// before.
    pub fn explore(&mut self, empire: EmpireId, system: SystemId, graph: &StarGraph) -> bool {
        self.reveal_lanes_of(empire, system, graph);
        let k = self.register_empire(empire);
        k.visible.insert(system);
        k.explored.insert(system)
    }

    /// Replace the set of systems visible to `empire`.
    pub fn set_visible(&mut self, empire: EmpireId, systems: impl IntoIterator<Item = SystemId>) {
        self.register_empire(empire).visible = systems.into_iter().collect();
    }

    /// Replace the fleet supply range of `empire` (computed once per turn by
    /// the caller).
    pub fn set_supply_range(&mut self, empire: EmpireId, systems: impl IntoIterator<Item = SystemId>) {
        self.register_empire(empire).supply = systems.into_iter().collect();
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` if `observer` may route along the lane `a`–`b`.
    #[inline]
    pub fn lane_known(&self, observer: Option<EmpireId>, a: SystemId, b: SystemId) -> bool {
        match observer {
            None => true,
            Some(e) => self
                .empires
                .get(&e)
                .is_some_and(|k| k.known_lanes.contains(&lane_key(a, b))),
        }
    }

    /// `true` if `system` is connected to `observer`'s known lane network.
    pub fn is_reachable(&self, system: SystemId, observer: Option<EmpireId>) -> bool {
        match observer {
            None => true,
            Some(e) => self
                .empires
                .get(&e)
                .is_some_and(|k| k.known_systems.contains(&system)),
        }
    }

    /// `true` if `system` is currently visible to `observer`.
    pub fn is_visible(&self, system: SystemId, observer: Option<EmpireId>) -> bool {
        match observer {
            None => true,
            Some(e) => self.empires.get(&e).is_some_and(|k| k.visible.contains(&system)),
        }
    }

    pub fn is_explored(&self, system: SystemId, empire: EmpireId) -> bool {
        self.empires.get(&empire).is_some_and(|k| k.explored.contains(&system))
    }

    /// The fleet supply range of `empire`, if the empire is known.
    pub fn supplyable_systems(&self, empire: EmpireId) -> Option<&BTreeSet<SystemId>> {
        self.empires.get(&empire).map(|k| &k.supply)
    }

    /// `true` if any of `owners` can resupply fleets at `system`.
    pub fn is_supplied<'a>(
        &self,
        system: SystemId,
        owners: impl IntoIterator<Item = &'a EmpireId>,
    ) -> bool {
        owners
            .into_iter()
            .filter_map(|e| self.supplyable_systems(*e))
            .any(|supply| supply.contains(&system))
    }
}
