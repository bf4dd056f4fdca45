//! The `Fleet` aggregate.

use std::collections::BTreeSet;

use fm_core::{EmpireId, FleetId, Point, ShipId, SystemId};

use crate::{RouteCache, TravelRoute};
use crate::visibility::FOREIGN_FLEET_NAME;

/// A group of ships that moves as one.
///
/// # Movement state
///
/// | Field         | Meaning                                                        |
/// |---------------|----------------------------------------------------------------|
/// | `system`      | `Some` while the fleet sits at a system, `None` in transit     |
/// | `destination` | final system of the active move order                          |
/// | `prev_system` | last system departed or passed                                 |
/// | `next_system` | first system on the route not yet reached                      |
/// | `route`       | cached route + remaining distance                              |
///
/// With no destination, `prev_system`/`next_system` are `None` and the route
/// is empty.
///
/// Membership and speed are private: change them through
/// [`FleetStore`](crate::FleetStore) so speed is recomputed and a
/// state-changed notification is queued.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    pub id:          FleetId,
    pub name:        String,
    pub owners:      BTreeSet<EmpireId>,
    pub position:    Point,
    pub system:      Option<SystemId>,
    pub destination: Option<SystemId>,
    pub prev_system: Option<SystemId>,
    pub next_system: Option<SystemId>,
    pub route:       RouteCache,
    ships:           BTreeSet<ShipId>,
    speed:           f64,
}

impl Fleet {
    pub fn new(
        id:       FleetId,
        name:     impl Into<String>,
        owner:    Option<EmpireId>,
        position: Point,
        system:   Option<SystemId>,
    ) -> Self {
        Self {
            id,
            name:        name.into(),
            owners:      owner.into_iter().collect(),
            position,
            system,
            destination: None,
            prev_system: None,
            next_system: None,
            route:       RouteCache::default(),
            ships:       BTreeSet::new(),
            speed:       0.0,
        }
    }

    // ── Ownership ─────────────────────────────────────────────────────────

    /// The empire that makes movement decisions: the lowest owner id.
    ///
    /// `None` for unowned fleets, which route with full knowledge and never
    /// explore.
    pub fn primary_owner(&self) -> Option<EmpireId> {
        self.owners.first().copied()
    }

    pub fn is_owned_by(&self, empire: EmpireId) -> bool {
        self.owners.contains(&empire)
    }

    /// The fleet's name as seen by `observer`.  Only owners and the
    /// omniscient observer see the real name.
    pub fn public_name(&self, observer: Option<EmpireId>) -> &str {
        match observer {
            Some(e) if !self.is_owned_by(e) => FOREIGN_FLEET_NAME,
            _ => &self.name,
        }
    }

    // ── Membership ────────────────────────────────────────────────────────

    pub fn ship_ids(&self) -> &BTreeSet<ShipId> {
        &self.ships
    }

    pub fn num_ships(&self) -> usize {
        self.ships.len()
    }

    pub fn contains(&self, ship: ShipId) -> bool {
        self.ships.contains(&ship)
    }

    pub(crate) fn ships_mut(&mut self) -> &mut BTreeSet<ShipId> {
        &mut self.ships
    }

    /// Cached fleet speed; see [`fleet_speed`](crate::fleet_speed).
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub(crate) fn set_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    // ── Movement state ────────────────────────────────────────────────────

    pub fn final_destination(&self) -> Option<SystemId> {
        self.destination
    }

    pub fn previous_system(&self) -> Option<SystemId> {
        self.prev_system
    }

    pub fn next_system(&self) -> Option<SystemId> {
        self.next_system
    }

    /// The cached route.  Never recomputes.
    pub fn travel_route(&self) -> &TravelRoute {
        self.route.route()
    }

    /// `true` if the cached route is the "exists but unknowable" marker.
    pub fn unknown_route(&self) -> bool {
        self.route.route().is_unknown()
    }

    pub fn is_moving(&self) -> bool {
        self.destination.is_some()
    }

    /// Forget the move order: destination, prev/next, and route.
    pub fn clear_movement(&mut self) {
        self.destination = None;
        self.prev_system = None;
        self.next_system = None;
        self.route.clear();
    }
}
