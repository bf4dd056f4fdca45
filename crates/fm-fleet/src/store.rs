//! `FleetStore`: fleets, ships, system occupancy, and change notifications.

use std::collections::BTreeMap;

use fm_core::{CoreError, CoreResult, EmpireId, FleetId, MovementRules, Point, ShipId, SystemId};

use crate::{Fleet, ObjectRef, Occupancy, Ship, ShipMap};
use crate::aggregate::{fleet_fuel, fleet_max_fuel, fleet_speed};

/// Owns every fleet and ship and keeps them consistent with each other and
/// with system occupancy.
///
/// # State-changed notifications
///
/// Every structural mutation (route set, membership change) pushes the fleet
/// id onto a pending queue.  The turn processor drains it with
/// [`drain_changes`](Self::drain_changes) and forwards each entry to its
/// observer, so UI or network sync code can react without the store knowing
/// about either.
#[derive(Clone, Debug)]
pub struct FleetStore {
    fleets:         BTreeMap<FleetId, Fleet>,
    ships:          ShipMap,
    occupancy:      Occupancy,
    pending:        Vec<FleetId>,
    /// Next id handed out by `create_fleet`; never reused.
    next_fleet:     FleetId,
    max_ship_speed: f64,
}

impl Default for FleetStore {
    fn default() -> Self {
        Self::new(&MovementRules::default())
    }
}

impl FleetStore {
    pub fn new(rules: &MovementRules) -> Self {
        Self {
            fleets:         BTreeMap::new(),
            ships:          ShipMap::new(),
            occupancy:      Occupancy::new(),
            pending:        Vec::new(),
            next_fleet:     FleetId(0),
            max_ship_speed: rules.max_ship_speed,
        }
    }

    pub fn max_ship_speed(&self) -> f64 {
        self.max_ship_speed
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Create an empty fleet and return its id.  Ids increase monotonically,
    /// so a removed fleet's id is never handed out again.
    pub fn create_fleet(
        &mut self,
        name:     impl Into<String>,
        owner:    Option<EmpireId>,
        position: Point,
        system:   Option<SystemId>,
    ) -> FleetId {
        let id = self.next_fleet;
        self.next_fleet = FleetId(id.0 + 1);
        if let Some(s) = system {
            self.occupancy.insert(s, ObjectRef::Fleet(id));
        }
        self.fleets.insert(id, Fleet::new(id, name, owner, position, system));
        id
    }

    /// An unused ship id.
    pub fn next_ship_id(&self) -> ShipId {
        self.ships.last_key_value().map_or(ShipId(0), |(k, _)| ShipId(k.0 + 1))
    }

    /// Add a free-standing ship (not in any fleet).  Replaces any ship with
    /// the same id.
    pub fn insert_ship(&mut self, mut ship: Ship) -> ShipId {
        let id = ship.id;
        self.delete_ship_object(id);
        ship.fleet = None;
        if let Some(s) = ship.system {
            self.occupancy.insert(s, ObjectRef::Ship(id));
        }
        self.ships.insert(id, ship);
        id
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn fleet(&self, id: FleetId) -> CoreResult<&Fleet> {
        self.fleets.get(&id).ok_or(CoreError::FleetNotFound(id))
    }

    pub fn fleet_mut(&mut self, id: FleetId) -> CoreResult<&mut Fleet> {
        self.fleets.get_mut(&id).ok_or(CoreError::FleetNotFound(id))
    }

    pub fn ship(&self, id: ShipId) -> CoreResult<&Ship> {
        self.ships.get(&id).ok_or(CoreError::ShipNotFound(id))
    }

    /// Mutable access to a ship.  Call
    /// [`recalculate_speed`](Self::recalculate_speed) on its fleet after
    /// changing `speed`.
    pub fn ship_mut(&mut self, id: ShipId) -> CoreResult<&mut Ship> {
        self.ships.get_mut(&id).ok_or(CoreError::ShipNotFound(id))
    }

    /// All fleets in ascending id order.
    pub fn fleets(&self) -> impl Iterator<Item = &Fleet> + '_ {
        self.fleets.values()
    }

    pub fn fleet_ids(&self) -> Vec<FleetId> {
        self.fleets.keys().copied().collect()
    }

    pub fn fleet_count(&self) -> usize {
        self.fleets.len()
    }

    pub fn ships(&self) -> &ShipMap {
        &self.ships
    }

    pub fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    // ── Aggregates & queries ──────────────────────────────────────────────

    pub fn fuel(&self, id: FleetId) -> CoreResult<f64> {
        fleet_fuel(self.fleet(id)?, &self.ships)
    }

    pub fn max_fuel(&self, id: FleetId) -> CoreResult<f64> {
        fleet_max_fuel(self.fleet(id)?, &self.ships)
    }

    /// Re-derive and cache the fleet's speed from its members.
    pub fn recalculate_speed(&mut self, id: FleetId) -> CoreResult<f64> {
        let fleet = self.fleets.get_mut(&id).ok_or(CoreError::FleetNotFound(id))?;
        let speed = fleet_speed(fleet, &self.ships, self.max_ship_speed)?;
        fleet.set_speed(speed);
        Ok(speed)
    }

    pub fn has_armed_ships(&self, id: FleetId) -> CoreResult<bool> {
        self.any_member(id, |s| s.armed)
    }

    pub fn has_colony_ships(&self, id: FleetId) -> CoreResult<bool> {
        self.any_member(id, |s| s.can_colonize)
    }

    fn any_member(&self, id: FleetId, f: impl Fn(&Ship) -> bool) -> CoreResult<bool> {
        for sid in self.fleet(id)?.ship_ids() {
            if f(self.ship(*sid)?) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // ── Notifications ─────────────────────────────────────────────────────

    /// Queue a state-changed notification for `id`.
    pub fn notify_changed(&mut self, id: FleetId) {
        self.pending.push(id);
    }

    pub fn pending_changes(&self) -> &[FleetId] {
        &self.pending
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_changes(&mut self) -> Vec<FleetId> {
        std::mem::take(&mut self.pending)
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Move `ship` into `fleet`, detaching it from any previous fleet.
    ///
    /// The ship takes the fleet's position and system.
    ///
    /// # Errors
    ///
    /// [`CoreError::FleetNotFound`] / [`CoreError::ShipNotFound`].
    pub fn add_ship(&mut self, fleet: FleetId, ship: ShipId) -> CoreResult<()> {
        self.add_ships(fleet, &[ship])
    }

    /// Move several ships into `fleet`.  All ids are checked before anything
    /// changes.
    pub fn add_ships(&mut self, fleet: FleetId, ships: &[ShipId]) -> CoreResult<()> {
        self.fleet(fleet)?;
        for &sid in ships {
            self.ship(sid)?;
        }
        for &sid in ships {
            self.attach(fleet, sid)?;
        }
        self.recalculate_speed(fleet)?;
        self.notify_changed(fleet);
        tracing::debug!(fleet = %fleet, added = ships.len(), "ships joined fleet");
        Ok(())
    }

    fn attach(&mut self, fleet: FleetId, ship: ShipId) -> CoreResult<()> {
        let (position, system) = {
            let f = self.fleet(fleet)?;
            (f.position, f.system)
        };

        if let Some(old) = self.ship(ship)?.fleet.filter(|&old| old != fleet) {
            if let Some(old_fleet) = self.fleets.get_mut(&old)
                && old_fleet.ships_mut().remove(&ship)
            {
                self.recalculate_speed(old)?;
                self.notify_changed(old);
            }
        }

        let s = self.ships.get_mut(&ship).ok_or(CoreError::ShipNotFound(ship))?;
        if let Some(prev) = s.system {
            self.occupancy.remove(prev, ObjectRef::Ship(ship));
        }
        s.fleet    = Some(fleet);
        s.position = position;
        s.system   = system;
        if let Some(sys) = system {
            self.occupancy.insert(sys, ObjectRef::Ship(ship));
        }

        self.fleet_mut(fleet)?.ships_mut().insert(ship);
        Ok(())
    }

    /// Remove `ship` from `fleet`.  Returns `false` (and changes nothing) if
    /// it was not a member.  The ship object stays where it is.
    pub fn remove_ship(&mut self, fleet: FleetId, ship: ShipId) -> CoreResult<bool> {
        if !self.fleet_mut(fleet)?.ships_mut().remove(&ship) {
            return Ok(false);
        }
        if let Some(s) = self.ships.get_mut(&ship) {
            s.fleet = None;
        }
        self.recalculate_speed(fleet)?;
        self.notify_changed(fleet);
        Ok(true)
    }

    /// Remove several ships.  Returns the ids that were not members.
    pub fn remove_ships(&mut self, fleet: FleetId, ships: &[ShipId]) -> CoreResult<Vec<ShipId>> {
        let mut missing = Vec::new();
        for &sid in ships {
            if self.fleet_mut(fleet)?.ships_mut().remove(&sid) {
                if let Some(s) = self.ships.get_mut(&sid) {
                    s.fleet = None;
                }
            } else {
                missing.push(sid);
            }
        }
        self.recalculate_speed(fleet)?;
        self.notify_changed(fleet);
        Ok(missing)
    }

    /// Remove member ships from `fleet` and destroy them.  Returns the ids
    /// that were not members (those ships are left untouched).
    pub fn delete_ships(&mut self, fleet: FleetId, ships: &[ShipId]) -> CoreResult<Vec<ShipId>> {
        let mut missing = Vec::new();
        for &sid in ships {
            if self.fleet_mut(fleet)?.ships_mut().remove(&sid) {
                self.delete_ship_object(sid);
            } else {
                missing.push(sid);
            }
        }
        self.recalculate_speed(fleet)?;
        self.notify_changed(fleet);
        tracing::debug!(fleet = %fleet, destroyed = ships.len() - missing.len(), "ships destroyed");
        Ok(missing)
    }

    fn delete_ship_object(&mut self, id: ShipId) {
        if let Some(ship) = self.ships.remove(&id)
            && let Some(s) = ship.system
        {
            self.occupancy.remove(s, ObjectRef::Ship(id));
        }
    }

    /// Destroy a fleet.  Its ships survive as free-standing ships.
    pub fn remove_fleet(&mut self, id: FleetId) -> CoreResult<Fleet> {
        let fleet = self.fleets.remove(&id).ok_or(CoreError::FleetNotFound(id))?;
        if let Some(s) = fleet.system {
            self.occupancy.remove(s, ObjectRef::Fleet(id));
        }
        for sid in fleet.ship_ids() {
            if let Some(ship) = self.ships.get_mut(sid) {
                ship.fleet = None;
            }
        }
        Ok(fleet)
    }

    // ── Movement primitives ───────────────────────────────────────────────
    //
    // Each applies to the fleet and every member ship together.

    /// Mark every route cache stale (start of turn).
    pub fn invalidate_routes(&mut self) {
        for fleet in self.fleets.values_mut() {
            fleet.route.invalidate();
        }
    }

    pub fn move_fleet_to(&mut self, id: FleetId, position: Point) -> CoreResult<()> {
        let fleet = self.fleets.get_mut(&id).ok_or(CoreError::FleetNotFound(id))?;
        fleet.position = position;
        for sid in fleet.ship_ids() {
            self.ships.get_mut(sid).ok_or(CoreError::ShipNotFound(*sid))?.position = position;
        }
        Ok(())
    }

    /// Take the fleet out of its current system (departure).
    pub fn leave_system(&mut self, id: FleetId) -> CoreResult<()> {
        let fleet = self.fleets.get_mut(&id).ok_or(CoreError::FleetNotFound(id))?;
        let Some(system) = fleet.system.take() else {
            return Ok(());
        };
        self.occupancy.remove(system, ObjectRef::Fleet(id));
        for sid in fleet.ship_ids() {
            let ship = self.ships.get_mut(sid).ok_or(CoreError::ShipNotFound(*sid))?;
            ship.system = None;
            self.occupancy.remove(system, ObjectRef::Ship(*sid));
        }
        Ok(())
    }

    /// Put the fleet into `system`.  Position is left to the caller.
    pub fn enter_system(&mut self, id: FleetId, system: SystemId) -> CoreResult<()> {
        let fleet = self.fleets.get_mut(&id).ok_or(CoreError::FleetNotFound(id))?;
        if let Some(old) = fleet.system.replace(system) {
            self.occupancy.remove(old, ObjectRef::Fleet(id));
        }
        self.occupancy.insert(system, ObjectRef::Fleet(id));
        for sid in fleet.ship_ids() {
            let ship = self.ships.get_mut(sid).ok_or(CoreError::ShipNotFound(*sid))?;
            if let Some(old) = ship.system.replace(system) {
                self.occupancy.remove(old, ObjectRef::Ship(*sid));
            }
            self.occupancy.insert(system, ObjectRef::Ship(*sid));
        }
        Ok(())
    }

    /// Subtract `amount` fuel from every member ship.
    pub fn deduct_fuel(&mut self, id: FleetId, amount: f64) -> CoreResult<()> {
        let fleet = self.fleets.get(&id).ok_or(CoreError::FleetNotFound(id))?;
        for sid in fleet.ship_ids() {
            self.ships.get_mut(sid).ok_or(CoreError::ShipNotFound(*sid))?.fuel.adjust(-amount);
        }
        Ok(())
    }

    /// Refill every member ship's fuel to its maximum.
    pub fn refuel(&mut self, id: FleetId) -> CoreResult<()> {
        let fleet = self.fleets.get(&id).ok_or(CoreError::FleetNotFound(id))?;
        for sid in fleet.ship_ids() {
            self.ships.get_mut(sid).ok_or(CoreError::ShipNotFound(*sid))?.fuel.refill();
        }
        Ok(())
    }
}
