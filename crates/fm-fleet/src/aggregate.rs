//! Fleet-wide fuel and speed, aggregated over member ships.
//!
//! A fleet is only as fast as its slowest ship and can only make as many
//! jumps as its emptiest tank allows, so every aggregate is a minimum.  An
//! empty fleet aggregates to 0.

use std::collections::BTreeMap;

use fm_core::{CoreError, CoreResult, ShipId};

use crate::{Fleet, Ship};

/// Ship storage keyed by id.
pub type ShipMap = BTreeMap<ShipId, Ship>;

/// Minimum of `f` over the fleet's members, starting from `ceiling`.
///
/// # Errors
///
/// [`CoreError::ShipNotFound`] if a member id has no ship.
fn min_over_members(
    fleet:   &Fleet,
    ships:   &ShipMap,
    ceiling: f64,
    f:       impl Fn(&Ship) -> f64,
) -> CoreResult<f64> {
    if fleet.num_ships() == 0 {
        return Ok(0.0);
    }
    fleet.ship_ids().iter().try_fold(ceiling, |acc, id| {
        let ship = ships.get(id).ok_or(CoreError::ShipNotFound(*id))?;
        Ok(acc.min(f(ship)))
    })
}

/// Current fuel of the fleet: the lowest current fuel among its ships.
pub fn fleet_fuel(fleet: &Fleet, ships: &ShipMap) -> CoreResult<f64> {
    min_over_members(fleet, ships, f64::MAX, |s| s.fuel.current())
}

/// Fuel capacity of the fleet: the lowest fuel capacity among its ships.
pub fn fleet_max_fuel(fleet: &Fleet, ships: &ShipMap) -> CoreResult<f64> {
    min_over_members(fleet, ships, f64::MAX, |s| s.fuel.max())
}

/// Speed of the fleet: the lowest ship speed, capped at `max_ship_speed`.
pub fn fleet_speed(fleet: &Fleet, ships: &ShipMap, max_ship_speed: f64) -> CoreResult<f64> {
    min_over_members(fleet, ships, max_ship_speed, |s| s.speed)
}
