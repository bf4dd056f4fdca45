//! Authoritative per-turn movement.

use fm_core::{EmpireId, FleetId, SystemId};
use fm_fleet::FleetStore;

use crate::route::ensure_route;
use crate::{MovementContext, MovementResult};

/// Something that happened to a fleet and must be applied to shared state
/// after the movement phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementEvent {
    /// `empire`'s fleet arrived at `system` as its final destination.
    Explored { empire: EmpireId, system: SystemId },
}

/// What one call to [`advance_one_turn`] did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovementOutcome {
    /// Distance covered this turn.
    pub distance:   f64,
    /// Departures from a system (each cost `fuel_per_jump`).
    pub jumps:      u32,
    /// The fleet held position and refuelled.
    pub resupplied: bool,
    /// Systems reached this turn, in order.
    pub reached:    Vec<SystemId>,
    /// Set when the fleet reached its final destination.
    pub arrived:    Option<SystemId>,
    pub events:     Vec<MovementEvent>,
}

impl MovementOutcome {
    pub fn moved(&self) -> bool {
        self.distance > 0.0
    }
}

/// Advance one fleet by one turn.
///
/// 1. A fleet at a system with too little fuel to jump, or with no
///    destination, refuels there if any owner supplies the system, and does
///    not move.
/// 2. A fleet with no destination does nothing else.
/// 3. The route is recomputed if needed and the current system dropped from
///    its front.
/// 4. While the turn's budget exceeds `epsilon`: departing a system deducts
///    `fuel_per_jump` from every ship (or ends the turn if the fleet cannot
///    afford it); a system within the remaining budget is reached and
///    entered; otherwise the fleet moves partway and the turn ends.
///
/// Reaching the final destination clears the move order and reports
/// [`MovementEvent::Explored`] for the primary owner.  A fleet that moved,
/// refuelled or dropped a fulfilled order is queued as changed.
///
/// # Errors
///
/// Routing failures while refreshing the route, and invariant violations.
pub fn advance_one_turn(
    store: &mut FleetStore,
    id:    FleetId,
    ctx:   &MovementContext<'_>,
) -> MovementResult<MovementOutcome> {
    let rules = ctx.rules;
    let mut outcome = MovementOutcome::default();

    let mut fuel = store.fuel(id)?;
    let fleet = store.fleet(id)?;

    if let Some(here) = fleet.system
        && (fuel < rules.fuel_per_jump || fleet.destination.is_none())
    {
        if ctx.knowledge.is_supplied(here, &fleet.owners) {
            store.refuel(id)?;
            store.notify_changed(id);
            outcome.resupplied = true;
            tracing::debug!(fleet = %id, system = %here, "resupplied");
        }
        return Ok(outcome);
    }
    if fleet.destination.is_none() {
        return Ok(outcome);
    }

    ensure_route(store, id, ctx)?;
    {
        let fleet = store.fleet_mut(id)?;
        if fleet.system.is_some() && fleet.route.front() == fleet.system {
            fleet.route.pop_front();
        }
        if fleet.route.front().is_none() {
            // Nothing left to travel; the order is already fulfilled.
            fleet.clear_movement();
            store.notify_changed(id);
            return Ok(outcome);
        }
    }

    let mut budget = store.fleet(id)?.speed();
    while budget > rules.epsilon {
        let fleet = store.fleet(id)?;
        let Some(next) = fleet.route.front() else {
            break;
        };
        let next_pos = ctx.graph.position(next)?;
        let distance = fleet.position.distance(next_pos);

        if fleet.system.is_some() {
            if fuel < rules.fuel_per_jump {
                break;
            }
            fuel -= rules.fuel_per_jump;
            store.deduct_fuel(id, rules.fuel_per_jump)?;
            store.leave_system(id)?;
            outcome.jumps += 1;
        }

        if distance <= budget {
            budget -= distance;
            outcome.distance += distance;
            outcome.reached.push(next);
            store.move_fleet_to(id, next_pos)?;
            store.enter_system(id, next)?;

            let fleet = store.fleet_mut(id)?;
            fleet.route.pop_front();
            fleet.route.consume(distance);

            if fleet.route.front().is_none() {
                fleet.clear_movement();
                outcome.arrived = Some(next);
                if let Some(empire) = fleet.primary_owner() {
                    outcome.events.push(MovementEvent::Explored { empire, system: next });
                }
                tracing::info!(fleet = %id, system = %next, "fleet arrived");
                break;
            }
            fleet.prev_system = Some(next);
            fleet.next_system = fleet.route.front();
            tracing::debug!(fleet = %id, system = %next, "passed system");
        } else {
            let fleet = store.fleet(id)?;
            let target = fleet.position.step_toward(next_pos, distance, budget);
            store.move_fleet_to(id, target)?;
            store.fleet_mut(id)?.route.consume(budget);
            outcome.distance += budget;
            budget = 0.0;
        }
    }

    if outcome.moved() || outcome.jumps > 0 {
        store.notify_changed(id);
    }
    Ok(outcome)
}
