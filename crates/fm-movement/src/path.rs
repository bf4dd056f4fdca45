//! Multi-turn path forecast.
//!
//! [`move_path`] simulates the fleet's movement along a route turn by turn
//! without touching the fleet, emitting a waypoint for every system reached
//! and every turn boundary.  The loop mirrors
//! [`advance_one_turn`](crate::advance_one_turn):
//!
//! - departing a system costs `fuel_per_jump`;
//! - a fleet at a system without enough fuel stops for the turn and, if it
//!   started the turn there, refuels when the system is supplied or gives up
//!   with [`Eta::OutOfRange`];
//! - each turn covers at most `speed` distance, and a turn whose remaining
//!   budget falls under `epsilon` ends.
//!
//! The simulation stops after `horizon_turns` turns and reports the turn count
//! reached as the final ETA.

use fm_core::{FleetId, Point, SystemId};
use fm_fleet::{FleetStore, TravelRoute};

use crate::{Eta, MovePathNode, MovementContext, MovementResult};

/// Forecast the fleet's movement along `route`.
///
/// Returns an empty path when there is nowhere to go (empty or unknown route,
/// a two-system route whose ends coincide, or a route that only contains the
/// fleet's current system).  A fleet that cannot move yields a single
/// waypoint with [`Eta::Never`] (no speed) or [`Eta::OutOfRange`] (no fuel
/// and no resupply where it sits).
pub fn move_path(
    store: &FleetStore,
    id:    FleetId,
    route: &TravelRoute,
    ctx:   &MovementContext<'_>,
) -> MovementResult<Vec<MovePathNode>> {
    let rules = ctx.rules;
    let fleet = store.fleet(id)?;

    let systems = route.systems();
    if systems.is_empty() || (systems.len() == 2 && systems[0] == systems[1]) {
        return Ok(Vec::new());
    }

    let speed = fleet.speed();
    let stationary = |eta| {
        vec![MovePathNode { position: fleet.position, turn_end: true, eta, system: fleet.system }]
    };
    if speed < rules.epsilon {
        return Ok(stationary(Eta::Never));
    }

    let mut fuel = store.fuel(id)?;
    let max_fuel = store.max_fuel(id)?;
    let supplied = |s: SystemId| ctx.knowledge.is_supplied(s, &fleet.owners);

    if fuel < rules.fuel_per_jump && fleet.system.is_some_and(|s| !supplied(s)) {
        return Ok(stationary(Eta::OutOfRange));
    }

    // A fleet sitting at a system pays to leave it, whether or not the route
    // still lists it first (a turn that ended on a waypoint leaves it popped).
    let mut remaining = systems.iter().copied().peekable();
    let mut cur_system = fleet.system;
    if cur_system.is_some() && remaining.peek().copied() == cur_system {
        remaining.next();
    }
    let Some(mut next) = remaining.next() else {
        return Ok(Vec::new());
    };

    let mut position: Point = fleet.position;
    let mut next_pos = ctx.graph.position(next)?;
    let mut dist_to_next = position.distance(next_pos);
    let mut budget = speed;
    let mut new_turn = true;
    let mut turns: u32 = 0;
    let mut out_of_range = false;
    let mut arrived = false;
    let mut path = Vec::new();

    while turns <= rules.horizon_turns {
        let eta = Eta::Turns(turns);
        let turn_end = new_turn;

        if dist_to_next < rules.epsilon {
            // Reached `next`.
            cur_system = Some(next);
            position = next_pos;
            match remaining.next() {
                None => {
                    path.push(MovePathNode { position, turn_end: true, eta, system: Some(next) });
                    arrived = true;
                    break;
                }
                Some(following) => {
                    path.push(MovePathNode { position, turn_end, eta, system: Some(next) });
                    next = following;
                    next_pos = ctx.graph.position(next)?;
                    dist_to_next = position.distance(next_pos);
                }
            }
        } else {
            path.push(MovePathNode { position, turn_end, eta, system: cur_system });
        }

        if new_turn {
            turns += 1;
            budget = speed;
        }

        if let Some(here) = cur_system {
            if fuel >= rules.fuel_per_jump {
                fuel -= rules.fuel_per_jump;
                new_turn = false;
            } else {
                budget = 0.0;
                // Only a full turn spent at the system earns a refill.
                if new_turn {
                    if supplied(here) {
                        fuel = max_fuel;
                    } else {
                        out_of_range = true;
                        break;
                    }
                }
            }
        }

        if budget >= rules.epsilon {
            let step = budget.min(dist_to_next);
            position = position.step_toward(next_pos, dist_to_next, step);
            budget -= step;
            dist_to_next -= step;
            if step >= rules.epsilon && dist_to_next >= rules.epsilon {
                cur_system = None;
            }
        }

        if budget < rules.epsilon {
            budget = 0.0;
            new_turn = true;
        } else {
            new_turn = false;
        }
    }

    if out_of_range {
        path.push(MovePathNode { position, turn_end: true, eta: Eta::OutOfRange, system: cur_system });
    } else if !arrived {
        path.push(MovePathNode { position, turn_end: true, eta: Eta::Turns(turns), system: cur_system });
    }
    Ok(path)
}
