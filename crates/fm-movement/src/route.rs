//! Route calculation and move orders.
//!
//! # Where a route starts
//!
//! A fleet sitting at a system routes from that system, and the route's first
//! entry is the system itself.  A fleet in transit must finish its current
//! leg, so it routes from `next_system` and the in-flight distance to that
//! system is added to the route length.
//!
//! # Caching
//!
//! [`compute_route`] and [`current_route`] are pure.  [`ensure_route`] is the
//! one place that writes a computed route into a fleet's
//! [`RouteCache`](fm_fleet::RouteCache).

use fm_core::{CoreError, EmpireId, FleetId, SystemId};
use fm_fleet::{Fleet, FleetStore, TravelRoute};
use fm_galaxy::{Path, StarGraph};

use crate::context::REVERSAL_POLICY;
use crate::{MovementContext, MovementError, MovementResult, ReversalPolicy};

// ── RouteCalculator ───────────────────────────────────────────────────────────

/// Compute the route from the fleet's logical position to its destination
/// and the total distance along it.
///
/// Routing uses the primary owner's knowledge; unowned fleets route with full
/// knowledge.  A fleet already at its destination gets an empty route.
///
/// # Errors
///
/// - [`MovementError::NoDestination`] if the fleet has no destination.
/// - [`MovementError::Stranded`] if the fleet is in transit without a next
///   system.
/// - [`MovementError::Routing`] if the destination cannot be reached.
pub fn compute_route(fleet: &Fleet, ctx: &MovementContext<'_>) -> MovementResult<(TravelRoute, f64)> {
    compute_route_with(fleet, ctx, REVERSAL_POLICY)
}

pub(crate) fn compute_route_with(
    fleet:  &Fleet,
    ctx:    &MovementContext<'_>,
    policy: ReversalPolicy,
) -> MovementResult<(TravelRoute, f64)> {
    let destination = fleet.destination.ok_or(MovementError::NoDestination(fleet.id))?;
    let observer = fleet.primary_owner();

    if let Some(here) = fleet.system {
        if here == destination {
            return Ok((TravelRoute::Empty, 0.0));
        }
        let path = shortest(ctx, here, destination, observer)?;
        return Ok((TravelRoute::from_systems(path.systems), path.length));
    }

    let next = fleet.next_system.ok_or(MovementError::Stranded(fleet.id))?;
    let forward = candidate(fleet, ctx, next, destination, observer);

    let best = match (policy, fleet.prev_system) {
        (ReversalPolicy::Allowed, Some(prev)) => {
            let backward = candidate(fleet, ctx, prev, destination, observer);
            match (forward, backward) {
                (Ok(f), Ok(b)) => if b.1 < f.1 { b } else { f },
                (Ok(f), Err(_)) => f,
                (Err(_), Ok(b)) => b,
                (Err(e), Err(_)) => return Err(e),
            }
        }
        _ => forward?,
    };
    Ok((TravelRoute::from_systems(best.0), best.1))
}

/// Path starting at `start`, with the in-flight distance to `start` added.
fn candidate(
    fleet:       &Fleet,
    ctx:         &MovementContext<'_>,
    start:       SystemId,
    destination: SystemId,
    observer:    Option<EmpireId>,
) -> MovementResult<(Vec<SystemId>, f64)> {
    let path = shortest(ctx, start, destination, observer)?;
    let in_flight = fleet.position.distance(ctx.graph.position(start)?);
    Ok((path.systems, in_flight + path.length))
}

fn shortest(
    ctx:         &MovementContext<'_>,
    from:        SystemId,
    to:          SystemId,
    observer:    Option<EmpireId>,
) -> MovementResult<Path> {
    Ok(ctx.router.shortest_path(ctx.graph, ctx.knowledge, from, to, observer)?)
}

/// The fleet's route: the cached one when fresh, otherwise a newly computed
/// value.  Never writes to the cache.
pub fn current_route(fleet: &Fleet, ctx: &MovementContext<'_>) -> MovementResult<TravelRoute> {
    if !needs_route(fleet) {
        return Ok(fleet.travel_route().clone());
    }
    Ok(compute_route(fleet, ctx)?.0)
}

fn needs_route(fleet: &Fleet) -> bool {
    fleet.destination.is_some() && (fleet.route.is_stale() || fleet.travel_route().is_empty())
}

/// Fill the fleet's route cache if it is stale or empty while a destination
/// is set.
pub fn ensure_route(store: &mut FleetStore, id: FleetId, ctx: &MovementContext<'_>) -> MovementResult<()> {
    let fleet = store.fleet(id)?;
    if fleet.destination.is_none() {
        if fleet.route.is_stale() {
            store.fleet_mut(id)?.route.clear();
        }
        return Ok(());
    }
    if !needs_route(fleet) {
        return Ok(());
    }
    let (route, distance) = compute_route(fleet, ctx)?;
    tracing::debug!(fleet = %id, hops = route.len(), distance, "route computed");
    store.fleet_mut(id)?.route.set(route, distance);
    Ok(())
}

// ── Orders ────────────────────────────────────────────────────────────────────

/// Give the fleet a new route of `distance` length.
///
/// A route ending at the system the fleet currently occupies is a stop
/// order: destination, previous/next system, and route are cleared.
/// Otherwise the destination becomes the route's last system, the in-flight
/// distance to the route's first system is added when the fleet is not
/// already there, and `next_system` becomes the first system on the route
/// the fleet has not reached.
///
/// # Errors
///
/// - [`MovementError::EmptyRoute`] for an empty `route`.
/// - [`MovementError::UnknownRoute`] if the fleet's current route is the
///   unknown marker.
/// - [`MovementError::DirectionReversal`] if the fleet is in transit and the
///   route starts at the system it just left.
pub fn set_route(
    store:    &mut FleetStore,
    id:       FleetId,
    route:    Vec<SystemId>,
    distance: f64,
    graph:    &StarGraph,
) -> MovementResult<()> {
    set_route_with(store, id, route, distance, graph, REVERSAL_POLICY)
}

pub(crate) fn set_route_with(
    store:    &mut FleetStore,
    id:       FleetId,
    route:    Vec<SystemId>,
    distance: f64,
    graph:    &StarGraph,
    policy:   ReversalPolicy,
) -> MovementResult<()> {
    let fleet = store.fleet(id)?;
    let (Some(&front), Some(&back)) = (route.first(), route.last()) else {
        return Err(MovementError::EmptyRoute(id));
    };
    if fleet.unknown_route() {
        return Err(MovementError::UnknownRoute(id));
    }
    let reversing = fleet.prev_system.is_some()
        && fleet.prev_system != fleet.system
        && fleet.prev_system == Some(front);
    if reversing && policy == ReversalPolicy::Forbidden {
        return Err(MovementError::DirectionReversal { fleet: id, toward: front });
    }
    if let Some(&missing) = route.iter().find(|s| !graph.contains(**s)) {
        return Err(CoreError::SystemNotFound(missing).into());
    }
    let in_flight = if fleet.system == Some(front) {
        0.0
    } else {
        fleet.position.distance(graph.position(front)?)
    };

    let fleet = store.fleet_mut(id)?;
    if fleet.system.is_some() && fleet.system == Some(back) {
        fleet.clear_movement();
        tracing::debug!(fleet = %id, "stop order");
    } else {
        fleet.destination = Some(back);
        if reversing {
            fleet.prev_system = fleet.next_system;
        } else if let Some(here) = fleet.system {
            fleet.prev_system = Some(here);
        }
        fleet.next_system = if fleet.system == Some(front) {
            route.get(1).copied()
        } else {
            Some(front)
        };
        fleet.route.set(TravelRoute::from_systems(route), distance + in_flight);
        tracing::debug!(
            fleet = %id,
            destination = %back,
            distance = fleet.route.distance(),
            "route set"
        );
    }
    store.notify_changed(id);
    Ok(())
}

/// Order the fleet to `destination` along the shortest route its primary
/// owner knows.
///
/// A fleet in transit routes from its next system.
pub fn order_move(
    store:       &mut FleetStore,
    id:          FleetId,
    destination: SystemId,
    ctx:         &MovementContext<'_>,
) -> MovementResult<()> {
    let fleet = store.fleet(id)?;
    let start = match fleet.system {
        Some(here) => here,
        None => fleet.next_system.ok_or(MovementError::Stranded(id))?,
    };
    let path = shortest(ctx, start, destination, fleet.primary_owner())?;
    set_route(store, id, path.systems, path.length, ctx.graph)?;
    tracing::info!(fleet = %id, destination = %destination, "move order accepted");
    Ok(())
}
