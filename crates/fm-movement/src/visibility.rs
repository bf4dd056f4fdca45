//! Redacting routes for observers with partial knowledge.

use fm_core::{EmpireId, SystemId};
use fm_fleet::{Fleet, TravelRoute};
use fm_galaxy::Knowledge;

use crate::{MovementError, MovementResult};

/// The part of the fleet's cached route that `observer` may see.
///
/// See [`trim`].
pub fn trim_route(
    fleet:                &Fleet,
    apparent_destination: Option<SystemId>,
    observer:             Option<EmpireId>,
    knowledge:            &Knowledge,
) -> MovementResult<TravelRoute> {
    trim(fleet.travel_route(), apparent_destination, observer, knowledge)
}

/// Keep the leading systems of `route` that are reachable for `observer`,
/// stopping before the first unreachable one or after
/// `apparent_destination` (a closer stand-in for a destination hidden by fog
/// of war).
///
/// A non-empty route with no visible prefix becomes [`TravelRoute::Unknown`],
/// never `Empty`.
///
/// # Errors
///
/// [`MovementError::ApparentDestinationOffRoute`] if `apparent_destination`
/// is not on the route.
pub fn trim(
    route:                &TravelRoute,
    apparent_destination: Option<SystemId>,
    observer:             Option<EmpireId>,
    knowledge:            &Knowledge,
) -> MovementResult<TravelRoute> {
    let systems = match route {
        TravelRoute::Empty => return Ok(TravelRoute::Empty),
        TravelRoute::Unknown => return Ok(TravelRoute::Unknown),
        TravelRoute::Systems(s) => s,
    };
    if let Some(apparent) = apparent_destination
        && !systems.contains(&apparent)
    {
        return Err(MovementError::ApparentDestinationOffRoute(apparent));
    }

    let mut visible = Vec::new();
    for &system in systems {
        if !knowledge.is_reachable(system, observer) {
            break;
        }
        visible.push(system);
        if Some(system) == apparent_destination {
            break;
        }
    }

    Ok(if visible.is_empty() && !systems.is_empty() {
        TravelRoute::Unknown
    } else {
        TravelRoute::from_systems(visible)
    })
}
