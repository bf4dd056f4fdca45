//! Per-fleet movement forecast.

use fm_core::FleetId;
use fm_fleet::TravelRoute;
use fm_movement::{Eta, MovePathNode};

/// What a fleet is expected to do from the current state of the galaxy.
///
/// Produced by [`Sim::forecast`](crate::Sim::forecast).  Computing one never
/// changes the fleet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forecast {
    pub fleet:    FleetId,
    /// The route the fleet would follow this turn.
    pub route:    TravelRoute,
    /// Turn-by-turn waypoints along `route`.
    pub path:     Vec<MovePathNode>,
    /// Arrival at the final destination.
    pub eta:      Eta,
    /// Arrival at the next system on the way.
    pub next_eta: Eta,
}

impl Forecast {
    /// `true` if the forecast reaches the destination within the horizon.
    pub fn arrives(&self) -> bool {
        self.path.last().is_some_and(|n| n.system.is_some() && n.system == self.route.last())
            && self.eta.turns().is_some()
    }
}
