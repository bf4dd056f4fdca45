use fm_core::{CoreError, FleetId, SystemId};
use fm_galaxy::GalaxyError;
use thiserror::Error;

/// Errors from movement operations.
///
/// The first group are usage errors: the order was rejected and the fleet is
/// unchanged.  `Routing` means the router could not connect the requested
/// systems.  `Invariant` and `Stranded` mean the shared world state is
/// corrupt.
///
/// Infeasible movement (out of fuel, zero speed, beyond the forecast horizon)
/// is not an error; see [`Eta`](crate::Eta).
#[derive(Debug, Error)]
pub enum MovementError {
    #[error("fleet {0}: cannot set an empty route")]
    EmptyRoute(FleetId),

    #[error("fleet {0}: current route is unknown and cannot be replaced")]
    UnknownRoute(FleetId),

    #[error("fleet {fleet}: cannot reverse toward {toward} while in transit")]
    DirectionReversal {
        fleet:  FleetId,
        toward: SystemId,
    },

    #[error("apparent destination {0} is not on the route")]
    ApparentDestinationOffRoute(SystemId),

    #[error("fleet {0} has no destination")]
    NoDestination(FleetId),

    #[error("fleet {0} is in transit with no next system")]
    Stranded(FleetId),

    #[error("routing failed: {0}")]
    Routing(#[from] GalaxyError),

    #[error("invariant violation: {0}")]
    Invariant(#[from] CoreError),
}

impl MovementError {
    /// `true` for rejected orders caused by the caller rather than by
    /// corrupted state.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::EmptyRoute(_)
                | Self::UnknownRoute(_)
                | Self::DirectionReversal { .. }
                | Self::ApparentDestinationOffRoute(_)
                | Self::NoDestination(_)
        )
    }
}

pub type MovementResult<T> = Result<T, MovementError>;
