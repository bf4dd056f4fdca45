//! Invariant-violation error type.
//!
//! `CoreError` variants mean the shared world state is inconsistent: a fleet
//! references a ship that no longer exists, a route names a system that is
//! not in the graph, and so on.  They are never the caller's fault and are
//! kept separate from the usage errors that `fm-movement` reports.

use thiserror::Error;

use crate::{FleetId, ShipId, SystemId};

/// Errors signalling corrupted shared state or invalid configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("fleet {0} not found")]
    FleetNotFound(FleetId),

    #[error("ship {0} not found")]
    ShipNotFound(ShipId),

    #[error("system {0} not found")]
    SystemNotFound(SystemId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `fm-core` and the crates that reuse `CoreError`.
pub type CoreResult<T> = Result<T, CoreError>;
