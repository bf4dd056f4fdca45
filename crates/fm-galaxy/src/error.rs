//! Galaxy-subsystem error type.

use thiserror::Error;

use fm_core::SystemId;

/// Errors produced by `fm-galaxy`.
#[derive(Debug, Error)]
pub enum GalaxyError {
    #[error("no known route from {from} to {to}")]
    NoRoute { from: SystemId, to: SystemId },

    #[error("system {0} not found in galaxy")]
    SystemNotFound(SystemId),
}

pub type GalaxyResult<T> = Result<T, GalaxyError>;
