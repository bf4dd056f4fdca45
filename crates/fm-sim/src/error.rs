use fm_core::CoreError;
use fm_movement::MovementError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("movement error: {0}")]
    Movement(#[from] MovementError),

    #[error("invariant violation: {0}")]
    Invariant(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
