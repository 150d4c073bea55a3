use lift_core::{CarId, LiftError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("car {0} is registered twice")]
    DuplicateCar(CarId),

    #[error(transparent)]
    Core(#[from] LiftError),
}

pub type SimResult<T> = Result<T, SimError>;
