use thiserror::Error;

/// Why a floor request was not queued.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RequestRejection {
    #[error("floor {0} is outside the building")]
    OutOfRange(i32),

    #[error("floor {0} is already queued")]
    AlreadyQueued(i32),
}
