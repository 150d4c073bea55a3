//! Framework error type.
//!
//! Sub-crates define their own error enums and convert `LiftError` into them
//! via `From` impls where a core failure can surface.

use thiserror::Error;

/// The top-level error type for `lift-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error("floor {0} is outside the building")]
    FloorOutOfRange(i32),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `lift-*` crates.
pub type LiftResult<T> = Result<T, LiftError>;
