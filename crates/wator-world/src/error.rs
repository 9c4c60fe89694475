//! Configuration error types.

use thiserror::Error;

/// Rejected simulation configuration. Always fatal: no world is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Grid width or height is zero.
    #[error("grid must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: usize, height: usize },

    /// A breed or starve timer is zero.
    #[error("{name} must be a positive number of ticks")]
    ZeroTimer { name: &'static str },

    /// No workers requested.
    #[error("worker count must be at least 1")]
    ZeroWorkers,

    /// Initial fish and sharks do not fit on the grid.
    #[error("{requested} initial agents do not fit on a grid of {capacity} cells")]
    Overpopulated { requested: usize, capacity: usize },

    /// An environment override could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;
