//! Tick engine error types.

use thiserror::Error;
use wator_world::ConfigError;

/// Failure to set up a simulation. Ticks themselves cannot fail.
#[derive(Debug, Error)]
pub enum TickError {
    /// The configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The worker pool could not be started.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type for tick engine setup.
pub type TickResult<T> = Result<T, TickError>;
