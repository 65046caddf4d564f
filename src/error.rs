/*
 * Error Module
 *
 * The engine has no I/O, so the only failures are structural: a malformed
 * configuration, or a worker pool that could not be started.
 */

use thiserror::Error;

/// Errors raised while building a simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Indicates an invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// The dedicated worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
