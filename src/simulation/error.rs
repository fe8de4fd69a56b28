//! Error types for simulator control.

use crate::order_actor::OrderError;
use thiserror::Error;

/// Errors that can occur while controlling the movement simulator.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Movement simulation is already running")]
    AlreadyRunning,

    #[error("Movement simulation is not running")]
    NotRunning,

    #[error("Interval must be between 1000ms and 30000ms, got {0}ms")]
    InvalidInterval(u64),

    #[error("Step size must be between 0.001 and 0.1, got {0}")]
    InvalidStepSize(f64),

    /// An order-side failure surfaced through force-progress or status.
    #[error(transparent)]
    Order(#[from] OrderError),
}
