//! Error types for the Talos core

use thiserror::Error;

/// Errors raised by the navigation core
#[derive(Debug, Error)]
pub enum NavError {
    /// The robot position coincides with an obstacle, so the reciprocal
    /// repulsive term is undefined. The run must be aborted; a degenerate
    /// geometry will not resolve itself without caller intervention.
    #[error("robot coincides with obstacle {index} (separation {distance:.3e}), repulsive force undefined")]
    DegenerateDistance { index: usize, distance: f64 },

    /// A parameter was rejected at configuration time
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
