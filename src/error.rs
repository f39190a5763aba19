// src/error.rs
//
// Crate-level error type for wave-sim.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("shape mismatch ({context}): expected {expected} values, found {found}")]
    ShapeMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("time step must be positive and finite, got dt={0}")]
    InvalidTimeStep(f64),

    #[error("snapshot stride must be at least 1")]
    InvalidStride,

    #[error("unstable time step: CFL estimate {cfl:.3} exceeds limit {limit:.3}")]
    Unstable { cfl: f64, limit: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("plotting failed: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, SimError>;
