// src/lib.rs

pub mod config;
pub mod energy;
pub mod error;
pub mod finite_diff;
pub mod grid;
pub mod initial_states;
pub mod output;
pub mod params;
pub mod recorder;
pub mod scalar_field;
pub mod simulation;
pub mod stepper;
pub mod visualisation;

pub use error::{Result, SimError};
