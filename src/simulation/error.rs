//! Error taxonomy for the simulation core

use thiserror::Error;

use crate::simulation::types::PersonId;

/// Errors that can occur while configuring or stepping the simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Rejected parameters, e.g. an unrecognized wage mode
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A composed probability or weight set is malformed; indicates a formula defect
    #[error("logic error in {context}: value {value} is not a valid probability")]
    Logic { context: &'static str, value: f64 },

    #[error("unknown person {0}")]
    UnknownPerson(PersonId),

    #[error("export failed: {0}")]
    Export(String),
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Reject a probability outside [0, 1] (NaN included) instead of clamping it.
pub fn check_probability(context: &'static str, value: f64) -> Result<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(SimulationError::Logic { context, value })
    }
}
