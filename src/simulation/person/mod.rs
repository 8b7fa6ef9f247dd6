//! Person system - individual members of the simulated society
//!
//! Every person is fully initialized at creation: demographics are sampled,
//! wealth and wage come from the economy initializer, and the criminal record
//! starts clean.

pub mod demographics;
pub mod types;

pub use demographics::{muscle_mass_at_age, sample_age, sample_height, sample_muscle_mass, sample_weight};
pub use types::Person;
