//! Crime Society Simulation System
//!
//! A monthly-tick simulation of a synthetic city in which individual economic
//! life drives petty crime, and petty criminals bond into organized networks.
//!
//! # Module Structure
//!
//! - `types`: Core type definitions (PersonId, SimTick, CriminalStatus, etc.)
//! - `params`: Simulation configuration parameters
//! - `error`: Error type shared by every fallible operation
//! - `sampling`: Weighted choice and logistic helpers
//! - `culture`: Nationalities, languages and cultural affinity
//! - `person`: Person state and demographic sampling
//! - `population`: Registry of people by id
//! - `economy`: Initial wealth and wages, wealth exchange, crime propensity
//! - `crime`: Crime choice, victims, capture, payouts and racketeering
//! - `progression`: Criminal status state machine
//! - `association`: Criminal network formation
//! - `simulation`: Main simulation state and tick loop
//! - `snapshot`: Per-tick population views
//! - `export`: JSON export and reporting
//! - `activity_log`: Recent crime events
//!
//! # Usage
//!
//! ```ignore
//! use crime_society::simulation::{CrimeSocietyModel, SimulationParams};
//!
//! let mut model = CrimeSocietyModel::new(SimulationParams::default(), 42)?;
//! model.run(120)?;
//! let last = model.snapshots().last();
//! ```

pub mod types;
pub mod params;
pub mod error;
pub mod sampling;
pub mod culture;
pub mod person;
pub mod population;
pub mod economy;
pub mod crime;
pub mod progression;
pub mod association;
pub mod simulation;
pub mod snapshot;
pub mod export;
pub mod activity_log;

// Re-export main types for convenience
pub use types::{PersonId, SimTick, Gender, CriminalStatus, Location};
pub use params::{SimulationParams, MurderPolicy, RacketeeringMode};
pub use error::{Result, SimulationError};
pub use culture::{CulturalAffinity, CulturalProfile, CulturalTable};
pub use person::Person;
pub use population::Population;
pub use economy::{WageMode, setup_economy, biased_wealth_transfer, crime_propensity};
pub use crime::{CrimeKind, CrimeCatalog, CrimeOutcome, CrimeResolution, step_criminal_activity};
pub use progression::{update_status, StatusChange};
pub use association::{association_probability, form_associations};
pub use simulation::{CrimeSocietyModel, SimulationStats, StepStats, run_simulation};
pub use snapshot::{PersonSnapshot, PopulationSnapshot};
pub use export::{export_simulation, generate_summary};
pub use activity_log::{ActivityLog, ActivityEntry, ActivityCategory, ActivityStats};
