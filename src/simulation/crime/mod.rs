//! Crime pipeline: what to commit, against whom, and what it costs or pays

pub mod catalog;
pub mod decision;
pub mod law;
pub mod racketeering;
pub mod rewards;
pub mod victim;

pub use catalog::{CrimeCatalog, CrimeKind, CrimeParams};
pub use decision::{
    crime_weights, decide_which_crime, filter_eligible_crimes, step_criminal_activity, CrimeOutcome,
    CrimeResolution,
};
pub use law::{probability_of_being_caught, sentence_months, step_incarceration, IncarcerationEvent};
pub use racketeering::{apply_racketeering, TributeOutcome};
pub use rewards::{fraud_gain, racketeering_gain, robbery_gain, RobberyGain};
pub use victim::{choose_victim, victim_selection_score};
