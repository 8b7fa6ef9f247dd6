//! Core types for the crime society simulation

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a person
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonId(pub u32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Person#{}", self.0)
    }
}

/// Simulation time unit (12 ticks = 1 year, one tick per month)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    pub const MONTHS_PER_YEAR: u64 = 12;

    pub fn year(&self) -> u64 {
        self.0 / Self::MONTHS_PER_YEAR
    }

    /// Month of the year, 1-based
    pub fn month(&self) -> u64 {
        self.0 % Self::MONTHS_PER_YEAR + 1
    }

    /// True on ticks where the whole population gets one year older
    pub fn is_year_boundary(&self) -> bool {
        self.0 > 0 && self.0 % Self::MONTHS_PER_YEAR == 0
    }

    pub fn next(&self) -> SimTick {
        SimTick(self.0 + 1)
    }
}

impl fmt::Display for SimTick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Year {} Month {}", self.year(), self.month())
    }
}

/// Biological sex of a person
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Sample with the population split used for initialization (54% female)
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_bool(0.54) {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

/// Criminal standing of a person, totally ordered from least to most severe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CriminalStatus {
    #[default]
    NonCriminal,
    Petty,
    Organized,
    Vory,
}

impl CriminalStatus {
    pub const ALL: [CriminalStatus; 4] = [
        CriminalStatus::NonCriminal,
        CriminalStatus::Petty,
        CriminalStatus::Organized,
        CriminalStatus::Vory,
    ];

    /// Ordinal used for status gaps
    pub fn rank(&self) -> u8 {
        match self {
            CriminalStatus::NonCriminal => 0,
            CriminalStatus::Petty => 1,
            CriminalStatus::Organized => 2,
            CriminalStatus::Vory => 3,
        }
    }

    pub fn is_criminal(&self) -> bool {
        *self > CriminalStatus::NonCriminal
    }

    /// Statuses allowed to run protection rackets
    pub fn can_racketeer(&self) -> bool {
        matches!(self, CriminalStatus::Organized | CriminalStatus::Vory)
    }

    pub fn name(&self) -> &'static str {
        match self {
            CriminalStatus::NonCriminal => "NON_CRIMINAL",
            CriminalStatus::Petty => "PETTY_CRIMINAL",
            CriminalStatus::Organized => "ORGANIZED_CRIMINAL",
            CriminalStatus::Vory => "VORY",
        }
    }
}

impl fmt::Display for CriminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position on the city plane (kilometres from the centre)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Location { x, y }
    }

    /// Uniform point inside a disc centred on the origin
    pub fn random_in_disc<R: Rng>(radius: f64, rng: &mut R) -> Self {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        let r = rng.gen::<f64>().sqrt() * radius;
        Location::new(r * angle.cos(), r * angle.sin())
    }

    pub fn distance(&self, other: &Location) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
