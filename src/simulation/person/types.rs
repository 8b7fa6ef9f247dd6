//! Person entity: demographic, economic and criminal state

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::culture::CulturalProfile;
use crate::simulation::error::Result;
use crate::simulation::params::DemographicsParams;
use crate::simulation::person::demographics::{
    muscle_mass_at_age, sample_age, sample_height, sample_muscle_mass, sample_weight,
};
use crate::simulation::types::{CriminalStatus, Gender, Location, PersonId};

/// One member of the simulated society
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,

    // Demographics
    pub gender: Gender,
    /// Age in years
    pub age: u32,
    /// Height in cm
    pub height: f64,
    /// Weight in kg
    pub weight: f64,
    /// Peak muscle mass before age decay
    pub muscle_mass_initial: f64,
    pub muscle_mass: f64,
    /// Social skill in [0, 1]
    pub charisma: f64,
    pub location: Location,
    pub culture: CulturalProfile,

    // Economy
    pub wealth: f64,
    /// Monthly income, fixed for the run
    pub wage: f64,

    // Crime
    pub criminal_status: CriminalStatus,
    /// Accumulated severity of attempted crimes; never decreases
    pub criminal_score: f64,
    /// Known criminal associates; mirrored on the other side
    pub associates: BTreeSet<PersonId>,
    pub incarcerated: bool,
    /// Months left to serve
    pub sentence_timer: u32,
    /// Permanently stopped offending after release
    pub desisted: bool,
    /// Protected from victimization after desisting from high status
    pub immune: bool,
    /// Out of play after a murder escalation (only under the incapacitate policy)
    pub incapacitated: bool,
    pub num_racket_victims: u32,
    /// Times this person failed to pay racket tribute
    pub racket_defaults: u32,

    // Per-step markers, reset at the end of every tick
    pub crimes_committed: u32,
    pub incarcerated_this_step: bool,
}

impl Person {
    /// Create a person with explicit attributes and a clean record
    pub fn new(
        id: PersonId,
        gender: Gender,
        age: u32,
        location: Location,
        culture: CulturalProfile,
        wealth: f64,
        wage: f64,
    ) -> Self {
        Person {
            id,
            gender,
            age,
            height: 170.0,
            weight: 70.0,
            muscle_mass_initial: 30.0,
            muscle_mass: muscle_mass_at_age(age, 30.0),
            charisma: 0.5,
            location,
            culture,
            wealth,
            wage,
            criminal_status: CriminalStatus::NonCriminal,
            criminal_score: 0.0,
            associates: BTreeSet::new(),
            incarcerated: false,
            sentence_timer: 0,
            desisted: false,
            immune: false,
            incapacitated: false,
            num_racket_victims: 0,
            racket_defaults: 0,
            crimes_committed: 0,
            incarcerated_this_step: false,
        }
    }

    /// Sample demographics and place the person in the city disc
    pub fn random<R: Rng>(
        id: PersonId,
        culture: CulturalProfile,
        wealth: f64,
        wage: f64,
        params: &DemographicsParams,
        rng: &mut R,
    ) -> Result<Self> {
        let gender = Gender::random(rng);
        let age = sample_age(rng)?;
        let height = sample_height(rng)?;
        let weight = sample_weight(gender, rng)?;
        let muscle_mass_initial = sample_muscle_mass(gender, rng)?;
        let charisma = rng.gen_range(0.0..=1.0);
        let location = Location::random_in_disc(params.location_radius, rng);

        let mut person = Person::new(id, gender, age, location, culture, wealth, wage);
        person.height = height;
        person.weight = weight;
        person.charisma = charisma;
        person.set_peak_muscle_mass(muscle_mass_initial);
        Ok(person)
    }

    /// Replace the peak muscle mass and recompute the current value for this age
    pub fn set_peak_muscle_mass(&mut self, initial: f64) {
        self.muscle_mass_initial = initial;
        self.muscle_mass = muscle_mass_at_age(self.age, initial);
    }

    /// Number of distinct associates
    pub fn degree(&self) -> usize {
        self.associates.len()
    }

    pub fn is_criminal(&self) -> bool {
        self.criminal_status.is_criminal()
    }

    pub fn is_associated_with(&self, other: PersonId) -> bool {
        self.associates.contains(&other)
    }

    /// May take a turn in the criminal activity phase
    pub fn can_offend(&self) -> bool {
        !self.incarcerated && !self.desisted && !self.incapacitated
    }

    /// May be picked as a victim by someone else
    pub fn is_targetable(&self) -> bool {
        !self.incarcerated && !self.desisted && !self.immune && !self.incapacitated
    }

    pub fn physical_distance(&self, other: &Person) -> f64 {
        self.location.distance(&other.location)
    }

    pub fn trait_vector(&self) -> [f64; 4] {
        [self.charisma, self.muscle_mass, self.height, self.weight]
    }

    /// Euclidean distance between trait vectors
    pub fn trait_distance(&self, other: &Person) -> f64 {
        self.trait_vector()
            .iter()
            .zip(other.trait_vector().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// Start serving a sentence
    pub fn incarcerate(&mut self, sentence_months: u32) {
        self.incarcerated = true;
        self.sentence_timer = sentence_months;
        self.incarcerated_this_step = true;
    }

    /// Move up to `status`; never demotes
    pub fn promote_to(&mut self, status: CriminalStatus) -> bool {
        if status > self.criminal_status {
            self.criminal_status = status;
            true
        } else {
            false
        }
    }

    /// Clear the counters that only describe the current tick
    pub fn reset_step_counters(&mut self) {
        self.crimes_committed = 0;
        self.incarcerated_this_step = false;
    }
}
