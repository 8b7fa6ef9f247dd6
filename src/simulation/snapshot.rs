//! Serializable per-tick views of the population

use serde::{Deserialize, Serialize};

use crate::simulation::person::Person;
use crate::simulation::population::Population;
use crate::simulation::types::{CriminalStatus, Location, PersonId, SimTick};

/// State of one person at the end of a tick
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PersonSnapshot {
    pub id: PersonId,
    pub gender: String,
    pub age: u32,
    pub height: f64,
    pub weight: f64,
    pub muscle_mass: f64,
    pub charisma: f64,
    pub location: Location,
    pub nationality: String,
    pub language_primary: String,
    pub language_secondary: Option<String>,
    pub wealth: f64,
    pub wage: f64,
    pub criminal_status: String,
    pub criminal_score: f64,
    pub degree: usize,
    pub incarcerated: bool,
    pub desisted: bool,
    pub immune: bool,
    pub incapacitated: bool,
}

impl From<&Person> for PersonSnapshot {
    fn from(p: &Person) -> Self {
        PersonSnapshot {
            id: p.id,
            gender: p.gender.code().to_string(),
            age: p.age,
            height: p.height,
            weight: p.weight,
            muscle_mass: p.muscle_mass,
            charisma: p.charisma,
            location: p.location,
            nationality: p.culture.nationality.clone(),
            language_primary: p.culture.language_primary.clone(),
            language_secondary: p.culture.language_secondary.clone(),
            wealth: p.wealth,
            wage: p.wage,
            criminal_status: p.criminal_status.name().to_string(),
            criminal_score: p.criminal_score,
            degree: p.degree(),
            incarcerated: p.incarcerated,
            desisted: p.desisted,
            immune: p.immune,
            incapacitated: p.incapacitated,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PopulationSnapshot {
    pub tick: SimTick,
    pub people: Vec<PersonSnapshot>,
}

impl PopulationSnapshot {
    pub fn capture(tick: SimTick, population: &Population) -> Self {
        PopulationSnapshot {
            tick,
            people: population.iter().map(PersonSnapshot::from).collect(),
        }
    }

    pub fn total_wealth(&self) -> f64 {
        self.people.iter().map(|p| p.wealth).sum()
    }

    /// Head count per status name, lowest rank first
    pub fn status_counts(&self) -> Vec<(&'static str, usize)> {
        CriminalStatus::ALL
            .iter()
            .map(|s| {
                let name = s.name();
                (name, self.people.iter().filter(|p| p.criminal_status == name).count())
            })
            .collect()
    }
}
