//! Population registry
//!
//! Owns every person in creation order and keeps an id -> slot index so that
//! associate ids resolve without scanning. Associates are a labelled relation
//! between ids, never ownership.

use std::collections::HashMap;

use crate::simulation::error::{Result, SimulationError};
use crate::simulation::person::Person;
use crate::simulation::types::PersonId;

#[derive(Clone, Debug, Default)]
pub struct Population {
    people: Vec<Person>,
    index: HashMap<PersonId, usize>,
}

impl Population {
    pub fn new() -> Self {
        Population::default()
    }

    pub fn from_people(people: Vec<Person>) -> Result<Self> {
        let mut population = Population {
            people: Vec::with_capacity(people.len()),
            index: HashMap::with_capacity(people.len()),
        };
        for person in people {
            population.push(person)?;
        }
        Ok(population)
    }

    /// Register a person; ids must be unique
    pub fn push(&mut self, person: Person) -> Result<usize> {
        if self.index.contains_key(&person.id) {
            return Err(SimulationError::Configuration(format!(
                "duplicate person id {}",
                person.id
            )));
        }
        let slot = self.people.len();
        self.index.insert(person.id, slot);
        self.people.push(person);
        Ok(slot)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Person> {
        self.people.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Person> {
        self.people.iter_mut()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn slot_of(&self, id: PersonId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.slot_of(id).map(|slot| &self.people[slot])
    }

    pub fn get_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        match self.slot_of(id) {
            Some(slot) => Some(&mut self.people[slot]),
            None => None,
        }
    }

    /// Person by slot; panics on an out-of-range slot like slice indexing
    pub fn at(&self, slot: usize) -> &Person {
        &self.people[slot]
    }

    pub fn at_mut(&mut self, slot: usize) -> &mut Person {
        &mut self.people[slot]
    }

    /// Two distinct people mutably at once
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Person, &mut Person)> {
        if a == b || a >= self.people.len() || b >= self.people.len() {
            return None;
        }
        if a < b {
            let (left, right) = self.people.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.people.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    /// Link two people symmetrically. Returns true if the link is new.
    pub fn link(&mut self, a: PersonId, b: PersonId) -> Result<bool> {
        let slot_a = self.slot_of(a).ok_or(SimulationError::UnknownPerson(a))?;
        let slot_b = self.slot_of(b).ok_or(SimulationError::UnknownPerson(b))?;
        if slot_a == slot_b {
            return Ok(false);
        }
        let added_a = self.people[slot_a].associates.insert(b);
        let added_b = self.people[slot_b].associates.insert(a);
        Ok(added_a || added_b)
    }

    /// Highest associate count in the whole population
    pub fn max_degree(&self) -> usize {
        self.people.iter().map(|p| p.degree()).max().unwrap_or(0)
    }

    /// Does any direct associate of `person` have at least `min_score`?
    pub fn has_associate_with_score(&self, person: &Person, min_score: f64) -> bool {
        person
            .associates
            .iter()
            .filter_map(|id| self.get(*id))
            .any(|associate| associate.criminal_score >= min_score)
    }

    /// Check that every association is mirrored
    pub fn associations_are_symmetric(&self) -> bool {
        self.people.iter().all(|p| {
            p.associates.iter().all(|other| {
                self.get(*other)
                    .map(|o| o.associates.contains(&p.id))
                    .unwrap_or(false)
            })
        })
    }

    pub fn total_wealth(&self) -> f64 {
        self.people.iter().map(|p| p.wealth).sum()
    }
}
