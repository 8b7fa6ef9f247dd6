//! Criminal status progression
//!
//! Every resolved crime attempt adds to the offender's criminal score, then the
//! status is re-evaluated from the score and the offender's place in the
//! association network:
//!
//! 1. score >= 300, degree >= 6 and the highest degree in the population -> Vory
//! 2. otherwise score >= 60, degree >= 2 and an associate with score >= 30 -> Organized
//! 3. otherwise score >= 30 -> Petty
//!
//! A candidate who meets the Vory score and degree but is not the most
//! connected falls through to rule 2, unless
//! `vory_candidate_blocks_lower_rules` is set, in which case the status stays
//! as it is.
//!
//! Degree stands in for centrality. Status never moves down, including on
//! desistance.

use serde::{Deserialize, Serialize};

use crate::simulation::crime::catalog::{CrimeKind, CrimeParams};
use crate::simulation::params::ProgressionParams;
use crate::simulation::population::Population;
use crate::simulation::types::CriminalStatus;

/// Network facts the state machine needs about one person
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkPosition {
    pub degree: usize,
    pub max_degree: usize,
    pub has_connected_criminal: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: CriminalStatus,
    pub to: CriminalStatus,
    pub score: f64,
}

impl StatusChange {
    pub fn promoted(&self) -> bool {
        self.to > self.from
    }
}

/// Score weight of a crime kind
pub fn crime_weight(kind: CrimeKind, params: &ProgressionParams) -> f64 {
    if kind == CrimeKind::Assault {
        params.assault_weight
    } else {
        1.0
    }
}

/// Score added by one attempt: `w_k * (s_k / S_MAX) * 100`
pub fn score_increment(crime: &CrimeParams, weight: f64, params: &ProgressionParams) -> f64 {
    weight * (crime.min_sentence_years as f64 / params.max_sentence_years) * 100.0
}

/// Status the rules grant for a score and network position, ignoring the current status
pub fn status_for(score: f64, position: NetworkPosition, params: &ProgressionParams) -> Option<CriminalStatus> {
    let vory_candidate = score >= params.vory_score && position.degree >= params.vory_min_degree;
    if vory_candidate && position.degree == position.max_degree {
        Some(CriminalStatus::Vory)
    } else if vory_candidate && params.vory_candidate_blocks_lower_rules {
        None
    } else if score >= params.organized_score
        && position.degree >= params.organized_min_degree
        && position.has_connected_criminal
    {
        Some(CriminalStatus::Organized)
    } else if score >= params.petty_score {
        Some(CriminalStatus::Petty)
    } else {
        None
    }
}

/// Add the score for one attempt and promote the person at `slot` if earned
pub fn update_status(
    population: &mut Population,
    slot: usize,
    crime: &CrimeParams,
    weight: f64,
    params: &ProgressionParams,
) -> StatusChange {
    let increment = score_increment(crime, weight, params);
    let from = population.at(slot).criminal_status;

    population.at_mut(slot).criminal_score += increment;

    let person = population.at(slot);
    let position = NetworkPosition {
        degree: person.degree(),
        max_degree: population.max_degree(),
        has_connected_criminal: population.has_associate_with_score(person, params.associate_score),
    };
    let score = person.criminal_score;

    if let Some(status) = status_for(score, position, params) {
        population.at_mut(slot).promote_to(status);
    }

    StatusChange {
        from,
        to: population.at(slot).criminal_status,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::culture::CulturalProfile;
    use crate::simulation::person::Person;
    use crate::simulation::types::{Gender, Location, PersonId};

    fn person(id: u32) -> Person {
        Person::new(
            PersonId(id),
            Gender::Male,
            30,
            Location::default(),
            CulturalProfile::new("Russia", "Russian", None),
            100.0,
            10.0,
        )
    }

    fn position(degree: usize, max_degree: usize, connected: bool) -> NetworkPosition {
        NetworkPosition { degree, max_degree, has_connected_criminal: connected }
    }

    #[test]
    fn test_score_increment() {
        let params = ProgressionParams::default();
        let crime = CrimeParams { min_sentence_years: 3, report_rate: 0.4 };
        assert!((score_increment(&crime, 1.0, &params) - 50.0).abs() < 1e-9);
        assert!((score_increment(&crime, 1.3, &params) - 65.0).abs() < 1e-9);
        assert_eq!(crime_weight(CrimeKind::Assault, &params), 1.3);
        assert_eq!(crime_weight(CrimeKind::Theft, &params), 1.0);
    }

    #[test]
    fn test_rule_precedence() {
        let params = ProgressionParams::default();
        assert_eq!(status_for(10.0, position(0, 0, false), &params), None);
        assert_eq!(status_for(30.0, position(0, 0, false), &params), Some(CriminalStatus::Petty));
        assert_eq!(status_for(60.0, position(2, 5, true), &params), Some(CriminalStatus::Organized));
        // Organized needs a connected criminal
        assert_eq!(status_for(60.0, position(2, 5, false), &params), Some(CriminalStatus::Petty));
        assert_eq!(status_for(300.0, position(6, 6, true), &params), Some(CriminalStatus::Vory));
        // Not the most connected: falls through to organized
        assert_eq!(status_for(300.0, position(6, 7, true), &params), Some(CriminalStatus::Organized));
        assert_eq!(status_for(300.0, position(5, 5, false), &params), Some(CriminalStatus::Petty));
    }

    #[test]
    fn test_blocked_vory_candidate_keeps_status() {
        let params = ProgressionParams {
            vory_candidate_blocks_lower_rules: true,
            ..ProgressionParams::default()
        };
        assert_eq!(status_for(300.0, position(6, 7, true), &params), None);
        assert_eq!(status_for(300.0, position(6, 6, true), &params), Some(CriminalStatus::Vory));
        // Below the Vory degree the lower rules still apply
        assert_eq!(status_for(300.0, position(5, 7, true), &params), Some(CriminalStatus::Organized));
    }

    #[test]
    fn test_update_status_accumulates_and_promotes() {
        let params = ProgressionParams::default();
        let mut pop = Population::from_people(vec![person(1), person(2), person(3)]).unwrap();
        let theft = CrimeParams { min_sentence_years: 2, report_rate: 0.35 };

        let change = update_status(&mut pop, 0, &theft, 1.0, &params);
        assert_eq!(change.from, CriminalStatus::NonCriminal);
        assert_eq!(change.to, CriminalStatus::Petty);
        assert!(change.promoted());

        pop.link(PersonId(1), PersonId(2)).unwrap();
        pop.link(PersonId(1), PersonId(3)).unwrap();
        pop.get_mut(PersonId(2)).unwrap().criminal_score = 40.0;
        let change = update_status(&mut pop, 0, &theft, 1.0, &params);
        assert_eq!(change.to, CriminalStatus::Organized);
        assert!((pop.at(0).criminal_score - 2.0 * 200.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_update_status_never_demotes() {
        let params = ProgressionParams::default();
        let mut pop = Population::from_people(vec![person(1)]).unwrap();
        pop.at_mut(0).criminal_status = CriminalStatus::Organized;
        let petty_crime = CrimeParams { min_sentence_years: 1, report_rate: 0.1 };
        let change = update_status(&mut pop, 0, &petty_crime, 1.0, &params);
        assert_eq!(change.to, CriminalStatus::Organized);
        assert!(!change.promoted());
    }
}
