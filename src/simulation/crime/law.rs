//! Law enforcement: capture probability, bribery, sentencing and release

use rand::Rng;

use crate::simulation::crime::catalog::CrimeParams;
use crate::simulation::error::{check_probability, Result};
use crate::simulation::params::LawParams;
use crate::simulation::person::Person;
use crate::simulation::types::SimTick;

/// Amount an offender with `wealth` offers the police
pub fn bribe_amount(wealth: f64, params: &LawParams) -> f64 {
    params.bribe_fraction * wealth.max(0.0)
}

/// Share of the capture risk a bribe cancels.
///
/// Zero below the threshold, then a saturating curve starting at the floor.
pub fn bribe_effectiveness(bribe: f64, params: &LawParams) -> f64 {
    if bribe < params.bribe_threshold {
        return 0.0;
    }
    let k = -(1.0 - params.effectiveness_span / params.effectiveness_ceiling).ln()
        / (params.bribe_saturation - params.bribe_threshold);
    params.effectiveness_floor
        + params.effectiveness_span * (1.0 - (-k * (bribe - params.bribe_threshold)).exp())
}

/// Probability that an offender with `wealth` is caught for a crime with `report_rate`.
///
/// Wealth buys the risk down but never below `min_capture_probability`.
pub fn probability_of_being_caught(wealth: f64, report_rate: f64, params: &LawParams) -> Result<f64> {
    let effectiveness = bribe_effectiveness(bribe_amount(wealth, params), params);
    let p = (report_rate - effectiveness).max(params.min_capture_probability);
    check_probability("capture probability", p)
}

/// Sentence in months: minimum sentence plus 0..=max extra years
pub fn sentence_months<R: Rng>(crime: &CrimeParams, params: &LawParams, rng: &mut R) -> u32 {
    let extra = rng.gen_range(0..=params.extra_sentence_years_max);
    (crime.min_sentence_years + extra) * SimTick::MONTHS_PER_YEAR as u32
}

/// What the monthly incarceration update did to one person
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncarcerationEvent {
    /// Not incarcerated
    Free,
    /// Still serving
    Serving { months_left: u32 },
    Released { desisted: bool, immune: bool },
}

/// Count down one month of a sentence, releasing and resolving desistance at zero
pub fn step_incarceration<R: Rng>(
    person: &mut Person,
    params: &LawParams,
    rng: &mut R,
) -> Result<IncarcerationEvent> {
    if !person.incarcerated {
        return Ok(IncarcerationEvent::Free);
    }

    person.sentence_timer = person.sentence_timer.saturating_sub(1);
    if person.sentence_timer > 0 {
        return Ok(IncarcerationEvent::Serving {
            months_left: person.sentence_timer,
        });
    }

    person.incarcerated = false;
    let p_desist = check_probability("desistance probability", params.desistance_probability)?;
    if rng.gen::<f64>() < p_desist {
        person.desisted = true;
        if person.criminal_status.can_racketeer() {
            person.immune = true;
        }
    }
    Ok(IncarcerationEvent::Released {
        desisted: person.desisted,
        immune: person.immune,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::culture::CulturalProfile;
    use crate::simulation::types::{CriminalStatus, Gender, Location, PersonId};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn inmate(months: u32, status: CriminalStatus) -> Person {
        let mut p = Person::new(
            PersonId(1),
            Gender::Male,
            40,
            Location::default(),
            CulturalProfile::new("Russia", "Russian", None),
            100.0,
            10.0,
        );
        p.criminal_status = status;
        p.incarcerate(months);
        p
    }

    #[test]
    fn test_bribe_effectiveness_curve() {
        let params = LawParams::default();
        assert_eq!(bribe_effectiveness(499.0, &params), 0.0);
        assert!((bribe_effectiveness(500.0, &params) - 0.25).abs() < 1e-12);
        let at_sat = bribe_effectiveness(4000.0, &params);
        assert!((at_sat - (0.25 + 0.70 * (0.70 / 0.95))).abs() < 1e-9);
        assert!(bribe_effectiveness(1e9, &params) <= 0.95 + 1e-12);
        assert!(bribe_effectiveness(3000.0, &params) > bribe_effectiveness(1000.0, &params));
    }

    #[test]
    fn test_capture_probability_bounds() {
        let params = LawParams::default();
        assert!((probability_of_being_caught(0.0, 0.6, &params).unwrap() - 0.6).abs() < 1e-12);
        // Very rich offenders still face the floor
        assert_eq!(probability_of_being_caught(1e7, 0.6, &params).unwrap(), 0.05);
        for wealth in [0.0, 100.0, 2500.0, 2600.0, 10000.0, 50000.0] {
            let p = probability_of_being_caught(wealth, 0.35, &params).unwrap();
            assert!((0.05..=0.35).contains(&p), "wealth {} -> {}", wealth, p);
        }
    }

    #[test]
    fn test_invalid_report_rate_is_logic_error() {
        let params = LawParams::default();
        assert!(probability_of_being_caught(0.0, 1.4, &params).is_err());
    }

    #[test]
    fn test_sentence_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let params = LawParams::default();
        let crime = CrimeParams { min_sentence_years: 3, report_rate: 0.5 };
        for _ in 0..200 {
            let months = sentence_months(&crime, &params, &mut rng);
            assert!([36, 48, 60].contains(&months));
        }
    }

    #[test]
    fn test_release_after_sentence() {
        // StepRng(MAX) draws ~1.0, never below the desistance chance
        let mut rng = StepRng::new(u64::MAX, 0);
        let params = LawParams::default();
        let mut p = inmate(2, CriminalStatus::Petty);
        assert_eq!(
            step_incarceration(&mut p, &params, &mut rng).unwrap(),
            IncarcerationEvent::Serving { months_left: 1 }
        );
        assert_eq!(
            step_incarceration(&mut p, &params, &mut rng).unwrap(),
            IncarcerationEvent::Released { desisted: false, immune: false }
        );
        assert!(!p.incarcerated);
        assert_eq!(p.sentence_timer, 0);
        assert_eq!(step_incarceration(&mut p, &params, &mut rng).unwrap(), IncarcerationEvent::Free);
    }

    #[test]
    fn test_desisting_organized_criminal_becomes_immune() {
        let mut rng = StepRng::new(0, 0);
        let params = LawParams::default();
        let mut boss = inmate(1, CriminalStatus::Vory);
        step_incarceration(&mut boss, &params, &mut rng).unwrap();
        assert!(boss.desisted && boss.immune);
        // Desistance does not demote
        assert_eq!(boss.criminal_status, CriminalStatus::Vory);

        let mut petty = inmate(1, CriminalStatus::Petty);
        step_incarceration(&mut petty, &params, &mut rng).unwrap();
        assert!(petty.desisted && !petty.immune);
    }
}
