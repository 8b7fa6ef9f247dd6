//! Crime choice and the per-person crime turn
//!
//! A turn runs: propensity gate, crime choice, victim choice, capture, then
//! either incarceration or a payout, and finally status progression. A turn
//! with no eligible crime or no eligible victim changes nothing.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::crime::catalog::CrimeKind;
use crate::simulation::crime::law::{probability_of_being_caught, sentence_months};
use crate::simulation::crime::racketeering::{apply_racketeering, TributeOutcome};
use crate::simulation::crime::rewards::{fraud_gain, racketeering_gain, robbery_gain};
use crate::simulation::crime::victim::choose_victim;
use crate::simulation::economy::crime_propensity;
use crate::simulation::error::{check_probability, Result, SimulationError};
use crate::simulation::params::{CrimeDecisionParams, MurderPolicy, RacketeeringMode, SimulationParams};
use crate::simulation::person::Person;
use crate::simulation::population::Population;
use crate::simulation::progression::{crime_weight, update_status, StatusChange};
use crate::simulation::sampling::{sigmoid, weighted_choice};
use crate::simulation::types::PersonId;

/// Unnormalized preference for each candidate crime.
///
/// Poorer people lean harder on theft and assault. Racketeering opens up to
/// organized criminals, growing with wealth and with the size of their network.
pub fn crime_weights(person: &Person, params: &CrimeDecisionParams) -> Vec<(CrimeKind, f64)> {
    let theft = params.wealth_bias_scale / (person.wealth + params.epsilon);
    let mut weights = vec![
        (CrimeKind::Theft, theft),
        (CrimeKind::Assault, params.assault_factor * theft),
    ];
    if person.criminal_status.can_racketeer() {
        let access = sigmoid(params.racket_lambda * (person.wealth - params.racket_wealth_threshold));
        weights.push((CrimeKind::Racketeering, access * (person.degree() as f64 + 1.0)));
    }
    weights
}

/// Drop crimes the person is not physically or socially able to commit
pub fn filter_eligible_crimes(
    weights: Vec<(CrimeKind, f64)>,
    person: &Person,
    params: &CrimeDecisionParams,
) -> Vec<(CrimeKind, f64)> {
    weights
        .into_iter()
        .filter(|(kind, _)| match kind {
            CrimeKind::Robbery => person.muscle_mass >= params.robbery_min_muscle,
            CrimeKind::Bribery => person.charisma >= params.bribery_min_charisma,
            _ => true,
        })
        .collect()
}

/// Sample a crime for `person`, or `None` when nothing is eligible
pub fn decide_which_crime<R: Rng>(
    person: &Person,
    params: &CrimeDecisionParams,
    rng: &mut R,
) -> Result<Option<CrimeKind>> {
    let eligible = filter_eligible_crimes(crime_weights(person, params), person, params);
    if eligible.is_empty() {
        return Ok(None);
    }
    let total: f64 = eligible.iter().map(|(_, w)| *w).sum();
    if !total.is_finite() || total <= 0.0 {
        return Err(SimulationError::Logic {
            context: "crime weights",
            value: total,
        });
    }
    Ok(Some(*weighted_choice("crime choice", &eligible, rng)?))
}

/// How a crime attempt ended
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum CrimeResolution {
    Caught { sentence_months: u32 },
    /// Offender credited; the victim keeps their wealth
    Gain { amount: f64 },
    /// A violent encounter turned lethal
    Murder,
    /// Racket tribute collected from the victim
    Tribute(TributeOutcome),
}

impl CrimeResolution {
    pub fn is_murder(&self) -> bool {
        matches!(
            self,
            CrimeResolution::Murder | CrimeResolution::Tribute(TributeOutcome::Murder)
        )
    }

    pub fn gain(&self) -> f64 {
        match self {
            CrimeResolution::Gain { amount } => *amount,
            CrimeResolution::Tribute(outcome) => outcome.amount(),
            CrimeResolution::Caught { .. } | CrimeResolution::Murder => 0.0,
        }
    }
}

/// Everything one crime turn did
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrimeOutcome {
    pub offender: PersonId,
    pub victim: PersonId,
    pub kind: CrimeKind,
    pub resolution: CrimeResolution,
    pub status: StatusChange,
}

/// One crime turn for the person at `offender_slot`.
///
/// `candidates` are the slots considered as victims, normally the tick order.
pub fn step_criminal_activity<R: Rng>(
    population: &mut Population,
    offender_slot: usize,
    candidates: &[usize],
    params: &SimulationParams,
    rng: &mut R,
) -> Result<Option<CrimeOutcome>> {
    let offender = population.at(offender_slot);
    if !offender.can_offend() {
        return Ok(None);
    }

    let propensity = check_probability("crime propensity", crime_propensity(offender.wealth, &params.economy))?;
    if rng.gen::<f64>() >= propensity {
        return Ok(None);
    }

    let kind = match decide_which_crime(offender, &params.crime, rng)? {
        Some(kind) => kind,
        None => return Ok(None),
    };
    let victim_slot = match choose_victim(population, offender_slot, candidates, &params.victims, rng)? {
        Some(slot) => slot,
        None => return Ok(None),
    };

    let crime = *params.catalog.get(kind);
    let offender_wealth = population.at(offender_slot).wealth;
    let p_caught = probability_of_being_caught(offender_wealth, crime.report_rate, &params.law)?;

    let resolution = if rng.gen::<f64>() < p_caught {
        let months = sentence_months(&crime, &params.law, rng);
        population.at_mut(offender_slot).incarcerate(months);
        CrimeResolution::Caught { sentence_months: months }
    } else {
        resolve_payout(population, offender_slot, victim_slot, kind, params, rng)?
    };

    if resolution.is_murder() && params.murder_policy == MurderPolicy::Incapacitate {
        population.at_mut(victim_slot).incapacitated = true;
    }

    population.at_mut(offender_slot).crimes_committed += 1;
    let status = update_status(
        population,
        offender_slot,
        &crime,
        crime_weight(kind, &params.progression),
        &params.progression,
    );

    let outcome = CrimeOutcome {
        offender: population.at(offender_slot).id,
        victim: population.at(victim_slot).id,
        kind,
        resolution,
        status,
    };
    tracing::debug!(
        offender = %outcome.offender,
        victim = %outcome.victim,
        crime = %kind,
        p_caught,
        ?resolution,
        "crime resolved"
    );
    Ok(Some(outcome))
}

fn resolve_payout<R: Rng>(
    population: &mut Population,
    offender_slot: usize,
    victim_slot: usize,
    kind: CrimeKind,
    params: &SimulationParams,
    rng: &mut R,
) -> Result<CrimeResolution> {
    let victim_wealth = population.at(victim_slot).wealth;

    if kind.is_violent_or_property() {
        let gain = robbery_gain(victim_wealth, &params.rewards, rng)?;
        if gain.murder {
            return Ok(CrimeResolution::Murder);
        }
        population.at_mut(offender_slot).wealth += gain.amount;
        return Ok(CrimeResolution::Gain { amount: gain.amount });
    }

    let amount = match kind {
        CrimeKind::Fraud => fraud_gain(victim_wealth, &params.rewards),
        CrimeKind::Racketeering => {
            let offender = population.at_mut(offender_slot);
            offender.num_racket_victims += 1;
            match params.racketeering_mode {
                RacketeeringMode::FixedGain => racketeering_gain(offender.num_racket_victims, &params.rewards),
                RacketeeringMode::Tribute => {
                    let victim_id = population.at(victim_slot).id;
                    let (racketeer, victim) = population
                        .pair_mut(offender_slot, victim_slot)
                        .ok_or(SimulationError::UnknownPerson(victim_id))?;
                    return Ok(CrimeResolution::Tribute(apply_racketeering(
                        racketeer,
                        victim,
                        &params.rewards,
                    )));
                }
            }
        }
        // Bribery pays nothing
        _ => 0.0,
    };

    population.at_mut(offender_slot).wealth += amount;
    Ok(CrimeResolution::Gain { amount })
}
