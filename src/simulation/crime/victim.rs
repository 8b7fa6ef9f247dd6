//! Victim selection
//!
//! Offenders prefer nearby, wealthy and physically weaker targets.

use rand::Rng;

use crate::simulation::error::Result;
use crate::simulation::params::VictimParams;
use crate::simulation::person::Person;
use crate::simulation::population::Population;
use crate::simulation::sampling::weighted_choice;

/// Exponential decay halving every `tau` km
pub fn distance_decay(distance: f64, tau: f64) -> f64 {
    let k = std::f64::consts::LN_2 / tau;
    (-k * distance).exp()
}

/// How much the attacker out-muscles the victim, floored
pub fn intimidation_factor(muscle_attacker: f64, muscle_victim: f64, params: &VictimParams) -> f64 {
    (muscle_attacker / (muscle_victim + params.intimidation_epsilon)).max(params.intimidation_floor)
}

/// Attractiveness of `victim` to `attacker`; 0 means not eligible
pub fn victim_selection_score(attacker: &Person, victim: &Person, params: &VictimParams) -> f64 {
    if attacker.id == victim.id || !victim.is_targetable() {
        return 0.0;
    }
    let d = attacker.physical_distance(victim);
    distance_decay(d, params.distance_tau)
        * victim.wealth.max(0.0).ln_1p()
        * intimidation_factor(attacker.muscle_mass, victim.muscle_mass, params)
}

/// Sample a victim slot among `candidates`, or `None` if nobody is eligible
pub fn choose_victim<R: Rng>(
    population: &Population,
    attacker_slot: usize,
    candidates: &[usize],
    params: &VictimParams,
    rng: &mut R,
) -> Result<Option<usize>> {
    let attacker = population.at(attacker_slot);
    let scored: Vec<(usize, f64)> = candidates
        .iter()
        .filter(|&&slot| slot != attacker_slot)
        .map(|&slot| (slot, victim_selection_score(attacker, population.at(slot), params)))
        .filter(|(_, score)| *score > 0.0)
        .collect();

    if scored.is_empty() {
        return Ok(None);
    }
    let slot = weighted_choice("victim selection", &scored, rng)?;
    Ok(Some(*slot))
}
