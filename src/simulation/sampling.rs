//! Weighted sampling shared by every stochastic decision

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::simulation::error::{Result, SimulationError};

/// Pick one entry proportionally to its weight.
///
/// Callers must not pass an empty slice; an all-zero, negative or
/// non-finite weight set is reported as a logic error.
pub fn weighted_choice<'a, T, R: Rng>(
    context: &'static str,
    items: &'a [(T, f64)],
    rng: &mut R,
) -> Result<&'a T> {
    let total: f64 = items.iter().map(|(_, w)| *w).sum();
    if !total.is_finite() {
        return Err(SimulationError::Logic { context, value: total });
    }
    let dist = WeightedIndex::new(items.iter().map(|(_, w)| *w))
        .map_err(|_| SimulationError::Logic { context, value: total })?;
    Ok(&items[dist.sample(rng)].0)
}

/// Logistic function
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
