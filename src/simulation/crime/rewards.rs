//! Monetary gain per crime kind

use rand::Rng;

use crate::simulation::error::{check_probability, Result};
use crate::simulation::params::RewardParams;

/// Result of a property or violent crime
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RobberyGain {
    pub amount: f64,
    /// The encounter escalated to murder; nothing was taken
    pub murder: bool,
}

/// Theft, assault and robbery take a share of the victim's wealth, unless the
/// encounter escalates to murder.
pub fn robbery_gain<R: Rng>(victim_wealth: f64, params: &RewardParams, rng: &mut R) -> Result<RobberyGain> {
    let murder_chance = check_probability("murder chance", params.murder_chance)?;
    if rng.gen::<f64>() < murder_chance {
        return Ok(RobberyGain { amount: 0.0, murder: true });
    }
    Ok(RobberyGain {
        amount: params.robbery_alpha * victim_wealth,
        murder: false,
    })
}

pub fn fraud_gain(victim_wealth: f64, params: &RewardParams) -> f64 {
    params.fraud_beta * victim_wealth
}

/// Fixed tribute from every business under protection
pub fn racketeering_gain(num_victims: u32, params: &RewardParams) -> f64 {
    params.racket_tribute * num_victims as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_robbery_gain_share() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let gain = robbery_gain(2000.0, &RewardParams::default(), &mut rng).unwrap();
        assert_eq!(gain, RobberyGain { amount: 200.0, murder: false });
    }

    #[test]
    fn test_murder_escalation_yields_nothing() {
        let mut rng = StepRng::new(0, 0);
        let gain = robbery_gain(2000.0, &RewardParams::default(), &mut rng).unwrap();
        assert!(gain.murder);
        assert_eq!(gain.amount, 0.0);
    }

    #[test]
    fn test_fraud_and_racket_gains() {
        let params = RewardParams::default();
        assert_eq!(fraud_gain(1000.0, &params), 200.0);
        assert_eq!(racketeering_gain(0, &params), 0.0);
        assert_eq!(racketeering_gain(3, &params), 150.0);
    }
}
