//! Demographic sampling and age effects

use rand::Rng;
use rand_distr::{LogNormal, Normal};

use crate::simulation::error::{Result, SimulationError};
use crate::simulation::sampling::weighted_choice;
use crate::simulation::types::Gender;

/// Adult age bands (inclusive) and their population shares
const AGE_BINS: [((u32, u32), f64); 10] = [
    ((16, 20), 0.10),
    ((21, 25), 0.12),
    ((26, 30), 0.13),
    ((31, 35), 0.14),
    ((36, 40), 0.13),
    ((41, 45), 0.11),
    ((46, 50), 0.10),
    ((51, 55), 0.07),
    ((56, 60), 0.06),
    ((61, 65), 0.04),
];

const HEIGHT_MEAN_CM: f64 = 170.0;
const HEIGHT_SD_CM: f64 = 10.0;

/// Sample an age: pick a band by share, then a uniform year inside it
pub fn sample_age<R: Rng>(rng: &mut R) -> Result<u32> {
    let (low, high) = *weighted_choice("age bins", &AGE_BINS, rng)?;
    Ok(rng.gen_range(low..=high))
}

pub fn sample_height<R: Rng>(rng: &mut R) -> Result<f64> {
    let normal = Normal::new(HEIGHT_MEAN_CM, HEIGHT_SD_CM)
        .map_err(|e| SimulationError::Configuration(format!("height distribution: {}", e)))?;
    Ok(rng.sample(normal))
}

/// Body weight in kg, log-normal by gender
pub fn sample_weight<R: Rng>(gender: Gender, rng: &mut R) -> Result<f64> {
    let (mu, sigma) = match gender {
        Gender::Male => (4.25, 0.17),
        Gender::Female => (4.04, 0.20),
    };
    log_normal("weight", mu, sigma, rng)
}

/// Peak muscle mass in kg, log-normal by gender
pub fn sample_muscle_mass<R: Rng>(gender: Gender, rng: &mut R) -> Result<f64> {
    let (mu, sigma) = match gender {
        Gender::Male => (3.5, 0.12),
        Gender::Female => (3.09, 0.15),
    };
    log_normal("muscle mass", mu, sigma, rng)
}

fn log_normal<R: Rng>(what: &str, mu: f64, sigma: f64, rng: &mut R) -> Result<f64> {
    let dist = LogNormal::new(mu, sigma)
        .map_err(|e| SimulationError::Configuration(format!("{} distribution: {}", what, e)))?;
    Ok(rng.sample(dist))
}

/// Muscle mass at `age` given the peak value.
///
/// Flat until 30, -1%/year (continuous) until 50, then -1.5%/year.
pub fn muscle_mass_at_age(age: u32, initial: f64) -> f64 {
    if age < 30 {
        initial
    } else if age < 50 {
        initial * (-0.01 * (age - 30) as f64).exp()
    } else {
        let at_fifty = initial * (-0.01_f64 * 20.0).exp();
        at_fifty * (-0.015 * (age - 50) as f64).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_muscle_decay_segments() {
        let m0 = 40.0;
        assert_eq!(muscle_mass_at_age(16, m0), m0);
        assert_eq!(muscle_mass_at_age(29, m0), m0);
        assert!((muscle_mass_at_age(40, m0) - m0 * (-0.1_f64).exp()).abs() < 1e-9);
        let expected_60 = m0 * (-0.2_f64).exp() * (-0.15_f64).exp();
        assert!((muscle_mass_at_age(60, m0) - expected_60).abs() < 1e-9);
    }

    #[test]
    fn test_muscle_decay_non_increasing() {
        let m0 = 33.0;
        let mut previous = muscle_mass_at_age(0, m0);
        for age in 1..100 {
            let current = muscle_mass_at_age(age, m0);
            assert!(current <= previous, "age {}: {} > {}", age, current, previous);
            previous = current;
        }
    }

    #[test]
    fn test_bad_log_normal_spread_is_a_configuration_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let result = log_normal("weight", 4.0, -0.5, &mut rng);
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }

    #[test]
    fn test_sampled_ages_within_bins() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..1000 {
            let age = sample_age(&mut rng).unwrap();
            assert!((16..=65).contains(&age));
        }
    }

    #[test]
    fn test_body_samples_are_plausible() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let n = 2000;
        let mean_male_muscle: f64 =
            (0..n).map(|_| sample_muscle_mass(Gender::Male, &mut rng).unwrap()).sum::<f64>() / n as f64;
        let mean_female_muscle: f64 =
            (0..n).map(|_| sample_muscle_mass(Gender::Female, &mut rng).unwrap()).sum::<f64>() / n as f64;
        // exp(3.5) ~ 33, exp(3.09) ~ 22
        assert!(mean_male_muscle > 30.0 && mean_male_muscle < 37.0);
        assert!(mean_female_muscle > 19.0 && mean_female_muscle < 25.0);
        let w = sample_weight(Gender::Female, &mut rng).unwrap();
        assert!(w > 0.0);
        let mean_height: f64 = (0..n).map(|_| sample_height(&mut rng).unwrap()).sum::<f64>() / n as f64;
        assert!((mean_height - 170.0).abs() < 1.5);
    }
}
