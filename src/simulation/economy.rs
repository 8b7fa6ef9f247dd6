//! Economy: initial wealth and wages, pairwise wealth exchange, crime propensity

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::error::{check_probability, Result, SimulationError};
use crate::simulation::params::EconomyParams;
use crate::simulation::person::Person;
use crate::simulation::types::PersonId;

/// How wages are assigned at initialization
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WageMode {
    /// Wage drawn independently from its own truncated Pareto
    A,
    /// Wage proportional to initial wealth, with a floor
    B,
}

impl FromStr for WageMode {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(WageMode::A),
            "B" => Ok(WageMode::B),
            other => Err(SimulationError::Configuration(format!(
                "unknown wage mode '{}', expected A or B",
                other
            ))),
        }
    }
}

impl TryFrom<String> for WageMode {
    type Error = SimulationError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<WageMode> for String {
    fn from(mode: WageMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for WageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WageMode::A => f.write_str("A"),
            WageMode::B => f.write_str("B"),
        }
    }
}

/// Inverse-CDF sample of a Pareto(alpha) truncated to [x_min, x_max]
pub fn truncated_pareto_sample<R: Rng>(alpha: f64, x_min: f64, x_max: f64, rng: &mut R) -> f64 {
    let u: f64 = rng.gen();
    ((1.0 - u) * x_min.powf(-alpha) + u * x_max.powf(-alpha)).powf(-1.0 / alpha)
}

pub fn generate_initial_wealth<R: Rng>(n: usize, params: &EconomyParams, rng: &mut R) -> Vec<f64> {
    (0..n)
        .map(|_| truncated_pareto_sample(params.wealth_pareto_alpha, params.wealth_min, params.wealth_max, rng))
        .collect()
}

/// Mode A wages, capped
pub fn generate_independent_wages<R: Rng>(n: usize, params: &EconomyParams, rng: &mut R) -> Vec<f64> {
    (0..n)
        .map(|_| {
            truncated_pareto_sample(params.wage_pareto_alpha, params.wealth_min, params.wage_cap, rng)
                .min(params.wage_cap)
        })
        .collect()
}

/// Mode B wages: `r_w * wealth`, never below the minimum wage
pub fn wages_from_wealth(wealth: &[f64], r_w: f64, params: &EconomyParams) -> Vec<f64> {
    wealth.iter().map(|w| (w * r_w).max(params.min_wage)).collect()
}

/// Initial (wealth, wage) arrays aligned with person creation order
pub fn setup_economy<R: Rng>(
    n: usize,
    mode: WageMode,
    r_w: f64,
    params: &EconomyParams,
    rng: &mut R,
) -> Result<(Vec<f64>, Vec<f64>)> {
    if r_w < 0.0 || !r_w.is_finite() {
        return Err(SimulationError::Configuration(format!("invalid wage ratio r_w = {}", r_w)));
    }
    let wealth = generate_initial_wealth(n, params, rng);
    let wages = match mode {
        WageMode::A => generate_independent_wages(n, params, rng),
        WageMode::B => wages_from_wealth(&wealth, r_w, params),
    };
    Ok((wealth, wages))
}

/// `setup_economy` with the mode given as text, as an external driver would
pub fn setup_economy_from_str<R: Rng>(
    n: usize,
    mode: &str,
    r_w: f64,
    params: &EconomyParams,
    rng: &mut R,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let mode: WageMode = mode.parse()?;
    setup_economy(n, mode, r_w, params, rng)
}

/// Outcome of one wealth exchange
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transfer {
    pub donor: PersonId,
    pub recipient: PersonId,
    pub amount: f64,
}

/// Biased pairwise exchange.
///
/// With probability `p = min(1, p_base * (1 + gamma * poorer/richer))` wealth
/// flows from the poorer to the richer party, otherwise the other way. The
/// amount is a share of the donor's wealth capped by the recipient's wealth.
pub fn biased_wealth_transfer<R: Rng>(
    a: &mut Person,
    b: &mut Person,
    params: &EconomyParams,
    rng: &mut R,
) -> Result<Option<Transfer>> {
    if a.wealth == 0.0 && b.wealth == 0.0 {
        return Ok(None);
    }

    let a_is_richer = a.wealth > b.wealth;
    let (richer, poorer) = if a_is_richer { (a, b) } else { (b, a) };

    let p = (params.transfer_p_base * (1.0 + params.transfer_gamma * (poorer.wealth / richer.wealth))).min(1.0);
    let p = check_probability("wealth transfer direction", p)?;

    let (donor, recipient) = if rng.gen::<f64>() < p {
        (poorer, richer)
    } else {
        (richer, poorer)
    };

    let amount = (params.transfer_beta * donor.wealth).min(recipient.wealth);
    donor.wealth -= amount;
    recipient.wealth += amount;

    Ok(Some(Transfer {
        donor: donor.id,
        recipient: recipient.id,
        amount,
    }))
}

/// Monthly chance that a person attempts a crime; falls with wealth
pub fn crime_propensity(wealth: f64, params: &EconomyParams) -> f64 {
    let raw = params.propensity_delta
        * (params.propensity_wealth_ref / (wealth + params.epsilon)).powf(params.propensity_zeta);
    raw.max(params.propensity_floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::culture::CulturalProfile;
    use crate::simulation::types::{Gender, Location};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn person(id: u32, wealth: f64) -> Person {
        Person::new(
            PersonId(id),
            Gender::Female,
            30,
            Location::default(),
            CulturalProfile::new("Russia", "Russian", None),
            wealth,
            0.0,
        )
    }

    #[test]
    fn test_wage_mode_parsing() {
        assert_eq!("A".parse::<WageMode>().unwrap(), WageMode::A);
        assert_eq!("b".parse::<WageMode>().unwrap(), WageMode::B);
        assert!(matches!("C".parse::<WageMode>(), Err(SimulationError::Configuration(_))));
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(setup_economy_from_str(5, "Z", 0.05, &EconomyParams::default(), &mut rng).is_err());
    }

    #[test]
    fn test_wage_mode_json_matches_cli_parsing() {
        assert_eq!(serde_json::from_str::<WageMode>("\"b\"").unwrap(), WageMode::B);
        assert_eq!(serde_json::from_str::<WageMode>("\" A \"").unwrap(), WageMode::A);
        assert!(serde_json::from_str::<WageMode>("\"C\"").is_err());
        assert_eq!(serde_json::to_string(&WageMode::B).unwrap(), "\"B\"");
    }

    #[test]
    fn test_pareto_samples_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let params = EconomyParams::default();
        let (wealth, wages) = setup_economy(1000, WageMode::A, 0.05, &params, &mut rng).unwrap();
        assert_eq!(wealth.len(), 1000);
        assert_eq!(wages.len(), 1000);
        for w in &wealth {
            assert!(*w >= 400.0 - 1e-9 && *w <= 15000.0 + 1e-9);
        }
        for w in &wages {
            assert!(*w >= 400.0 - 1e-9 && *w <= 2000.0);
        }
    }

    #[test]
    fn test_mode_b_wages_have_floor() {
        let params = EconomyParams::default();
        let wages = wages_from_wealth(&[1000.0, 100.0, 0.0], 0.05, &params);
        assert_eq!(wages, vec![50.0, 20.0, 20.0]);
    }

    #[test]
    fn test_transfer_conserves_wealth() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let params = EconomyParams::default();
        let mut a = person(1, 1234.5);
        let mut b = person(2, 87.25);
        for _ in 0..500 {
            let before = a.wealth + b.wealth;
            biased_wealth_transfer(&mut a, &mut b, &params, &mut rng).unwrap();
            assert!((a.wealth + b.wealth - before).abs() < 1e-9);
            assert!(a.wealth >= 0.0 && b.wealth >= 0.0);
        }
    }

    #[test]
    fn test_transfer_amount_capped_by_recipient() {
        // Always richer -> poorer: p_base = 0 makes p = 0
        let mut params = EconomyParams::default();
        params.transfer_p_base = 0.0;
        params.transfer_beta = 0.5;
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut rich = person(1, 1000.0);
        let mut poor = person(2, 10.0);
        let t = biased_wealth_transfer(&mut rich, &mut poor, &params, &mut rng)
            .unwrap()
            .unwrap();
        assert_eq!(t.donor, PersonId(1));
        assert_eq!(t.amount, 10.0);
        assert_eq!(rich.wealth, 990.0);
        assert_eq!(poor.wealth, 20.0);
    }

    #[test]
    fn test_no_transfer_between_broke_people() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut a = person(1, 0.0);
        let mut b = person(2, 0.0);
        let t = biased_wealth_transfer(&mut a, &mut b, &EconomyParams::default(), &mut rng).unwrap();
        assert!(t.is_none());
    }

    #[test]
    fn test_crime_propensity_shape() {
        let params = EconomyParams::default();
        let poor = crime_propensity(10.0, &params);
        let rich = crime_propensity(1_000_000.0, &params);
        assert!(poor > rich);
        assert!(rich >= 0.005);
        assert!((crime_propensity(2000.0, &params) - 0.01).abs() < 1e-6);
    }
}
