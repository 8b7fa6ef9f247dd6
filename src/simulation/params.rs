//! Configuration parameters for the crime society simulation

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::simulation::crime::catalog::{CrimeCatalog, CrimeKind};
use crate::simulation::economy::WageMode;
use crate::simulation::error::{Result, SimulationError};

/// Main configuration for the simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    /// Number of people created at start
    pub num_agents: usize,
    /// How wages are derived at initialization
    pub wage_mode: WageMode,
    /// Wage-to-wealth ratio used by wage mode B
    pub r_w: f64,

    pub economy: EconomyParams,
    /// Sentencing and reporting per crime kind
    pub catalog: CrimeCatalog,
    pub crime: CrimeDecisionParams,
    pub victims: VictimParams,
    pub law: LawParams,
    pub rewards: RewardParams,
    pub progression: ProgressionParams,
    pub association: AssociationParams,
    pub demographics: DemographicsParams,

    /// What a murder escalation does to the victim
    pub murder_policy: MurderPolicy,
    /// How racketeering pays out
    pub racketeering_mode: RacketeeringMode,
    /// Log and skip a failing agent turn instead of aborting the step
    pub isolate_agent_failures: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            num_agents: 100,
            wage_mode: WageMode::A,
            r_w: 0.05,
            economy: EconomyParams::default(),
            catalog: CrimeCatalog::default(),
            crime: CrimeDecisionParams::default(),
            victims: VictimParams::default(),
            law: LawParams::default(),
            rewards: RewardParams::default(),
            progression: ProgressionParams::default(),
            association: AssociationParams::default(),
            demographics: DemographicsParams::default(),
            murder_policy: MurderPolicy::default(),
            racketeering_mode: RacketeeringMode::default(),
            isolate_agent_failures: false,
        }
    }
}

/// Wealth distribution, wage and exchange parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyParams {
    /// Pareto shape for initial wealth
    pub wealth_pareto_alpha: f64,
    /// Pareto shape for mode A wages
    pub wage_pareto_alpha: f64,
    pub wealth_min: f64,
    pub wealth_max: f64,
    /// Upper bound for mode A wages
    pub wage_cap: f64,
    /// Floor for mode B wages
    pub min_wage: f64,

    /// Fraction of the donor's wealth at stake in one exchange
    pub transfer_beta: f64,
    /// Base probability that wealth flows poorer -> richer
    pub transfer_p_base: f64,
    /// Extra poorer -> richer bias scaled by the wealth ratio
    pub transfer_gamma: f64,

    /// Reference wealth of the crime propensity curve
    pub propensity_wealth_ref: f64,
    pub propensity_delta: f64,
    pub propensity_zeta: f64,
    /// Propensity never drops below this, however rich
    pub propensity_floor: f64,
    pub epsilon: f64,
}

impl Default for EconomyParams {
    fn default() -> Self {
        EconomyParams {
            wealth_pareto_alpha: 2.5,
            wage_pareto_alpha: 4.0,
            wealth_min: 400.0,
            wealth_max: 15000.0,
            wage_cap: 2000.0,
            min_wage: 20.0,
            transfer_beta: 0.05,
            transfer_p_base: 0.1,
            transfer_gamma: 0.3,
            propensity_wealth_ref: 2000.0,
            propensity_delta: 0.01,
            propensity_zeta: 0.15,
            propensity_floor: 0.005,
            epsilon: 1e-2,
        }
    }
}

/// Crime choice weights and eligibility gates
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CrimeDecisionParams {
    /// Numerator of the poverty bias `w_s / (wealth + eps)`
    pub wealth_bias_scale: f64,
    /// Assault weight relative to theft
    pub assault_factor: f64,
    /// Wealth where racketeering access crosses 0.5
    pub racket_wealth_threshold: f64,
    /// Steepness of the racketeering access sigmoid
    pub racket_lambda: f64,
    /// Minimum muscle mass to attempt robbery
    pub robbery_min_muscle: f64,
    /// Minimum charisma to attempt bribery
    pub bribery_min_charisma: f64,
    pub epsilon: f64,
}

impl Default for CrimeDecisionParams {
    fn default() -> Self {
        CrimeDecisionParams {
            wealth_bias_scale: 100.0,
            assault_factor: 0.5,
            racket_wealth_threshold: 500.0,
            racket_lambda: 0.01,
            robbery_min_muscle: 30.0,
            bribery_min_charisma: 0.7,
            epsilon: 1e-2,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct VictimParams {
    /// Half-distance of the target attractiveness decay (km)
    pub distance_tau: f64,
    pub intimidation_epsilon: f64,
    pub intimidation_floor: f64,
}

impl Default for VictimParams {
    fn default() -> Self {
        VictimParams {
            distance_tau: 30.0,
            intimidation_epsilon: 1e-2,
            intimidation_floor: 0.1,
        }
    }
}

/// Capture, bribery and sentencing
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LawParams {
    /// Share of wealth an offender offers as a bribe
    pub bribe_fraction: f64,
    /// Bribes below this buy nothing
    pub bribe_threshold: f64,
    /// Bribe size where effectiveness reaches its ceiling
    pub bribe_saturation: f64,
    /// Effectiveness right at the threshold
    pub effectiveness_floor: f64,
    /// Effectiveness gained between threshold and saturation
    pub effectiveness_span: f64,
    pub effectiveness_ceiling: f64,
    /// Capture probability can never be bought below this
    pub min_capture_probability: f64,
    /// Extra years drawn uniformly from 0..=max on top of the minimum sentence
    pub extra_sentence_years_max: u32,
    /// Chance a released prisoner leaves crime for good
    pub desistance_probability: f64,
}

impl Default for LawParams {
    fn default() -> Self {
        LawParams {
            bribe_fraction: 0.2,
            bribe_threshold: 500.0,
            bribe_saturation: 4000.0,
            effectiveness_floor: 0.25,
            effectiveness_span: 0.70,
            effectiveness_ceiling: 0.95,
            min_capture_probability: 0.05,
            extra_sentence_years_max: 2,
            desistance_probability: 0.1,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardParams {
    /// Share of victim wealth taken by theft, assault and robbery
    pub robbery_alpha: f64,
    /// Share of victim wealth taken by fraud
    pub fraud_beta: f64,
    /// Tribute per racket victim
    pub racket_tribute: f64,
    /// Chance a violent crime escalates to murder
    pub murder_chance: f64,
    /// Share of a defaulting victim's wealth looted on first default
    pub tribute_loot_fraction: f64,
}

impl Default for RewardParams {
    fn default() -> Self {
        RewardParams {
            robbery_alpha: 0.1,
            fraud_beta: 0.2,
            racket_tribute: 50.0,
            murder_chance: 0.00022,
            tribute_loot_fraction: 0.2,
        }
    }
}

/// Thresholds of the criminal status state machine
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionParams {
    /// Longest minimum sentence in the catalog, used for normalization
    pub max_sentence_years: f64,
    /// Score multiplier for assault
    pub assault_weight: f64,
    pub vory_score: f64,
    pub vory_min_degree: usize,
    pub organized_score: f64,
    pub organized_min_degree: usize,
    /// Score an associate needs for the organized rule
    pub associate_score: f64,
    pub petty_score: f64,
    /// When set, a Vory candidate who is not the most connected keeps their
    /// status instead of being checked against the lower rules
    pub vory_candidate_blocks_lower_rules: bool,
}

impl Default for ProgressionParams {
    fn default() -> Self {
        ProgressionParams {
            max_sentence_years: 6.0,
            assault_weight: 1.3,
            vory_score: 300.0,
            vory_min_degree: 6,
            organized_score: 60.0,
            organized_min_degree: 2,
            associate_score: 30.0,
            petty_score: 30.0,
            vory_candidate_blocks_lower_rules: false,
        }
    }
}

/// Logistic link model weights
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AssociationParams {
    pub intercept: f64,
    /// Weight on `1 - cultural affinity`
    pub cultural: f64,
    /// Weight on physical distance
    pub distance: f64,
    /// Weight on the status rank gap
    pub status: f64,
    /// Weight on the age gap in years
    pub age: f64,
    /// Weight on the trait-space distance
    pub traits: f64,
    /// Added to the intercept when both parties are criminal
    pub criminal_bonus: f64,
    /// Minimum link probability to form a link
    pub threshold: f64,
}

impl Default for AssociationParams {
    fn default() -> Self {
        AssociationParams {
            intercept: -2.0,
            cultural: -1.0,
            distance: -0.5,
            status: -1.0,
            age: -0.1,
            traits: -1.0,
            criminal_bonus: 1.0,
            threshold: 0.15,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicsParams {
    /// Radius of the disc people are placed in (km)
    pub location_radius: f64,
    /// Re-apply muscle decay when people age
    pub recompute_muscle_on_aging: bool,
}

impl Default for DemographicsParams {
    fn default() -> Self {
        DemographicsParams {
            location_radius: 3.0,
            recompute_muscle_on_aging: false,
        }
    }
}

/// Consequence of a murder escalation for the victim
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MurderPolicy {
    /// Recorded only; the victim stays fully active
    #[default]
    Ignore,
    /// The victim stays registered but never acts or is targeted again
    Incapacitate,
}

/// Payout rule for racketeering
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RacketeeringMode {
    /// Offender is credited tribute times racket victims; victim is not debited
    #[default]
    FixedGain,
    /// Victim pays tribute, with robbery then murder on repeated default
    Tribute,
}

impl SimulationParams {
    /// Create params for a fast test run
    pub fn fast_test() -> Self {
        let mut params = Self::default();
        params.num_agents = 30;
        params
    }

    /// Load params from a JSON file; missing fields fall back to defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SimulationError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let params: SimulationParams = serde_json::from_str(&text).map_err(|e| {
            SimulationError::Configuration(format!("cannot parse {}: {}", path.display(), e))
        })?;
        params.validate()?;
        Ok(params)
    }

    /// Reject parameter combinations the formulas cannot handle
    pub fn validate(&self) -> Result<()> {
        fn fail(msg: String) -> Result<()> {
            Err(SimulationError::Configuration(msg))
        }
        fn unit(name: &str, value: f64) -> Result<()> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                fail(format!("{} must be in [0, 1], got {}", name, value))
            }
        }

        if self.r_w < 0.0 || !self.r_w.is_finite() {
            return fail(format!("r_w must be a non-negative number, got {}", self.r_w));
        }

        let e = &self.economy;
        if e.wealth_pareto_alpha <= 0.0 || e.wage_pareto_alpha <= 0.0 {
            return fail("pareto shapes must be positive".to_string());
        }
        if !(0.0 < e.wealth_min && e.wealth_min < e.wealth_max) {
            return fail(format!(
                "wealth bounds must satisfy 0 < min < max, got [{}, {}]",
                e.wealth_min, e.wealth_max
            ));
        }
        if !(e.wealth_min < e.wage_cap) {
            return fail(format!("wage cap {} must exceed wealth_min {}", e.wage_cap, e.wealth_min));
        }
        unit("economy.transfer_beta", e.transfer_beta)?;
        unit("economy.transfer_p_base", e.transfer_p_base)?;
        unit("economy.propensity_floor", e.propensity_floor)?;
        if e.epsilon <= 0.0 || self.crime.epsilon <= 0.0 {
            return fail("epsilon must be positive".to_string());
        }

        let l = &self.law;
        unit("law.bribe_fraction", l.bribe_fraction)?;
        unit("law.min_capture_probability", l.min_capture_probability)?;
        unit("law.desistance_probability", l.desistance_probability)?;
        if l.bribe_saturation <= l.bribe_threshold {
            return fail("law.bribe_saturation must exceed law.bribe_threshold".to_string());
        }
        if !(0.0 < l.effectiveness_span && l.effectiveness_span < l.effectiveness_ceiling) {
            return fail("law.effectiveness_span must be in (0, effectiveness_ceiling)".to_string());
        }
        unit("law.effectiveness_ceiling", l.effectiveness_ceiling)?;
        unit(
            "law.effectiveness_floor + span",
            l.effectiveness_floor + l.effectiveness_span,
        )?;

        for kind in CrimeKind::ALL {
            unit(kind.name(), self.catalog.get(kind).report_rate)?;
        }

        unit("rewards.murder_chance", self.rewards.murder_chance)?;
        unit("rewards.tribute_loot_fraction", self.rewards.tribute_loot_fraction)?;
        unit("association.threshold", self.association.threshold)?;

        if self.progression.max_sentence_years <= 0.0 {
            return fail("progression.max_sentence_years must be positive".to_string());
        }
        let longest = self.catalog.max_min_sentence();
        if self.progression.max_sentence_years < longest as f64 {
            return fail(format!(
                "progression.max_sentence_years {} is below the longest catalog sentence {}",
                self.progression.max_sentence_years, longest
            ));
        }
        if self.victims.distance_tau <= 0.0 {
            return fail("victims.distance_tau must be positive".to_string());
        }

        Ok(())
    }
}
