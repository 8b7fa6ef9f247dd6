//! Protection racket tribute with escalation on default
//!
//! Only used under `RacketeeringMode::Tribute`. Unlike the fixed-gain rule,
//! the victim is debited here.

use serde::{Deserialize, Serialize};

use crate::simulation::params::RewardParams;
use crate::simulation::person::Person;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TributeOutcome {
    /// Victim paid the tribute
    Paid { amount: f64 },
    /// First default: the racketeer loots instead
    Looted { amount: f64 },
    /// Repeated default escalated to murder
    Murder,
}

impl TributeOutcome {
    /// Money moved to the racketeer
    pub fn amount(&self) -> f64 {
        match self {
            TributeOutcome::Paid { amount } | TributeOutcome::Looted { amount } => *amount,
            TributeOutcome::Murder => 0.0,
        }
    }
}

pub fn apply_racketeering(racketeer: &mut Person, victim: &mut Person, params: &RewardParams) -> TributeOutcome {
    let tribute = params.racket_tribute;
    if victim.wealth >= tribute {
        victim.wealth -= tribute;
        racketeer.wealth += tribute;
        return TributeOutcome::Paid { amount: tribute };
    }

    victim.racket_defaults += 1;
    if victim.racket_defaults == 1 {
        // Loot is capped by what the racketeer already holds
        let loot = (params.tribute_loot_fraction * victim.wealth).min(racketeer.wealth).max(0.0);
        victim.wealth -= loot;
        racketeer.wealth += loot;
        TributeOutcome::Looted { amount: loot }
    } else {
        TributeOutcome::Murder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::culture::CulturalProfile;
    use crate::simulation::types::{Gender, Location, PersonId};

    fn person(id: u32, wealth: f64) -> Person {
        Person::new(
            PersonId(id),
            Gender::Male,
            35,
            Location::default(),
            CulturalProfile::new("Russia", "Russian", None),
            wealth,
            0.0,
        )
    }

    #[test]
    fn test_tribute_paid_and_conserved() {
        let params = RewardParams::default();
        let mut boss = person(1, 100.0);
        let mut shop = person(2, 80.0);
        let outcome = apply_racketeering(&mut boss, &mut shop, &params);
        assert_eq!(outcome, TributeOutcome::Paid { amount: 50.0 });
        assert_eq!(boss.wealth, 150.0);
        assert_eq!(shop.wealth, 30.0);
    }

    #[test]
    fn test_default_escalates() {
        let params = RewardParams::default();
        let mut boss = person(1, 100.0);
        let mut shop = person(2, 40.0);

        let first = apply_racketeering(&mut boss, &mut shop, &params);
        assert_eq!(first, TributeOutcome::Looted { amount: 8.0 });
        assert_eq!(shop.racket_defaults, 1);
        assert_eq!(shop.wealth, 32.0);

        let second = apply_racketeering(&mut boss, &mut shop, &params);
        assert_eq!(second, TributeOutcome::Murder);
        assert_eq!(second.amount(), 0.0);
        assert_eq!(shop.racket_defaults, 2);
    }

    #[test]
    fn test_loot_capped_by_racketeer_wealth() {
        let params = RewardParams::default();
        let mut boss = person(1, 2.0);
        let mut shop = person(2, 40.0);
        let outcome = apply_racketeering(&mut boss, &mut shop, &params);
        assert_eq!(outcome, TributeOutcome::Looted { amount: 2.0 });
    }
}
