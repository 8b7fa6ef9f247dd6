use crime_society::simulation::crime::decision::decide_which_crime;
use crime_society::simulation::crime::law::probability_of_being_caught;
use crime_society::simulation::economy::biased_wealth_transfer;
use crime_society::simulation::params::{CrimeDecisionParams, EconomyParams, LawParams};
use crime_society::simulation::person::muscle_mass_at_age;
use crime_society::simulation::sampling::weighted_choice;
use crime_society::simulation::{
    CriminalStatus, CrimeKind, CulturalProfile, Gender, Location, Person, PersonId,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn person(id: u32, wealth: f64) -> Person {
    Person::new(
        PersonId(id),
        Gender::Female,
        40,
        Location::default(),
        CulturalProfile::new("Russia", "Russian", None),
        wealth,
        0.0,
    )
}

proptest! {
    #[test]
    fn capture_probability_stays_between_floor_and_report_rate(
        wealth in 0.0f64..1.0e7,
        report_rate in 0.05f64..=1.0,
    ) {
        let p = probability_of_being_caught(wealth, report_rate, &LawParams::default()).unwrap();
        prop_assert!(p >= 0.05);
        prop_assert!(p <= report_rate + 1e-12);
    }

    #[test]
    fn wealth_transfer_conserves_total(
        wa in 0.0f64..20_000.0,
        wb in 0.0f64..20_000.0,
        seed in any::<u64>(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut a = person(1, wa);
        let mut b = person(2, wb);
        biased_wealth_transfer(&mut a, &mut b, &EconomyParams::default(), &mut rng).unwrap();
        prop_assert!((a.wealth + b.wealth - (wa + wb)).abs() < 1e-6);
        prop_assert!(a.wealth >= 0.0 && b.wealth >= 0.0);
    }

    #[test]
    fn muscle_mass_never_grows_with_age(age in 0u32..100, initial in 10.0f64..60.0) {
        let now = muscle_mass_at_age(age, initial);
        let later = muscle_mass_at_age(age + 1, initial);
        prop_assert!(later <= now);
        prop_assert!(now <= initial);
    }

    #[test]
    fn weighted_choice_returns_a_listed_key(
        weights in proptest::collection::vec(0.0f64..10.0, 1..8),
        seed in any::<u64>(),
    ) {
        prop_assume!(weights.iter().any(|w| *w > 0.0));
        let items: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let key = *weighted_choice("property", &items, &mut rng).unwrap();
        prop_assert!(key < items.len());
        prop_assert!(items[key].1 > 0.0);
    }

    #[test]
    fn chosen_crime_is_a_candidate(
        wealth in 0.0f64..50_000.0,
        organized in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut p = person(1, wealth);
        if organized {
            p.criminal_status = CriminalStatus::Organized;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let kind = decide_which_crime(&p, &CrimeDecisionParams::default(), &mut rng)
            .unwrap()
            .unwrap();
        prop_assert!(matches!(kind, CrimeKind::Theft | CrimeKind::Assault | CrimeKind::Racketeering));
        if !organized {
            prop_assert!(kind != CrimeKind::Racketeering);
        }
    }
}
