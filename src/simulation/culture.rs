//! Cultural affinity between nationalities
//!
//! The association model only consumes a scalar affinity in [0, 1]. The
//! default table covers a handful of post-Soviet nationalities with
//! placeholder distances; unknown pairs count as maximally distant.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::error::Result;
use crate::simulation::sampling::weighted_choice;

/// Scalar affinity between two nationalities, 1.0 = identical culture
pub trait CulturalAffinity {
    fn affinity(&self, nationality_a: &str, nationality_b: &str) -> f64;
}

/// Nationality and spoken languages of one person
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CulturalProfile {
    pub nationality: String,
    pub language_primary: String,
    pub language_secondary: Option<String>,
}

impl CulturalProfile {
    pub fn new(nationality: &str, primary: &str, secondary: Option<&str>) -> Self {
        CulturalProfile {
            nationality: nationality.to_string(),
            language_primary: primary.to_string(),
            language_secondary: secondary.map(str::to_string),
        }
    }

    pub fn speaks(&self, language: &str) -> bool {
        self.language_primary == language || self.language_secondary.as_deref() == Some(language)
    }
}

const NATIONALITY_SHARES: &[(&str, f64)] = &[
    ("Russia", 0.52),
    ("Ukraine", 0.15),
    ("Belarus", 0.05),
    ("Uzbekistan", 0.06),
    ("Kazakhstan", 0.05),
    ("Georgia", 0.03),
    ("Armenia", 0.02),
    ("Azerbaijan", 0.02),
    ("Moldova", 0.02),
    ("Latvia", 0.01),
    ("Lithuania", 0.01),
    ("Estonia", 0.01),
    ("Kyrgyzstan", 0.02),
    ("Tajikistan", 0.02),
    ("Turkmenistan", 0.01),
];

const LANGUAGE_PROFILES: &[(&str, &str, Option<&str>)] = &[
    ("Russia", "Russian", None),
    ("Ukraine", "Ukrainian", Some("Russian")),
    ("Belarus", "Belarusian", Some("Russian")),
    ("Kazakhstan", "Kazakh", Some("Russian")),
    ("Uzbekistan", "Uzbek", Some("Russian")),
    ("Latvia", "Latvian", Some("Russian")),
    ("Lithuania", "Lithuanian", Some("Russian")),
];

const CULTURAL_DISTANCES: &[(&str, &str, f64)] = &[
    ("Russia", "Russia", 0.0),
    ("Russia", "Ukraine", 0.1),
    ("Russia", "Kazakhstan", 0.2),
    ("Ukraine", "Georgia", 0.3),
];

/// Distance assumed for pairs missing from the table
const UNKNOWN_DISTANCE: f64 = 1.0;

/// Lookup table of nationality shares, languages and pairwise distances
#[derive(Clone, Debug)]
pub struct CulturalTable {
    /// Nationality and population share
    pub nationalities: Vec<(String, f64)>,
    /// nationality -> (primary, secondary)
    pub languages: HashMap<String, (String, Option<String>)>,
    distances: HashMap<(String, String), f64>,
}

impl Default for CulturalTable {
    fn default() -> Self {
        let mut table = CulturalTable {
            nationalities: NATIONALITY_SHARES
                .iter()
                .map(|(n, share)| (n.to_string(), *share))
                .collect(),
            languages: LANGUAGE_PROFILES
                .iter()
                .map(|(n, p, s)| (n.to_string(), (p.to_string(), s.map(str::to_string))))
                .collect(),
            distances: HashMap::new(),
        };
        for (a, b, d) in CULTURAL_DISTANCES {
            table.set_distance(a, b, *d);
        }
        table
    }
}

impl CulturalTable {
    /// Table with no nationalities and no known distances
    pub fn empty() -> Self {
        CulturalTable {
            nationalities: Vec::new(),
            languages: HashMap::new(),
            distances: HashMap::new(),
        }
    }

    /// Record a distance; lookups are symmetric
    pub fn set_distance(&mut self, a: &str, b: &str, distance: f64) {
        self.distances.insert(Self::key(a, b), distance.clamp(0.0, 1.0));
    }

    pub fn cultural_distance(&self, a: &str, b: &str) -> f64 {
        self.distances
            .get(&Self::key(a, b))
            .copied()
            .unwrap_or(UNKNOWN_DISTANCE)
    }

    /// Languages for a nationality; unlisted nationalities speak their own name
    pub fn languages_for(&self, nationality: &str) -> (String, Option<String>) {
        self.languages
            .get(nationality)
            .cloned()
            .unwrap_or_else(|| (nationality.to_string(), None))
    }

    /// Draw a nationality by population share and attach its languages
    pub fn assign<R: Rng>(&self, rng: &mut R) -> Result<CulturalProfile> {
        if self.nationalities.is_empty() {
            return Ok(CulturalProfile::new("Unknown", "Unknown", None));
        }
        let nationality = weighted_choice("nationality shares", &self.nationalities, rng)?;
        let (primary, secondary) = self.languages_for(nationality);
        Ok(CulturalProfile {
            nationality: nationality.clone(),
            language_primary: primary,
            language_secondary: secondary,
        })
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }
}

impl CulturalAffinity for CulturalTable {
    fn affinity(&self, nationality_a: &str, nationality_b: &str) -> f64 {
        1.0 - self.cultural_distance(nationality_a, nationality_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_affinity_is_symmetric() {
        let table = CulturalTable::default();
        assert!((table.affinity("Russia", "Ukraine") - 0.9).abs() < 1e-12);
        assert!((table.affinity("Ukraine", "Russia") - 0.9).abs() < 1e-12);
        assert_eq!(table.affinity("Russia", "Russia"), 1.0);
    }

    #[test]
    fn test_unknown_pair_is_minimal() {
        let table = CulturalTable::default();
        assert_eq!(table.affinity("Estonia", "Tajikistan"), 0.0);
        // Same nationality without a table entry is still unknown
        assert_eq!(table.affinity("Latvia", "Latvia"), 0.0);
    }

    #[test]
    fn test_assign_uses_language_profiles() {
        let table = CulturalTable::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..100 {
            let profile = table.assign(&mut rng).unwrap();
            assert!(table.nationalities.iter().any(|(n, _)| *n == profile.nationality));
            if profile.nationality == "Ukraine" {
                assert!(profile.speaks("Ukrainian"));
                assert!(profile.speaks("Russian"));
            }
            if profile.nationality == "Georgia" {
                assert_eq!(profile.language_primary, "Georgia");
                assert_eq!(profile.language_secondary, None);
            }
        }
    }

    #[test]
    fn test_empty_table_assigns_placeholder() {
        let table = CulturalTable::empty();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let profile = table.assign(&mut rng).unwrap();
        assert_eq!(profile.nationality, "Unknown");
    }
}
