//! Static parameters per crime kind

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of crime a person can commit
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CrimeKind {
    Theft,
    Assault,
    Robbery,
    Fraud,
    Racketeering,
    Bribery,
}

impl CrimeKind {
    pub const ALL: [CrimeKind; 6] = [
        CrimeKind::Theft,
        CrimeKind::Assault,
        CrimeKind::Robbery,
        CrimeKind::Fraud,
        CrimeKind::Racketeering,
        CrimeKind::Bribery,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CrimeKind::Theft => "theft",
            CrimeKind::Assault => "assault",
            CrimeKind::Robbery => "robbery",
            CrimeKind::Fraud => "fraud",
            CrimeKind::Racketeering => "racketeering",
            CrimeKind::Bribery => "bribery",
        }
    }

    /// Crimes that take property by force or stealth and can turn lethal
    pub fn is_violent_or_property(&self) -> bool {
        matches!(self, CrimeKind::Theft | CrimeKind::Assault | CrimeKind::Robbery)
    }
}

impl fmt::Display for CrimeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sentencing and reporting parameters of one crime kind
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CrimeParams {
    /// Minimum sentence in years
    pub min_sentence_years: u32,
    /// Share of incidents reported to the police, in [0, 1]
    pub report_rate: f64,
}

/// Lookup of crime parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CrimeCatalog {
    pub theft: CrimeParams,
    pub assault: CrimeParams,
    pub robbery: CrimeParams,
    pub fraud: CrimeParams,
    pub racketeering: CrimeParams,
    pub bribery: CrimeParams,
}

impl Default for CrimeCatalog {
    fn default() -> Self {
        CrimeCatalog {
            theft: CrimeParams { min_sentence_years: 2, report_rate: 0.35 },
            assault: CrimeParams { min_sentence_years: 3, report_rate: 0.45 },
            robbery: CrimeParams { min_sentence_years: 4, report_rate: 0.60 },
            fraud: CrimeParams { min_sentence_years: 3, report_rate: 0.20 },
            racketeering: CrimeParams { min_sentence_years: 6, report_rate: 0.15 },
            bribery: CrimeParams { min_sentence_years: 2, report_rate: 0.10 },
        }
    }
}

impl CrimeCatalog {
    pub fn get(&self, kind: CrimeKind) -> &CrimeParams {
        match kind {
            CrimeKind::Theft => &self.theft,
            CrimeKind::Assault => &self.assault,
            CrimeKind::Robbery => &self.robbery,
            CrimeKind::Fraud => &self.fraud,
            CrimeKind::Racketeering => &self.racketeering,
            CrimeKind::Bribery => &self.bribery,
        }
    }

    /// Longest minimum sentence listed
    pub fn max_min_sentence(&self) -> u32 {
        CrimeKind::ALL
            .iter()
            .map(|k| self.get(*k).min_sentence_years)
            .max()
            .unwrap_or(0)
    }
}
