//! Criminal association network formation
//!
//! Criminals bond with other criminals who are culturally, physically and
//! socially close. The link probability is logistic over the gaps between the
//! two people; a link forms when it reaches the configured threshold.

use serde::{Deserialize, Serialize};

use crate::simulation::culture::CulturalAffinity;
use crate::simulation::error::{check_probability, Result};
use crate::simulation::params::AssociationParams;
use crate::simulation::person::Person;
use crate::simulation::population::Population;
use crate::simulation::sampling::sigmoid;
use crate::simulation::types::PersonId;

/// A link formed during one pass
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLink {
    pub initiator: PersonId,
    pub partner: PersonId,
}

/// Logit of the link probability between `a` and `b`
pub fn association_logit(
    a: &Person,
    b: &Person,
    culture: &dyn CulturalAffinity,
    params: &AssociationParams,
) -> f64 {
    let mut intercept = params.intercept;
    if a.is_criminal() && b.is_criminal() {
        intercept += params.criminal_bonus;
    }

    let cultural_gap = 1.0 - culture.affinity(&a.culture.nationality, &b.culture.nationality);
    let status_gap = (a.criminal_status.rank() as f64 - b.criminal_status.rank() as f64).abs();
    let age_gap = (a.age as f64 - b.age as f64).abs();

    intercept
        + params.cultural * cultural_gap
        + params.distance * a.physical_distance(b)
        + params.status * status_gap
        + params.age * age_gap
        + params.traits * a.trait_distance(b)
}

pub fn association_probability(
    a: &Person,
    b: &Person,
    culture: &dyn CulturalAffinity,
    params: &AssociationParams,
) -> Result<f64> {
    check_probability("association probability", sigmoid(association_logit(a, b, culture, params)))
}

/// One bonding pass. Criminals in `order` try to link with every other
/// criminal they are not yet linked to.
pub fn form_associations(
    population: &mut Population,
    order: &[usize],
    culture: &dyn CulturalAffinity,
    params: &AssociationParams,
) -> Result<Vec<NewLink>> {
    let criminals: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&slot| population.at(slot).is_criminal())
        .collect();

    let mut links = Vec::new();
    for &i in &criminals {
        for &j in &criminals {
            if i == j {
                continue;
            }
            let (a, b) = (population.at(i), population.at(j));
            if a.is_associated_with(b.id) {
                continue;
            }
            let p = association_probability(a, b, culture, params)?;
            if p >= params.threshold {
                let (initiator, partner) = (a.id, b.id);
                population.link(initiator, partner)?;
                tracing::debug!(%initiator, %partner, p, "association formed");
                links.push(NewLink { initiator, partner });
            }
        }
    }
    Ok(links)
}
