//! Main simulation state and tick loop

use rand::seq::{index, SliceRandom};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::activity_log::ActivityLog;
use crate::simulation::association::form_associations;
use crate::simulation::crime::{
    step_criminal_activity, step_incarceration, CrimeOutcome, CrimeResolution, IncarcerationEvent,
};
use crate::simulation::culture::{CulturalAffinity, CulturalTable};
use crate::simulation::economy::{biased_wealth_transfer, setup_economy};
use crate::simulation::error::{Result, SimulationError};
use crate::simulation::params::SimulationParams;
use crate::simulation::person::{muscle_mass_at_age, Person};
use crate::simulation::population::Population;
use crate::simulation::snapshot::PopulationSnapshot;
use crate::simulation::types::{CriminalStatus, PersonId, SimTick};

/// Aggregates for one completed tick
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepStats {
    pub tick: SimTick,
    /// Mean wealth of people not in prison
    pub mean_wealth: f64,
    pub total_wealth: f64,
    pub num_criminals: usize,
    pub num_petty: usize,
    pub num_organized: usize,
    pub num_vory: usize,
    pub num_incarcerated: usize,
    pub crimes: usize,
    pub arrests: usize,
    pub murders: usize,
    pub transfers: usize,
    pub releases: usize,
    pub desistances: usize,
    pub new_links: usize,
}

/// Statistics tracked during simulation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub total_crimes: u64,
    pub total_arrests: u64,
    pub total_murders: u64,
    pub total_releases: u64,
    pub total_desistances: u64,
    pub total_links: u64,
    pub peak_criminals: usize,
    pub peak_incarcerated: usize,
    /// Crime turns skipped after an error
    pub failed_turns: u64,
}

/// Main simulation state
pub struct CrimeSocietyModel {
    pub params: SimulationParams,
    population: Population,
    rng: ChaCha8Rng,
    tick: SimTick,
    seed: u64,
    culture: Box<dyn CulturalAffinity>,
    snapshots: Vec<PopulationSnapshot>,
    history: Vec<StepStats>,
    /// Simulation statistics
    pub stats: SimulationStats,
    pub activity_log: ActivityLog,
}

impl CrimeSocietyModel {
    /// Sample a population of `params.num_agents` people and take the initial snapshot
    pub fn new(params: SimulationParams, seed: u64) -> Result<Self> {
        params.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (wealth, wages) = setup_economy(params.num_agents, params.wage_mode, params.r_w, &params.economy, &mut rng)?;
        Self::build(params, wealth, wages, rng, seed)
    }

    /// Build from externally supplied wealth and wage arrays (same length)
    pub fn from_economy(params: SimulationParams, wealth: Vec<f64>, wages: Vec<f64>, seed: u64) -> Result<Self> {
        params.validate()?;
        if wealth.len() != wages.len() {
            return Err(SimulationError::Configuration(format!(
                "{} wealth values but {} wages",
                wealth.len(),
                wages.len()
            )));
        }
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::build(params, wealth, wages, rng, seed)
    }

    /// Build around a ready population and a custom affinity function
    pub fn from_population(
        params: SimulationParams,
        population: Population,
        culture: Box<dyn CulturalAffinity>,
        seed: u64,
    ) -> Result<Self> {
        params.validate()?;
        let snapshots = vec![PopulationSnapshot::capture(SimTick(0), &population)];
        Ok(CrimeSocietyModel {
            params,
            population,
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick: SimTick(0),
            seed,
            culture,
            snapshots,
            history: Vec::new(),
            stats: SimulationStats::default(),
            activity_log: ActivityLog::new(),
        })
    }

    fn build(params: SimulationParams, wealth: Vec<f64>, wages: Vec<f64>, mut rng: ChaCha8Rng, seed: u64) -> Result<Self> {
        let table = CulturalTable::default();
        let mut population = Population::new();
        for (i, (w, wage)) in wealth.into_iter().zip(wages).enumerate() {
            let culture = table.assign(&mut rng)?;
            let person = Person::random(PersonId(i as u32), culture, w, wage, &params.demographics, &mut rng)?;
            population.push(person)?;
        }

        tracing::info!(
            people = population.len(),
            seed,
            wage_mode = %params.wage_mode,
            total_wealth = population.total_wealth(),
            "crime society initialized"
        );

        let snapshots = vec![PopulationSnapshot::capture(SimTick(0), &population)];
        Ok(CrimeSocietyModel {
            params,
            population,
            rng,
            tick: SimTick(0),
            seed,
            culture: Box::new(table),
            snapshots,
            history: Vec::new(),
            stats: SimulationStats::default(),
            activity_log: ActivityLog::new(),
        })
    }

    /// Run a single simulation tick
    pub fn step(&mut self) -> Result<&StepStats> {
        self.tick = self.tick.next();
        let mut stats = StepStats {
            tick: self.tick,
            ..StepStats::default()
        };

        let mut order: Vec<usize> = (0..self.population.len()).collect();
        order.shuffle(&mut self.rng);

        self.pay_wages(&order);
        stats.transfers = self.exchange_wealth()?;

        let outcomes = self.criminal_activity(&order)?;
        stats.crimes = outcomes.len();
        stats.arrests = outcomes
            .iter()
            .filter(|o| matches!(o.resolution, CrimeResolution::Caught { .. }))
            .count();
        stats.murders = outcomes.iter().filter(|o| o.resolution.is_murder()).count();

        let releases = self.update_incarceration(&order)?;
        stats.releases = releases.len();
        stats.desistances = releases.iter().filter(|(_, desisted)| *desisted).count();

        self.age_population();
        stats.new_links = self.form_associations(&order)?;

        self.finish_step(stats);
        let last = self.history.len() - 1;
        Ok(&self.history[last])
    }

    /// Run `steps` ticks
    pub fn run(&mut self, steps: u64) -> Result<()> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Phase 1: everyone outside prison earns their wage
    pub fn pay_wages(&mut self, order: &[usize]) {
        for &slot in order {
            let person = self.population.at_mut(slot);
            if !person.incarcerated {
                person.wealth += person.wage;
            }
        }
    }

    /// Phase 2: `n / 2` random pairs exchange wealth. Returns the number of transfers.
    pub fn exchange_wealth(&mut self) -> Result<usize> {
        let n = self.population.len();
        if n < 2 {
            return Ok(0);
        }
        let mut transfers = 0;
        for _ in 0..n / 2 {
            let pair = index::sample(&mut self.rng, n, 2);
            let (a, b) = (pair.index(0), pair.index(1));
            if let Some((pa, pb)) = self.population.pair_mut(a, b) {
                if biased_wealth_transfer(pa, pb, &self.params.economy, &mut self.rng)?.is_some() {
                    transfers += 1;
                }
            }
        }
        Ok(transfers)
    }

    /// Phase 3: one crime turn per free person, in tick order
    pub fn criminal_activity(&mut self, order: &[usize]) -> Result<Vec<CrimeOutcome>> {
        let mut outcomes = Vec::new();
        for &slot in order {
            if !self.population.at(slot).can_offend() {
                continue;
            }
            match step_criminal_activity(&mut self.population, slot, order, &self.params, &mut self.rng) {
                Ok(Some(outcome)) => {
                    self.activity_log.log_crime(self.tick, &outcome);
                    outcomes.push(outcome);
                }
                Ok(None) => {}
                Err(e) if self.params.isolate_agent_failures => {
                    let person = self.population.at(slot).id;
                    tracing::warn!(%person, error = %e, "crime turn failed, skipping");
                    self.stats.failed_turns += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outcomes)
    }

    /// Phase 4: count down sentences. Returns released people and whether they desisted.
    pub fn update_incarceration(&mut self, order: &[usize]) -> Result<Vec<(PersonId, bool)>> {
        let mut released = Vec::new();
        for &slot in order {
            let person = self.population.at_mut(slot);
            if let IncarcerationEvent::Released { desisted, immune } =
                step_incarceration(person, &self.params.law, &mut self.rng)?
            {
                let id = person.id;
                if desisted {
                    self.activity_log.log_desistance(self.tick, id, immune);
                }
                released.push((id, desisted));
            }
        }
        Ok(released)
    }

    /// Phase 5: one year older on year boundaries
    pub fn age_population(&mut self) {
        if !self.tick.is_year_boundary() {
            return;
        }
        let recompute = self.params.demographics.recompute_muscle_on_aging;
        for person in self.population.iter_mut() {
            person.age += 1;
            if recompute {
                person.muscle_mass = muscle_mass_at_age(person.age, person.muscle_mass_initial);
            }
        }
    }

    /// Phase 6: criminals bond. Returns the number of new links.
    pub fn form_associations(&mut self, order: &[usize]) -> Result<usize> {
        let links = form_associations(&mut self.population, order, self.culture.as_ref(), &self.params.association)?;
        Ok(links.len())
    }

    /// Phase 7: aggregate, snapshot, reset per-step markers
    fn finish_step(&mut self, mut stats: StepStats) {
        let free: Vec<f64> = self
            .population
            .iter()
            .filter(|p| !p.incarcerated)
            .map(|p| p.wealth)
            .collect();
        stats.mean_wealth = if free.is_empty() {
            0.0
        } else {
            free.iter().sum::<f64>() / free.len() as f64
        };
        stats.total_wealth = self.population.total_wealth();
        for person in self.population.iter() {
            match person.criminal_status {
                CriminalStatus::NonCriminal => {}
                CriminalStatus::Petty => stats.num_petty += 1,
                CriminalStatus::Organized => stats.num_organized += 1,
                CriminalStatus::Vory => stats.num_vory += 1,
            }
            if person.incarcerated {
                stats.num_incarcerated += 1;
            }
        }
        stats.num_criminals = stats.num_petty + stats.num_organized + stats.num_vory;

        self.stats.total_crimes += stats.crimes as u64;
        self.stats.total_arrests += stats.arrests as u64;
        self.stats.total_murders += stats.murders as u64;
        self.stats.total_releases += stats.releases as u64;
        self.stats.total_desistances += stats.desistances as u64;
        self.stats.total_links += stats.new_links as u64;
        self.stats.peak_criminals = self.stats.peak_criminals.max(stats.num_criminals);
        self.stats.peak_incarcerated = self.stats.peak_incarcerated.max(stats.num_incarcerated);

        tracing::info!(
            tick = self.tick.0,
            mean_wealth = stats.mean_wealth,
            criminals = stats.num_criminals,
            incarcerated = stats.num_incarcerated,
            crimes = stats.crimes,
            arrests = stats.arrests,
            new_links = stats.new_links,
            "step complete"
        );

        self.snapshots.push(PopulationSnapshot::capture(self.tick, &self.population));
        for person in self.population.iter_mut() {
            person.reset_step_counters();
        }
        self.history.push(stats);
    }

    /// Serializable view of the current population
    pub fn snapshot(&self) -> PopulationSnapshot {
        PopulationSnapshot::capture(self.tick, &self.population)
    }

    /// Initial snapshot followed by one per completed tick
    pub fn snapshots(&self) -> &[PopulationSnapshot] {
        &self.snapshots
    }

    pub fn history(&self) -> &[StepStats] {
        &self.history
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn current_tick(&self) -> SimTick {
        self.tick
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Build a model and run it for `num_ticks`
pub fn run_simulation(params: SimulationParams, seed: u64, num_ticks: u64) -> Result<CrimeSocietyModel> {
    let mut model = CrimeSocietyModel::new(params, seed)?;
    model.run(num_ticks)?;
    Ok(model)
}
