//! Export simulation state to JSON

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::simulation::activity_log::ActivityStats;
use crate::simulation::error::{Result, SimulationError};
use crate::simulation::params::SimulationParams;
use crate::simulation::simulation::{CrimeSocietyModel, SimulationStats, StepStats};
use crate::simulation::snapshot::PopulationSnapshot;
use crate::simulation::types::SimTick;

/// Exported simulation data
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationExport {
    pub generated_at: String,
    pub seed: u64,
    pub final_tick: SimTick,
    pub params: SimulationParams,
    pub stats: SimulationStats,
    pub activity: ActivityStats,
    pub history: Vec<StepStats>,
    pub snapshots: Vec<PopulationSnapshot>,
}

/// Export simulation state to JSON file
pub fn export_simulation<P: AsRef<Path>>(model: &CrimeSocietyModel, path: P) -> Result<()> {
    let path = path.as_ref();
    let export = create_export(model);
    let json = serde_json::to_string_pretty(&export)
        .map_err(|e| SimulationError::Export(format!("serialize: {}", e)))?;

    let mut file = File::create(path)
        .map_err(|e| SimulationError::Export(format!("create {}: {}", path.display(), e)))?;
    file.write_all(json.as_bytes())
        .map_err(|e| SimulationError::Export(format!("write {}: {}", path.display(), e)))?;

    Ok(())
}

/// Create export structure from simulation state
pub fn create_export(model: &CrimeSocietyModel) -> SimulationExport {
    SimulationExport {
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        seed: model.seed(),
        final_tick: model.current_tick(),
        params: model.params.clone(),
        stats: model.stats.clone(),
        activity: model.activity_log.stats.clone(),
        history: model.history().to_vec(),
        snapshots: model.snapshots().to_vec(),
    }
}

/// Generate a summary text report of the simulation
pub fn generate_summary(model: &CrimeSocietyModel) -> String {
    let mut summary = String::new();

    summary.push_str(&format!(
        "=== Simulation Summary (Seed: {}) ===\n",
        model.seed()
    ));
    summary.push_str(&format!(
        "Duration: {} years ({} months)\n\n",
        model.current_tick().year(),
        model.current_tick().0
    ));

    let stats = &model.stats;
    summary.push_str("--- Statistics ---\n");
    summary.push_str(&format!(
        "Crimes: {} committed, {} arrests, {} murders\n",
        stats.total_crimes, stats.total_arrests, stats.total_murders
    ));
    summary.push_str(&format!(
        "Prison: {} releases, {} desisted, peak {} inmates\n",
        stats.total_releases, stats.total_desistances, stats.peak_incarcerated
    ));
    summary.push_str(&format!(
        "Network: {} links, peak {} criminals\n",
        stats.total_links, stats.peak_criminals
    ));

    if let Some(last) = model.history().last() {
        summary.push_str(&format!(
            "Now: mean wealth {:.2}, {} petty, {} organized, {} vory\n",
            last.mean_wealth, last.num_petty, last.num_organized, last.num_vory
        ));
    }

    let events = model.activity_log.important_entries(5);
    if !events.is_empty() {
        summary.push_str("\n--- Notable Events ---\n");
        for entry in events {
            summary.push_str(&format!(
                "  [{}] {}: {}\n",
                entry.category.label(),
                entry.tick,
                entry.message
            ));
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_round_trips_through_json() {
        let mut model = CrimeSocietyModel::new(SimulationParams::fast_test(), 21).unwrap();
        model.run(3).unwrap();

        let path = std::env::temp_dir().join(format!("crime_society_export_{}.json", std::process::id()));
        export_simulation(&model, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let parsed: SimulationExport = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.seed, 21);
        assert_eq!(parsed.final_tick, SimTick(3));
        assert_eq!(parsed.snapshots.len(), 4);
        assert_eq!(parsed.history.len(), 3);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let model = CrimeSocietyModel::new(SimulationParams::fast_test(), 1).unwrap();
        let result = export_simulation(&model, "/nonexistent-dir/out.json");
        assert!(matches!(result, Err(SimulationError::Export(_))));
    }

    #[test]
    fn test_summary_mentions_seed() {
        let mut model = CrimeSocietyModel::new(SimulationParams::fast_test(), 8).unwrap();
        model.run(2).unwrap();
        let summary = generate_summary(&model);
        assert!(summary.contains("Seed: 8"));
        assert!(summary.contains("mean wealth"));
    }
}
