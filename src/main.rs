use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crime_society::simulation::{
    export_simulation, generate_summary, CrimeSocietyModel, SimulationParams, WageMode,
};

#[derive(Parser, Debug)]
#[command(name = "crime_society")]
#[command(about = "Simulate a society month by month and watch organized crime emerge")]
struct Args {
    /// Number of people (overrides the config file)
    #[arg(short = 'n', long)]
    agents: Option<usize>,

    /// Number of monthly steps to run
    #[arg(long, default_value = "120")]
    steps: u64,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Wage mode: A (independent Pareto) or B (share of wealth)
    #[arg(long)]
    wage_mode: Option<WageMode>,

    /// Wage-to-wealth ratio for wage mode B
    #[arg(long)]
    r_w: Option<f64>,

    /// JSON file with simulation parameters
    #[arg(short, long)]
    config: Option<String>,

    /// Export snapshots and statistics to a JSON file
    #[arg(short, long)]
    export: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "simulation failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> crime_society::simulation::Result<()> {
    let mut params = match &args.config {
        Some(path) => SimulationParams::from_json_file(path)?,
        None => SimulationParams::default(),
    };
    if let Some(n) = args.agents {
        params.num_agents = n;
    }
    if let Some(mode) = args.wage_mode {
        params.wage_mode = mode;
    }
    if let Some(r_w) = args.r_w {
        params.r_w = r_w;
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut model = CrimeSocietyModel::new(params, seed)?;
    model.run(args.steps)?;

    println!("{}", generate_summary(&model));

    if let Some(path) = &args.export {
        export_simulation(&model, path)?;
        tracing::info!(path = %path, "exported simulation");
    }
    Ok(())
}
