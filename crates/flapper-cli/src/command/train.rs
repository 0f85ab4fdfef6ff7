use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use flapper_brain::Brain as _;
use flapper_engine::SimulationSeed;
use flapper_training::{Simulation, SimulationConfig};
use rand::Rng as _;
use tracing::{info, warn};

use crate::{model::BrainModel, util};

const MAX_FRAMES: u64 = 200_000;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Simulation config file (JSON format); flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of agents per generation
    #[arg(long)]
    population: Option<usize>,
    /// Vertical size of each obstacle's gap
    #[arg(long)]
    gap_height: Option<f32>,
    /// Simulation steps per frame
    #[arg(long)]
    speed: Option<usize>,
    /// Seed as 32 hex characters (random if omitted)
    #[arg(long)]
    seed: Option<SimulationSeed>,
    /// Number of generations to complete
    #[arg(long, default_value_t = 50)]
    generations: usize,
    /// Stop after this many frames even if generations remain
    #[arg(long, default_value_t = MAX_FRAMES)]
    max_frames: u64,
    /// Brain model file to add to the first generation (repeatable)
    #[arg(long = "import")]
    imports: Vec<PathBuf>,
    /// Name stored in the saved model
    #[arg(long, default_value = "flapper")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let TrainArg {
        config,
        population,
        gap_height,
        speed,
        seed,
        generations,
        max_frames,
        imports,
        name,
        output,
    } = arg;

    let mut config = match config {
        Some(path) => util::read_config_file(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(population) = population {
        config.population_size = *population;
    }
    if let Some(gap_height) = gap_height {
        config.gap_height = *gap_height;
    }
    if let Some(speed) = speed {
        config.speed = *speed;
    }

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!(
        %seed,
        population = config.population_size,
        gap_height = config.gap_height,
        speed = config.speed,
        "starting training"
    );
    let mut simulation: Simulation =
        Simulation::new(config, seed).context("Invalid configuration")?;

    for path in imports {
        let model = util::read_brain_model_file(path)?;
        simulation
            .import_brain(&model.brain)
            .with_context(|| format!("Failed to import brain from {}", path.display()))?;
        info!(name = model.name, fitness = model.fitness, "imported brain model");
    }

    let summaries = simulation.run_generations(*generations, *max_frames);
    if summaries.len() < *generations {
        warn!(
            completed = summaries.len(),
            requested = generations,
            max_frames,
            "frame limit reached before all generations completed"
        );
    }

    let best = simulation
        .best_agent()
        .context("No agent available to export")?;
    let model = BrainModel {
        name: name.clone(),
        exported_at: Utc::now(),
        generation: simulation.generation(),
        fitness: best.fitness(),
        brain: best.brain().serialize(),
    };
    util::write_json(&model, output.as_deref())?;

    info!(
        name = model.name,
        generation = model.generation,
        fitness = model.fitness,
        path = output.as_ref().map(|path| path.display().to_string()),
        "model saved"
    );

    Ok(())
}
