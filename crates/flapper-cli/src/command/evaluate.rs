use std::path::PathBuf;

use flapper_brain::Perceptron;
use flapper_engine::{DEFAULT_GAP_HEIGHT, SimulationSeed};
use flapper_training::SimulationConfig;
use rand::Rng as _;
use serde::Serialize;
use tracing::info;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Path to the brain model file (JSON format)
    #[arg(long)]
    model: PathBuf,
    /// Vertical size of each obstacle's gap
    #[arg(long, default_value_t = DEFAULT_GAP_HEIGHT)]
    gap_height: f32,
    /// Seed as 32 hex characters (random if omitted)
    #[arg(long)]
    seed: Option<SimulationSeed>,
    /// Stop the run after this many ticks
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    model: String,
    seed: SimulationSeed,
    gap_height: f32,
    max_ticks: u64,
    fitness: u64,
    /// Whether the agent was still alive when the run stopped.
    survived: bool,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let EvaluateArg {
        model,
        gap_height,
        seed,
        max_ticks,
    } = arg;

    SimulationConfig {
        gap_height: *gap_height,
        ..SimulationConfig::default()
    }
    .validate()?;

    let model = util::read_brain_model_file(model)?;
    let brain: Perceptron = model.to_brain()?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());

    let fitness = flapper_training::evaluate(brain, *gap_height, seed, *max_ticks);
    info!(name = model.name, %seed, fitness, "evaluation finished");

    let report = EvaluationReport {
        model: model.name,
        seed,
        gap_height: *gap_height,
        max_ticks: *max_ticks,
        fitness,
        survived: fitness >= *max_ticks,
    };
    util::write_json(&report, None)
}
