use flapper_brain::{Brain, BrainError, Perceptron};
use flapper_engine::{AGENT_SIZE, AGENT_X, Agent, ObstacleField, SimulationSeed};
use rand_pcg::Pcg32;
use tracing::{debug, info};

use crate::{
    config::{self, ConfigError, SimulationConfig},
    population::{GenerationSummary, Population, ReproduceError},
    snapshot::Snapshot,
};

/// Everything a running simulation owns: configuration, random stream,
/// obstacles, and population.
///
/// Each call to [`Simulation::tick`] is one frame. A frame either runs
/// `speed` simulation steps, or, when the population is extinct, resets the
/// obstacles and breeds the next generation instead.
///
/// # Example
///
/// ```
/// use flapper_engine::SimulationSeed;
/// use flapper_training::{Simulation, SimulationConfig};
///
/// let config = SimulationConfig {
///     population_size: 20,
///     ..SimulationConfig::default()
/// };
/// let seed = SimulationSeed::from_bytes([7; 16]);
/// let mut simulation: Simulation = Simulation::new(config, seed).unwrap();
///
/// while simulation.generation() < 2 {
///     simulation.tick();
/// }
/// assert_eq!(simulation.population().len(), 20);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation<B = Perceptron> {
    config: SimulationConfig,
    seed: SimulationSeed,
    rng: Pcg32,
    field: ObstacleField,
    population: Population<B>,
    frame: u64,
}

impl<B> Simulation<B>
where
    B: Brain,
{
    pub fn new(config: SimulationConfig, seed: SimulationSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = seed.rng();
        let field = ObstacleField::new(&mut rng, config.gap_height);
        let population = Population::new(&mut rng, config.population_size);
        Ok(Self {
            config,
            seed,
            rng,
            field,
            population,
            frame: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> SimulationSeed {
        self.seed
    }

    #[must_use]
    pub fn population(&self) -> &Population<B> {
        &self.population
    }

    #[must_use]
    pub fn field(&self) -> &ObstacleField {
        &self.field
    }

    /// Number of frames run so far.
    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.population.generation()
    }

    /// Sets the number of agents bred for each following generation.
    pub fn set_population_size(&mut self, value: usize) -> Result<(), ConfigError> {
        config::validate_population_size(value)?;
        self.config.population_size = value;
        self.population.set_size(value);
        Ok(())
    }

    /// Sets the gap height of obstacles spawned from now on.
    pub fn set_gap_height(&mut self, value: f32) -> Result<(), ConfigError> {
        config::validate_gap_height(value)?;
        self.config.gap_height = value;
        Ok(())
    }

    /// Sets the number of simulation steps per frame.
    pub fn set_speed(&mut self, value: usize) -> Result<(), ConfigError> {
        config::validate_speed(value)?;
        self.config.speed = value;
        Ok(())
    }

    /// Runs one frame.
    ///
    /// Returns the summary of the finished generation when the frame was spent
    /// on reproduction.
    pub fn tick(&mut self) -> Option<GenerationSummary> {
        self.frame += 1;

        if self.population.is_empty() {
            self.field.reset(&mut self.rng, self.config.gap_height);
            let summary = match self.population.reproduce(&mut self.rng) {
                Ok(summary) => summary,
                Err(ReproduceError::StillAlive { .. }) => {
                    unreachable!("reproducing a population checked to be extinct")
                }
            };
            info!(
                generation = summary.generation,
                best = summary.best_fitness,
                mean = summary.mean_fitness,
                all_time_best = summary.all_time_best,
                "generation finished"
            );
            return Some(summary);
        }

        for _ in 0..self.config.speed {
            self.step();
        }
        None
    }

    /// Runs frames until `generations` more generations have finished, or
    /// `max_frames` frames have passed.
    pub fn run_generations(&mut self, generations: usize, max_frames: u64) -> Vec<GenerationSummary> {
        let mut summaries = Vec::with_capacity(generations);
        let mut frames = 0;
        while summaries.len() < generations && frames < max_frames {
            if let Some(summary) = self.tick() {
                summaries.push(summary);
            }
            frames += 1;
        }
        summaries
    }

    fn step(&mut self) {
        self.field.tick(&mut self.rng, self.config.gap_height);
        let nearest = self.field.nearest_ahead_of(AGENT_X, AGENT_SIZE);
        self.population.update(nearest);
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.frame, &self.population, &self.field)
    }

    /// Adds a live agent driven by a serialized brain to the current generation.
    pub fn import_brain(&mut self, blob: &str) -> Result<(), BrainError> {
        let brain = B::deserialize(blob)?;
        debug!(generation = self.generation(), "imported brain");
        self.population.add(Agent::new(brain));
        Ok(())
    }

    /// The agent worth exporting: the best live agent, or the all-time best
    /// between generations.
    #[must_use]
    pub fn best_agent(&self) -> Option<&Agent<B>> {
        self.population
            .current_best()
            .or_else(|| self.population.bests().first())
    }

    /// Serializes the brain of [`Simulation::best_agent`].
    #[must_use]
    pub fn export_best(&self) -> Option<String> {
        self.best_agent().map(|agent| agent.brain().serialize())
    }
}

/// Plays a single brain on a fresh obstacle course and returns its fitness.
///
/// The run stops when the agent dies or after `max_ticks` ticks.
pub fn evaluate<B>(brain: B, gap_height: f32, seed: SimulationSeed, max_ticks: u64) -> u64
where
    B: Brain,
{
    let mut rng = seed.rng();
    let mut field = ObstacleField::new(&mut rng, gap_height);
    let mut population = Population::empty(1);
    population.add(Agent::new(brain));

    let mut ticks = 0;
    while !population.is_empty() && ticks < max_ticks {
        field.tick(&mut rng, gap_height);
        population.update(field.nearest_ahead_of(AGENT_X, AGENT_SIZE));
        ticks += 1;
    }

    population
        .agents()
        .iter()
        .chain(population.dead())
        .map(Agent::fitness)
        .max()
        .unwrap_or(0)
}
