use flapper_brain::{Brain, Perceptron};
use flapper_engine::{Agent, Obstacle};
use rand::{Rng, seq::IndexedRandom as _};
use tracing::debug;

use crate::inheritance;

/// Number of all-time best agents kept as donors.
pub const BEST_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ReproduceError {
    #[display("cannot reproduce while {remaining} agents are still alive")]
    StillAlive { remaining: usize },
}

/// Fitness summary of a generation that just went extinct.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct GenerationSummary {
    /// Index of the finished generation.
    pub generation: usize,
    pub agents: usize,
    pub best_fitness: u64,
    pub mean_fitness: f64,
    /// Best fitness ever recorded, including this generation.
    pub all_time_best: u64,
}

/// The agents of the current generation plus the all-time bests.
///
/// A generation goes through two phases:
///
/// 1. **Alive** - [`Population::update`] moves agents and kills the ones that
///    hit the screen boundary or an obstacle, moving them to the dead set
/// 2. **Extinct** - no live agent remains; [`Population::reproduce`] merges
///    the dead into the bests and breeds the next generation from them
///
/// Within a generation, live plus dead agents never exceed
/// [`Population::capacity`]: the configured size at the start of the
/// generation plus any agents added manually with [`Population::add`].
#[derive(Debug, Clone)]
pub struct Population<B = Perceptron> {
    size: usize,
    capacity: usize,
    agents: Vec<Agent<B>>,
    dead: Vec<Agent<B>>,
    bests: Vec<Agent<B>>,
    generation: usize,
}

impl<B> Population<B>
where
    B: Brain,
{
    /// Creates generation 0 with `size` randomly initialized agents.
    pub fn new<R>(rng: &mut R, size: usize) -> Self
    where
        R: Rng + ?Sized,
    {
        let agents = (0..size).map(|_| Agent::random(rng)).collect();
        Self {
            size,
            capacity: size,
            agents,
            dead: vec![],
            bests: vec![],
            generation: 0,
        }
    }

    /// Creates a population with no agents at all, to be filled with [`Population::add`].
    #[must_use]
    pub fn empty(size: usize) -> Self {
        Self {
            size,
            capacity: 0,
            agents: vec![],
            dead: vec![],
            bests: vec![],
            generation: 0,
        }
    }

    /// Configured number of agents per generation.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Changes the configured size; takes effect at the next reproduction.
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live agents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether the current generation is extinct.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent<B>] {
        &self.agents
    }

    /// Agents that died during the current generation.
    #[must_use]
    pub fn dead(&self) -> &[Agent<B>] {
        &self.dead
    }

    /// All-time best agents, best first.
    #[must_use]
    pub fn bests(&self) -> &[Agent<B>] {
        &self.bests
    }

    /// Adds a live agent to the current generation, growing its capacity.
    pub fn add(&mut self, agent: Agent<B>) {
        self.capacity += 1;
        self.agents.push(agent);
    }

    /// The live agent with the highest fitness; the first one wins ties.
    #[must_use]
    pub fn current_best(&self) -> Option<&Agent<B>> {
        self.agents.iter().reduce(|best, agent| {
            if agent.fitness() > best.fitness() {
                agent
            } else {
                best
            }
        })
    }

    /// Best fitness seen so far, among live agents and the all-time bests.
    #[must_use]
    pub fn best_score(&self) -> u64 {
        let current = self.current_best().map_or(0, Agent::fitness);
        let historical = self.bests.first().map_or(0, Agent::fitness);
        current.max(historical)
    }

    /// Runs one step for every live agent.
    ///
    /// Agents on the screen boundary or touching `nearest` die and move to the
    /// dead set; the others update. With no obstacle ahead, no collision is
    /// checked.
    pub fn update(&mut self, nearest: Option<&Obstacle>) {
        let mut survivors = Vec::with_capacity(self.agents.len());
        for mut agent in self.agents.drain(..) {
            let collided =
                nearest.is_some_and(|obstacle| obstacle.collides_with(agent.position(), agent.radius()));
            if agent.is_at_boundary() || collided {
                agent.die();
                self.dead.push(agent);
                continue;
            }
            agent.update(nearest);
            survivors.push(agent);
        }
        self.agents = survivors;
    }

    /// Replaces the extinct generation with a new one bred from the bests.
    ///
    /// 1. Merge the dead agents into the bests, keep the top [`BEST_COUNT`] by fitness
    /// 2. Breed [`Population::size`] children, each from one uniformly chosen best
    ///    (see [`inheritance::breed`]); without any best, children are random
    /// 3. Clear the dead set and advance the generation counter
    ///
    /// Fails without touching the population if agents are still alive.
    pub fn reproduce<R>(&mut self, rng: &mut R) -> Result<GenerationSummary, ReproduceError>
    where
        R: Rng + ?Sized,
    {
        if !self.agents.is_empty() {
            return Err(ReproduceError::StillAlive {
                remaining: self.agents.len(),
            });
        }

        let best_fitness = self.dead.iter().map(Agent::fitness).max().unwrap_or(0);
        #[expect(clippy::cast_precision_loss)]
        let mean_fitness = if self.dead.is_empty() {
            0.0
        } else {
            self.dead.iter().map(Agent::fitness).sum::<u64>() as f64 / self.dead.len() as f64
        };
        let agents = self.dead.len();

        self.bests.append(&mut self.dead);
        self.bests.sort_by_key(|agent| std::cmp::Reverse(agent.fitness()));
        self.bests.truncate(BEST_COUNT);
        debug!(
            generation = self.generation,
            bests = ?self.bests.iter().map(Agent::fitness).collect::<Vec<_>>(),
            "selected donors"
        );

        let bests = &self.bests;
        let children = (0..self.size)
            .map(|_| {
                let donor = bests.choose(rng).map(Agent::brain);
                Agent::new(inheritance::breed(rng, donor))
            })
            .collect();

        let summary = GenerationSummary {
            generation: self.generation,
            agents,
            best_fitness,
            mean_fitness,
            all_time_best: self.bests.first().map_or(0, Agent::fitness),
        };

        self.agents = children;
        self.capacity = self.size;
        self.generation += 1;
        Ok(summary)
    }
}
