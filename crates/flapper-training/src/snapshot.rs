use flapper_brain::{Brain, Inputs};
use flapper_engine::{Agent, OBSTACLE_WIDTH, Obstacle, ObstacleField};
use serde::Serialize;

use crate::population::Population;

/// Read-only view of a simulation frame for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub generation: usize,
    /// Number of live agents.
    pub population_size: usize,
    /// Fitness of the best live agent, if any.
    pub current_best_score: Option<u64>,
    pub all_time_best_score: u64,
    /// Live agents followed by the agents that died this generation.
    pub agents: Vec<AgentView>,
    pub obstacles: Vec<ObstacleView>,
    /// What the highlighted agent saw and decided on its last update.
    pub best_decision: Option<DecisionView>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgentView {
    pub x: f32,
    pub y: f32,
    pub alive: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecisionView {
    pub inputs: Inputs,
    pub output: f32,
    pub jumped: bool,
}

impl Snapshot {
    pub(crate) fn capture<B>(frame: u64, population: &Population<B>, field: &ObstacleField) -> Self
    where
        B: Brain,
    {
        let best = population.current_best();
        let is_best = |agent: &Agent<B>| best.is_some_and(|best| std::ptr::eq(best, agent));

        let agents = population
            .agents()
            .iter()
            .chain(population.dead())
            .map(|agent| AgentView {
                x: agent.x(),
                y: agent.y(),
                alive: agent.is_alive(),
                highlighted: is_best(agent),
            })
            .collect();

        Self {
            frame,
            generation: population.generation(),
            population_size: population.len(),
            current_best_score: best.map(Agent::fitness),
            all_time_best_score: population.best_score(),
            agents,
            obstacles: field.obstacles().map(ObstacleView::from).collect(),
            best_decision: best
                .and_then(Agent::last_decision)
                .map(|decision| DecisionView {
                    inputs: decision.inputs,
                    output: decision.output,
                    jumped: decision.jumped(),
                }),
        }
    }
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            x: obstacle.x(),
            width: OBSTACLE_WIDTH,
            gap_top: obstacle.gap_top(),
            gap_bottom: obstacle.gap_bottom(),
        }
    }
}
