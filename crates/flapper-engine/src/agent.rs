use flapper_brain::{Brain, Inputs, Perceptron};
use rand::Rng;

use crate::{
    geometry::Point,
    obstacle::Obstacle,
    world::{
        AGENT_ABS_VELOCITY_LIMIT, AGENT_RADIUS, AGENT_X, GRAVITY, JUMP_THRESHOLD, JUMP_VELOCITY,
        SCREEN_HEIGHT, SCREEN_WIDTH,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum AgentState {
    Alive,
    Dead,
}

/// Sensor readings and brain output from the most recent update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub inputs: Inputs,
    pub output: f32,
}

impl Decision {
    #[must_use]
    pub fn jumped(&self) -> bool {
        self.output > JUMP_THRESHOLD
    }
}

/// A single player controlled by its own brain.
///
/// The agent never checks collisions or its own death conditions; the population
/// does that before each update and calls [`Agent::die`].
#[derive(Debug, Clone)]
pub struct Agent<B = Perceptron> {
    x: f32,
    y: f32,
    velocity: f32,
    fitness: u64,
    state: AgentState,
    brain: B,
    last_decision: Option<Decision>,
}

impl<B> Agent<B>
where
    B: Brain,
{
    /// Creates a live agent at the start position, vertically centered.
    #[must_use]
    pub fn new(brain: B) -> Self {
        Self {
            x: AGENT_X,
            y: SCREEN_HEIGHT / 2.0,
            velocity: 0.0,
            fitness: 0,
            state: AgentState::Alive,
            brain,
            last_decision: None,
        }
    }

    pub fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::new(B::random(rng))
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.y
    }

    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn radius(&self) -> f32 {
        AGENT_RADIUS
    }

    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Number of ticks survived.
    #[must_use]
    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    #[must_use]
    pub fn state(&self) -> AgentState {
        self.state
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.state.is_alive()
    }

    #[must_use]
    pub fn brain(&self) -> &B {
        &self.brain
    }

    #[must_use]
    pub fn into_brain(self) -> B {
        self.brain
    }

    #[must_use]
    pub fn last_decision(&self) -> Option<&Decision> {
        self.last_decision.as_ref()
    }

    /// Whether the agent sits on the floor or the ceiling of the screen.
    #[must_use]
    pub fn is_at_boundary(&self) -> bool {
        self.y <= 0.0 || self.y >= SCREEN_HEIGHT
    }

    /// Normalized sensor readings against `obstacle`.
    ///
    /// Without an obstacle ahead the agent sees an open screen.
    #[must_use]
    pub fn sense(&self, obstacle: Option<&Obstacle>) -> Inputs {
        let (gap_top, gap_bottom, obstacle_x) = obstacle.map_or((0.0, 1.0, 1.0), |o| {
            (
                o.gap_top() / SCREEN_HEIGHT,
                o.gap_bottom() / SCREEN_HEIGHT,
                o.x() / SCREEN_WIDTH,
            )
        });
        [
            self.y / SCREEN_HEIGHT,
            self.velocity / (AGENT_ABS_VELOCITY_LIMIT * 2.0) + 0.5,
            gap_top,
            gap_bottom,
            obstacle_x,
        ]
    }

    /// Advances the agent by one tick. Dead agents are left untouched.
    ///
    /// 1. Let the brain decide whether to jump
    /// 2. Count the tick towards fitness
    /// 3. Move by the current velocity, then apply gravity within the velocity limit
    /// 4. Clamp to the screen, stopping the agent on the floor or ceiling
    pub fn update(&mut self, obstacle: Option<&Obstacle>) {
        if self.state.is_dead() {
            return;
        }

        let inputs = self.sense(obstacle);
        let decision = Decision {
            inputs,
            output: self.brain.decide(&inputs),
        };
        if decision.jumped() {
            self.jump();
        }
        self.last_decision = Some(decision);

        self.fitness += 1;
        self.y += self.velocity;
        self.velocity =
            (self.velocity + GRAVITY).clamp(-AGENT_ABS_VELOCITY_LIMIT, AGENT_ABS_VELOCITY_LIMIT);

        if self.y >= SCREEN_HEIGHT {
            self.y = SCREEN_HEIGHT;
            self.velocity = 0.0;
        }
        if self.y < 0.0 {
            self.y = 0.0;
            self.velocity = 0.0;
        }
    }

    fn jump(&mut self) {
        self.velocity = -JUMP_VELOCITY;
    }

    pub fn die(&mut self) {
        self.state = AgentState::Dead;
    }
}
