//! Evolutionary loop that trains flapper agents.
//!
//! Agents are not trained by gradient descent. A whole population plays the
//! obstacle course at once, and each agent's fitness is simply the number of
//! ticks it survived. When the last agent dies, the next generation is bred
//! from the best agents seen so far.
//!
//! # How Training Works
//!
//! 1. **Play** - every live agent senses the nearest obstacle, decides whether
//!    to jump, and moves ([`Population::update`])
//! 2. **Eliminate** - agents that touch an obstacle or the screen boundary die
//! 3. **Select** - on extinction, the top [`BEST_COUNT`] agents of all time
//!    become donors ([`Population::reproduce`])
//! 4. **Breed** - each child is a fresh, heavily mutated brain that inherits
//!    most parameters from a single random donor ([`inheritance`])
//! 5. **Repeat** - obstacles reset and the new generation starts playing
//!
//! [`Simulation`] owns all of this state plus the live [`SimulationConfig`]
//! and the single seeded random stream, and exposes read-only [`Snapshot`]s
//! for renderers.
//!
//! # Logging
//!
//! Generation summaries are emitted through `tracing` at `info` level;
//! donor selection and brain imports at `debug` level.

pub use self::{config::*, population::*, simulation::*, snapshot::*};

mod config;
pub mod inheritance;
mod population;
mod simulation;
mod snapshot;
