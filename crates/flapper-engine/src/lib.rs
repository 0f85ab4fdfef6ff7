//! Game world for flapper agents: physics, obstacles, and collisions.
//!
//! This crate models the auto-scrolling obstacle course independently of any
//! learning. It provides:
//!
//! - [`Agent`] - a player with position, velocity, fitness, and its own brain
//! - [`Obstacle`] - a pair of barriers with a gap, scrolling leftwards
//! - [`ObstacleField`] - the rolling set of obstacles (spawning, retiring, lookup)
//! - [`geometry`] - rectangle/circle intersection used for collisions
//! - [`SimulationSeed`] - seed for the single deterministic random stream
//! - [`world`] - screen dimensions and physics constants
//!
//! # Tick Model
//!
//! One tick of the world:
//!
//! 1. [`ObstacleField::tick`] scrolls obstacles, retires old ones, spawns new ones
//! 2. [`ObstacleField::nearest_ahead_of`] picks the obstacle each agent reacts to
//! 3. The caller kills agents on the screen boundary or touching the obstacle
//! 4. [`Agent::update`] lets surviving agents decide, move, and score
//!
//! Collision checks and death are the caller's responsibility (see the
//! `flapper-training` crate), keeping agents free of population bookkeeping.

pub use self::{
    agent::*, geometry::Point, obstacle::*, obstacle_field::*, seed::*, world::*,
};

mod agent;
pub mod geometry;
mod obstacle;
mod obstacle_field;
mod seed;
pub mod world;
