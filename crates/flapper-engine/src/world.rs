//! Fixed dimensions and physics of the game world.
//!
//! All distances are in screen pixels and all speeds in pixels per tick. The y
//! axis grows downwards, so a jump sets a negative velocity.

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Horizontal position of every agent.
pub const AGENT_X: f32 = 50.0;
/// Agent diameter, used as the look-ahead margin when picking the nearest obstacle.
pub const AGENT_SIZE: f32 = 30.0;
/// Effective collision radius, slightly smaller than the drawn agent.
pub const AGENT_RADIUS: f32 = (AGENT_SIZE - 2.0) / 2.0;
pub const AGENT_ABS_VELOCITY_LIMIT: f32 = 100.0;
/// Magnitude of the upward impulse applied by a jump.
pub const JUMP_VELOCITY: f32 = 10.0;
pub const GRAVITY: f32 = 1.0;
/// Outputs above this threshold make the agent jump.
pub const JUMP_THRESHOLD: f32 = 0.5;

pub const DEFAULT_GAP_HEIGHT: f32 = 120.0;
pub const MIN_GAP_HEIGHT: f32 = 120.0;
pub const MAX_GAP_HEIGHT: f32 = SCREEN_HEIGHT;
pub const OBSTACLE_WIDTH: f32 = 40.0;
pub const OBSTACLE_SPEED: f32 = 2.0;
/// Horizontal distance kept between the trailing obstacle and the right edge before spawning.
pub const OBSTACLE_SPACING: f32 = 150.0;
/// Obstacles retire once their right edge is this far left of the screen.
pub const OBSTACLE_RETIRE_MARGIN: f32 = 5.0;
