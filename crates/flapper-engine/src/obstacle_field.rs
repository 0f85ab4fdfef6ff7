use std::collections::VecDeque;

use rand::Rng;

use crate::{
    obstacle::Obstacle,
    world::{OBSTACLE_SPACING, OBSTACLE_WIDTH, SCREEN_WIDTH},
};

/// Rolling set of obstacles, ordered from leftmost (oldest) to rightmost (newest).
///
/// # Example
///
/// ```
/// use flapper_engine::{AGENT_SIZE, AGENT_X, ObstacleField};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let mut rng = Pcg32::seed_from_u64(0);
/// let mut field = ObstacleField::new(&mut rng, 120.0);
/// for _ in 0..200 {
///     field.tick(&mut rng, 120.0);
/// }
/// assert!(field.len() >= 2);
/// assert!(field.nearest_ahead_of(AGENT_X, AGENT_SIZE).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: VecDeque<Obstacle>,
}

impl ObstacleField {
    /// Creates a field holding a single obstacle at the right edge of the screen.
    pub fn new<R>(rng: &mut R, gap_height: f32) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut field = Self::default();
        field.reset(rng, gap_height);
        field
    }

    /// Replaces every obstacle with a single one at the right edge of the screen.
    pub fn reset<R>(&mut self, rng: &mut R, gap_height: f32)
    where
        R: Rng + ?Sized,
    {
        self.obstacles.clear();
        self.spawn(rng, gap_height);
    }

    fn spawn<R>(&mut self, rng: &mut R, gap_height: f32)
    where
        R: Rng + ?Sized,
    {
        self.obstacles
            .push_back(Obstacle::random(rng, SCREEN_WIDTH, gap_height));
    }

    /// Advances the field by one tick.
    ///
    /// Every obstacle scrolls left, obstacles that left the screen are retired,
    /// and a new obstacle (with the given gap height) is appended once the
    /// trailing one is far enough from the right edge.
    pub fn tick<R>(&mut self, rng: &mut R, gap_height: f32)
    where
        R: Rng + ?Sized,
    {
        for obstacle in &mut self.obstacles {
            obstacle.advance();
        }
        while self.obstacles.front().is_some_and(Obstacle::is_retired) {
            self.obstacles.pop_front();
        }

        let needs_spawn = self
            .obstacles
            .back()
            .is_none_or(|last| last.x() < SCREEN_WIDTH - OBSTACLE_SPACING - OBSTACLE_WIDTH);
        if needs_spawn {
            self.spawn(rng, gap_height);
        }
    }

    /// Returns the first obstacle that an agent at `agent_x` has not fully passed.
    ///
    /// An obstacle counts as passed once its right edge plus `margin` is at or
    /// left of the agent. Returns `None` when every obstacle is behind the agent.
    #[must_use]
    pub fn nearest_ahead_of(&self, agent_x: f32, margin: f32) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|obstacle| obstacle.right_edge() + margin > agent_x)
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.obstacles.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::world::{AGENT_SIZE, AGENT_X, OBSTACLE_SPEED};

    fn field_of(xs: &[f32]) -> ObstacleField {
        ObstacleField {
            obstacles: xs.iter().map(|&x| Obstacle::new(x, 200.0, 120.0)).collect(),
        }
    }

    #[test]
    fn test_new_field_has_one_obstacle_at_right_edge() {
        let field = ObstacleField::new(&mut Pcg32::seed_from_u64(0), 120.0);
        assert_eq!(field.len(), 1);
        assert_eq!(field.obstacles().next().unwrap().x(), SCREEN_WIDTH);
    }

    #[test]
    fn test_spawns_after_spacing() {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut field = ObstacleField::new(&mut rng, 120.0);

        // trailing obstacle must scroll past x = 610 before the next spawn
        let ticks_before_spawn = ((SCREEN_WIDTH - 610.0) / OBSTACLE_SPEED) as usize;
        for _ in 0..ticks_before_spawn {
            field.tick(&mut rng, 120.0);
        }
        assert_eq!(field.len(), 1);

        field.tick(&mut rng, 120.0);
        assert_eq!(field.len(), 2);
    }

    #[test]
    fn test_keeps_obstacles_sorted_and_retires_offscreen() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut field = ObstacleField::new(&mut rng, 120.0);
        for _ in 0..5_000 {
            field.tick(&mut rng, 120.0);
            let xs: Vec<f32> = field.obstacles().map(Obstacle::x).collect();
            assert!(xs.is_sorted());
            assert!(field.obstacles().all(|o| !o.is_retired()));
            assert!(field.len() <= 5);
        }
    }

    #[test]
    fn test_gap_height_change_applies_to_new_obstacles_only() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut field = ObstacleField::new(&mut rng, 120.0);
        for _ in 0..200 {
            field.tick(&mut rng, 300.0);
        }
        let gaps: Vec<f32> = field.obstacles().map(Obstacle::gap_height).collect();
        assert_eq!(gaps[0], 120.0);
        assert!(gaps[1..].iter().all(|g| *g == 300.0));
    }

    #[test]
    fn test_empty_field_spawns_on_tick() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut field = ObstacleField::default();
        assert!(field.nearest_ahead_of(AGENT_X, AGENT_SIZE).is_none());
        field.tick(&mut rng, 120.0);
        assert_eq!(field.len(), 1);
    }

    #[test]
    fn test_nearest_skips_passed_obstacles() {
        // right edge + margin: -20 + 40 + 30 = 50 (passed), 0 + 70 = 70 (ahead)
        let field = field_of(&[-20.0, 0.0, 200.0]);
        let nearest = field.nearest_ahead_of(AGENT_X, AGENT_SIZE).unwrap();
        assert_eq!(nearest.x(), 0.0);
    }

    #[test]
    fn test_nearest_is_none_when_all_behind() {
        let field = field_of(&[-40.0, -30.0]);
        assert!(field.nearest_ahead_of(AGENT_X, AGENT_SIZE).is_none());
    }
}
