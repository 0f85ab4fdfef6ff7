use rand::Rng;

use crate::{
    geometry::{Point, Rect},
    world::{
        DEFAULT_GAP_HEIGHT, OBSTACLE_RETIRE_MARGIN, OBSTACLE_SPEED, OBSTACLE_WIDTH, SCREEN_HEIGHT,
    },
};

/// A pair of barriers scrolling leftwards with a gap between them.
///
/// The gap height is fixed when the obstacle is created, so changing the
/// configured gap height only affects obstacles spawned afterwards.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Obstacle {
    x: f32,
    gap_top: f32,
    gap_height: f32,
}

impl Obstacle {
    /// Creates an obstacle with an explicit gap.
    #[must_use]
    pub fn new(x: f32, gap_top: f32, gap_height: f32) -> Self {
        Self {
            x,
            gap_top,
            gap_height,
        }
    }

    /// Creates an obstacle whose gap starts uniformly in `[0, SCREEN_HEIGHT - gap_height]`.
    ///
    /// Gap heights outside `[0, SCREEN_HEIGHT]` are clamped.
    pub fn random<R>(rng: &mut R, x: f32, gap_height: f32) -> Self
    where
        R: Rng + ?Sized,
    {
        let gap_height = if gap_height.is_nan() {
            DEFAULT_GAP_HEIGHT
        } else {
            gap_height.clamp(0.0, SCREEN_HEIGHT)
        };
        let max_top = (SCREEN_HEIGHT - gap_height).max(0.0);
        let gap_top = rng.random_range(0.0..=max_top);
        Self::new(x, gap_top, gap_height)
    }

    #[must_use]
    pub fn x(&self) -> f32 {
        self.x
    }

    #[must_use]
    pub fn right_edge(&self) -> f32 {
        self.x + OBSTACLE_WIDTH
    }

    #[must_use]
    pub fn gap_top(&self) -> f32 {
        self.gap_top
    }

    #[must_use]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    #[must_use]
    pub fn gap_height(&self) -> f32 {
        self.gap_height
    }

    /// Barrier from the top of the screen down to the gap.
    #[must_use]
    pub fn top_barrier(&self) -> Rect {
        Rect::new(self.x, 0.0, OBSTACLE_WIDTH, self.gap_top)
    }

    /// Barrier from the gap down to the bottom of the screen.
    #[must_use]
    pub fn bottom_barrier(&self) -> Rect {
        let top = self.gap_bottom();
        Rect::new(self.x, top, OBSTACLE_WIDTH, (SCREEN_HEIGHT - top).max(0.0))
    }

    /// Tests whether a circle touches either barrier.
    #[must_use]
    pub fn collides_with(&self, center: Point, radius: f32) -> bool {
        self.top_barrier().intersects_circle(center, radius)
            || self.bottom_barrier().intersects_circle(center, radius)
    }

    /// Scrolls the obstacle one tick to the left.
    pub fn advance(&mut self) {
        self.x -= OBSTACLE_SPEED;
    }

    /// Whether the obstacle has fully left the screen.
    #[must_use]
    pub fn is_retired(&self) -> bool {
        self.right_edge() <= -OBSTACLE_RETIRE_MARGIN
    }
}
