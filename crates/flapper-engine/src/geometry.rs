/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the point of this rectangle closest to `point`.
    #[must_use]
    pub fn closest_point(&self, point: Point) -> Point {
        Point::new(
            point.x.max(self.x).min(self.right()),
            point.y.max(self.y).min(self.bottom()),
        )
    }

    /// Tests whether a circle touches or overlaps this rectangle.
    #[must_use]
    pub fn intersects_circle(&self, center: Point, radius: f32) -> bool {
        let closest = self.closest_point(center);
        let dx = center.x - closest.x;
        let dy = center.y - closest.y;
        dx * dx + dy * dy <= radius * radius
    }
}
