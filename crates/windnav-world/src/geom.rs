//! Screen-space geometry.

use serde::{Deserialize, Serialize};

/// A point in global screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in global screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in points.
    pub width: f64,
    /// Height in points.
    pub height: f64,
}

impl Rect {
    /// Construct a rectangle from origin and size.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest x coordinate, correct for negative widths.
    pub fn min_x(&self) -> f64 {
        self.x.min(self.x + self.width)
    }

    /// Smallest y coordinate, correct for negative heights.
    pub fn min_y(&self) -> f64 {
        self.y.min(self.y + self.height)
    }

    /// Centre point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: the left/top edges are inside, the right/bottom are not.
    pub fn contains(&self, p: Point) -> bool {
        let min_x = self.min_x();
        let min_y = self.min_y();
        p.x >= min_x
            && p.x < min_x + self.width.abs()
            && p.y >= min_y
            && p.y < min_y + self.height.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_and_containment() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.center(), Point::new(50.0, 25.0));
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(!r.contains(Point::new(100.0, 10.0)));
        assert!(!r.contains(Point::new(-1.0, 10.0)));
    }

    #[test]
    fn negative_sizes_normalize() {
        let r = Rect::new(100.0, 100.0, -50.0, -20.0);
        assert_eq!(r.min_x(), 50.0);
        assert_eq!(r.min_y(), 80.0);
        assert!(r.contains(Point::new(60.0, 90.0)));
    }
}
