//! Scene coordinates.
//!
//! All positions use the fixed 800x600 scene with the origin in the top-left
//! corner and y growing downwards, so "up" in the cloud means smaller y.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Scene width in scene units.
pub const CANVAS_WIDTH: f64 = 800.0;
/// Scene height in scene units.
pub const CANVAS_HEIGHT: f64 = 600.0;
/// The y coordinate of the ground line.
pub const GROUND_Y: f64 = 500.0;

/// A point (or a velocity) in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation between `self` and `other` at `t` in `[0, 1]`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Component-wise sum.
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

impl FromStr for Point {
    type Err = CoreError;

    /// Parse `"X,Y"`, tolerating whitespace around either number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| CoreError::InvalidPoint(s.to_string()))?;
        let x = x
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::InvalidPoint(s.to_string()))?;
        let y = y
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::InvalidPoint(s.to_string()))?;
        if !x.is_finite() || !y.is_finite() {
            return Err(CoreError::InvalidPoint(s.to_string()));
        }
        Ok(Point { x, y })
    }
}

/// An axis-aligned rectangle, inclusive on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub min_x: f64,
    /// Right edge.
    pub max_x: f64,
    /// Top edge.
    pub min_y: f64,
    /// Bottom edge.
    pub max_y: f64,
}

impl Bounds {
    /// Create bounds from its four edges.
    pub const fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Whether `x` lies between the left and right edges.
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.min_x && x <= self.max_x
    }

    /// Whether `y` lies between the top and bottom edges.
    pub fn contains_y(&self, y: f64) -> bool {
        y >= self.min_y && y <= self.max_y
    }

    /// Whether the point lies inside the rectangle.
    pub fn contains(&self, p: Point) -> bool {
        self.contains_x(p.x) && self.contains_y(p.y)
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(100.0, 30.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Point::new(50.0, 20.0));
    }

    #[test]
    fn parse_point() {
        let p: Point = "400, 250".parse().unwrap();
        assert_eq!(p, Point::new(400.0, 250.0));
        let p: Point = "-1.5,2e2".parse().unwrap();
        assert_eq!(p, Point::new(-1.5, 200.0));
    }

    #[test]
    fn parse_point_rejects_garbage() {
        assert!("400".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
        assert!("1,2,3".parse::<Point>().is_err());
        assert!("inf,2".parse::<Point>().is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let b = Bounds::new(200.0, 600.0, 100.0, 300.0);
        assert!(b.contains(Point::new(200.0, 100.0)));
        assert!(b.contains(Point::new(600.0, 300.0)));
        assert!(!b.contains_x(600.5));
        assert!(!b.contains_y(99.9));
        assert_eq!(b.width(), 400.0);
        assert_eq!(b.height(), 200.0);
    }

    #[test]
    fn point_serializes_as_object() {
        let json = serde_json::to_string(&Point::new(1.0, 2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0}"#);
    }
}
