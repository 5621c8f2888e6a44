//! Jagged lightning polylines.

use blixt_core::Point;
use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;

/// Parameters for one bolt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoltSpec {
    /// Where the bolt leaves the cloud.
    pub start: Point,
    /// Where the bolt ends.
    pub end: Point,
    /// Number of straight pieces; the path has `segments + 1` points.
    pub segments: usize,
    /// Full width of the jitter applied to interior points.
    pub amplitude: f64,
}

impl BoltSpec {
    /// Create a spec.
    pub const fn new(start: Point, end: Point, segments: usize, amplitude: f64) -> Self {
        Self {
            start,
            end,
            segments,
            amplitude,
        }
    }

    /// Draw a fresh path for this spec.
    pub fn generate(&self, rng: &mut StdRng) -> BoltPath {
        generate(self.start, self.end, self.segments, self.amplitude, rng)
    }
}

/// An ordered polyline from a start point to an end point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoltPath {
    points: Vec<Point>,
}

impl BoltPath {
    /// All points, start first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The first point.
    pub fn start(&self) -> Point {
        self.points[0]
    }

    /// The last point.
    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// Consecutive point pairs, one per drawn line.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a path holds at least its two endpoints.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Generate a bolt from `start` to `end`.
///
/// Interior points sit on the straight line, each axis displaced by an
/// independent uniform offset in `[-amplitude/2, amplitude/2]`. Endpoints are
/// never displaced. A segment count of zero is treated as one.
pub fn generate(
    start: Point,
    end: Point,
    segments: usize,
    amplitude: f64,
    rng: &mut StdRng,
) -> BoltPath {
    let segments = segments.max(1);
    let dx = (end.x - start.x) / segments as f64;
    let dy = (end.y - start.y) / segments as f64;

    let mut points = Vec::with_capacity(segments + 1);
    points.push(start);
    for i in 1..segments {
        let jitter_x = (rng.random::<f64>() - 0.5) * amplitude;
        let jitter_y = (rng.random::<f64>() - 0.5) * amplitude;
        points.push(Point::new(
            start.x + dx * i as f64 + jitter_x,
            start.y + dy * i as f64 + jitter_y,
        ));
    }
    points.push(end);

    BoltPath { points }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn zero_segments_is_a_straight_line() {
        let mut rng = StdRng::seed_from_u64(1);
        let path = generate(Point::new(0.0, 0.0), Point::new(10.0, 10.0), 0, 40.0, &mut rng);
        assert_eq!(path.len(), 2);
        assert_eq!(path.segments().count(), 1);
    }

    #[test]
    fn zero_amplitude_follows_the_line() {
        let mut rng = StdRng::seed_from_u64(1);
        let path = generate(Point::new(0.0, 0.0), Point::new(80.0, 40.0), 8, 0.0, &mut rng);
        for (i, p) in path.points().iter().enumerate() {
            assert!((p.x - 10.0 * i as f64).abs() < 1e-9);
            assert!((p.y - 5.0 * i as f64).abs() < 1e-9);
        }
    }

    #[test]
    fn same_seed_same_bolt() {
        let spec = BoltSpec::new(Point::new(400.0, 250.0), Point::new(615.0, 430.0), 12, 40.0);
        let a = spec.generate(&mut StdRng::seed_from_u64(7));
        let b = spec.generate(&mut StdRng::seed_from_u64(7));
        let c = spec.generate(&mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn path_shape_holds(
            sx in -1000.0f64..1000.0,
            sy in -1000.0f64..1000.0,
            ex in -1000.0f64..1000.0,
            ey in -1000.0f64..1000.0,
            segments in 2usize..40,
            amplitude in 0.0f64..200.0,
            seed in any::<u64>(),
        ) {
            let start = Point::new(sx, sy);
            let end = Point::new(ex, ey);
            let mut rng = StdRng::seed_from_u64(seed);
            let path = generate(start, end, segments, amplitude, &mut rng);

            prop_assert_eq!(path.len(), segments + 1);
            prop_assert_eq!(path.start(), start);
            prop_assert_eq!(path.end(), end);

            let dx = (ex - sx) / segments as f64;
            let dy = (ey - sy) / segments as f64;
            let limit = amplitude / 2.0 + 1e-9;
            for (i, p) in path.points().iter().enumerate().skip(1).take(segments - 1) {
                prop_assert!((p.x - (sx + dx * i as f64)).abs() <= limit);
                prop_assert!((p.y - (sy + dy * i as f64)).abs() <= limit);
            }
        }
    }
}
