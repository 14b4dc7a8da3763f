use crate::math::Point2d;
use itertools::Itertools;

/// A single pose along the candidate path.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathPoint {
    /// The world space position of the point.
    pub pos: Point2d,
    /// The heading at the point in radians.
    pub heading: f64,
    /// The arc length from the start of the path in m.
    pub s: f64,
}

impl PathPoint {
    /// Creates a new path point.
    pub const fn new(pos: Point2d, heading: f64, s: f64) -> Self {
        Self { pos, heading, s }
    }
}

/// The candidate vehicle path for one planning cycle, produced by the
/// upstream path generator and read-only to the mapper.
///
/// Arc length must be non-decreasing along the sequence; the mapper
/// itself validates the point count it needs.
#[derive(Clone, Debug, Default)]
pub struct Path {
    points: Vec<PathPoint>,
}

impl Path {
    /// Creates a path from its points, ordered by arc length.
    pub fn new(points: Vec<PathPoint>) -> Self {
        debug_assert!(
            points.iter().tuple_windows().all(|(a, b)| b.s >= a.s),
            "path arc length must be non-decreasing"
        );
        Self { points }
    }

    /// The points of the path in order.
    pub fn points(&self) -> &[PathPoint] {
        &self.points
    }

    /// The number of points in the path.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Reference-line geometry produced upstream. The mapper carries it
/// through its entry point for collaborators but never inspects it.
#[derive(Clone, Debug, Default)]
pub struct ReferenceLine;
