use crate::util::Interval;

/// A point in ST space: arc length along the path against time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct STPoint {
    /// Arc length along the path in m.
    pub s: f64,
    /// Time offset from the start of planning in s.
    pub t: f64,
}

impl STPoint {
    /// Creates a new ST point.
    pub const fn new(s: f64, t: f64) -> Self {
        Self { s, t }
    }
}

/// A closed polygon in ST space that the chosen speed profile must
/// not enter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StGraphBoundary {
    points: Vec<STPoint>,
}

impl StGraphBoundary {
    /// Creates a boundary from its vertices in order.
    ///
    /// Returns `None` for fewer than 3 vertices, which cannot enclose
    /// a region of the graph.
    pub fn new(points: Vec<STPoint>) -> Option<Self> {
        (points.len() >= 3).then_some(Self { points })
    }

    /// The polygon vertices in order.
    pub fn points(&self) -> &[STPoint] {
        &self.points
    }

    /// The range of arc lengths covered by the boundary.
    pub fn s_range(&self) -> Interval<f64> {
        self.points.iter().fold(
            Interval::new(f64::INFINITY, f64::NEG_INFINITY),
            |range, p| Interval::new(range.min.min(p.s), range.max.max(p.s)),
        )
    }

    /// The range of times covered by the boundary.
    pub fn t_range(&self) -> Interval<f64> {
        self.points.iter().fold(
            Interval::new(f64::INFINITY, f64::NEG_INFINITY),
            |range, p| Interval::new(range.min.min(p.t), range.max.max(p.t)),
        )
    }
}

/// Safety margins applied when mapping obstacles into the ST graph.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryConfig {
    /// Extra clearance added around every obstacle footprint in m.
    pub boundary_buffer: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            boundary_buffer: 0.1,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn rejects_degenerate_polygons() {
        assert!(StGraphBoundary::new(vec![]).is_none());
        let pair = vec![STPoint::new(1.0, 0.0), STPoint::new(3.0, 0.0)];
        assert!(StGraphBoundary::new(pair).is_none());
        let triangle = vec![
            STPoint::new(1.0, 0.0),
            STPoint::new(2.0, 1.0),
            STPoint::new(3.0, 0.0),
        ];
        assert!(StGraphBoundary::new(triangle).is_some());
    }

    #[test]
    fn ranges_cover_all_vertices() {
        let boundary = StGraphBoundary::new(vec![
            STPoint::new(1.0, 0.0),
            STPoint::new(2.0, 4.0),
            STPoint::new(6.0, 2.0),
        ])
        .unwrap();
        assert_approx_eq!(boundary.s_range().min, 1.0);
        assert_approx_eq!(boundary.s_range().max, 6.0);
        assert_approx_eq!(boundary.s_range().length(), 5.0);
        assert_approx_eq!(boundary.t_range().min, 0.0);
        assert_approx_eq!(boundary.t_range().max, 4.0);
        assert!(boundary.s_range().contains(2.5));
        assert!(!boundary.t_range().contains(4.5));
    }
}
