use crate::boundary::{BoundaryConfig, STPoint, StGraphBoundary};
use crate::error::MappingError;
use crate::math::Box2d;
use crate::obstacle::{DecisionData, Obstacle, ObstacleShape, TrajectoryPoint};
use crate::path::{Path, ReferenceLine};
use crate::util::Interval;
use crate::vehicle::VehicleParam;
use log::{debug, error};

/// Maps a planned path and perceived obstacles into the forbidden
/// regions of the ST graph consumed by the downstream speed search.
///
/// The mapper holds only fixed configuration; every mapping call is a
/// pure function of its inputs, so one mapper may be reused across
/// planning cycles.
#[derive(Clone, Copy, Debug)]
pub struct BoundaryMapper {
    config: BoundaryConfig,
    vehicle: VehicleParam,
}

impl BoundaryMapper {
    /// Creates a mapper from the boundary configuration and the
    /// vehicle's footprint parameters.
    pub fn new(config: BoundaryConfig, vehicle: VehicleParam) -> Self {
        Self { config, vehicle }
    }

    /// Builds the ST boundaries for one planning cycle.
    ///
    /// Static obstacles are mapped first, then dynamic obstacles, each
    /// in their given order; an obstacle may contribute zero or more
    /// boundaries, and absent entries are skipped. A failure to map
    /// any single obstacle aborts the whole call with no partial
    /// result.
    ///
    /// The initial planning point and reference line are carried for
    /// collaborators but not consulted by the mapping itself.
    pub fn map_boundaries(
        &self,
        _initial_point: &TrajectoryPoint,
        decision_data: &DecisionData,
        path: &Path,
        _reference_line: &ReferenceLine,
        planning_distance: f64,
        planning_time: f64,
    ) -> Result<Vec<StGraphBoundary>, MappingError> {
        if planning_time < 0.0 {
            let msg = format!("planning_time is negative: {planning_time}");
            error!("{msg}");
            return Err(MappingError::InvalidParameter(msg));
        }
        if path.len() < 2 {
            let msg = format!("path has {} points, need at least 2", path.len());
            error!("{msg}");
            return Err(MappingError::InvalidParameter(msg));
        }

        let mut boundaries = Vec::new();
        let entries = decision_data
            .static_obstacles()
            .iter()
            .chain(decision_data.dynamic_obstacles());
        for entry in entries {
            let Some(obstacle) = entry else {
                debug!("skipping absent obstacle entry");
                continue;
            };
            self.map_obstacle(obstacle, path, planning_distance, planning_time, &mut boundaries)
                .map_err(|err| {
                    error!("failed to map obstacle {}: {err}", obstacle.id);
                    MappingError::ObstacleMappingFailure {
                        id: obstacle.id.clone(),
                        reason: err.to_string(),
                    }
                })?;
        }
        Ok(boundaries)
    }

    /// Maps one obstacle, appending whatever boundaries it contributes.
    fn map_obstacle(
        &self,
        obstacle: &Obstacle,
        path: &Path,
        planning_distance: f64,
        planning_time: f64,
        out: &mut Vec<StGraphBoundary>,
    ) -> Result<(), MappingError> {
        match &obstacle.shape {
            ObstacleShape::Static { .. } => {
                let boundary =
                    self.map_static_obstacle(obstacle, path, planning_distance, planning_time)?;
                out.extend(boundary);
            }
            ObstacleShape::Dynamic(_) => {
                let boundaries = self.map_dynamic_obstacle(obstacle, path, planning_distance)?;
                out.extend(boundaries);
            }
        }
        Ok(())
    }

    /// Maps a static obstacle into at most one rectangular boundary
    /// spanning the whole time horizon.
    ///
    /// An obstacle whose footprint never overlaps the path constrains
    /// nothing and yields `Ok(None)`; only an empty path is an error.
    pub fn map_static_obstacle(
        &self,
        obstacle: &Obstacle,
        path: &Path,
        planning_distance: f64,
        planning_time: f64,
    ) -> Result<Option<StGraphBoundary>, MappingError> {
        if path.is_empty() {
            let msg = "vehicle path is empty".to_string();
            error!("{msg}");
            return Err(MappingError::InvalidParameter(msg));
        }
        let Some(footprint) = obstacle.fixed_footprint() else {
            debug!("obstacle {} has no fixed footprint, nothing to map", obstacle.id);
            return Ok(None);
        };
        let Some((low, high)) = self.overlap_range(path, &footprint) else {
            return Ok(None);
        };
        let Some(s) = clamp_range(path, low, high, planning_distance) else {
            return Ok(None);
        };
        Ok(StGraphBoundary::new(vec![
            STPoint::new(s.min, 0.0),
            STPoint::new(s.min, planning_time),
            STPoint::new(s.max, planning_time),
            STPoint::new(s.max, 0.0),
        ]))
    }

    /// Maps a dynamic obstacle, producing at most one boundary per
    /// predicted trajectory. Predicted futures of the same obstacle
    /// are never merged.
    ///
    /// Samples beyond the planning horizon are kept; the region they
    /// forbid extends as far as prediction reaches.
    pub fn map_dynamic_obstacle(
        &self,
        obstacle: &Obstacle,
        path: &Path,
        planning_distance: f64,
    ) -> Result<Vec<StGraphBoundary>, MappingError> {
        let mut boundaries = Vec::new();
        for trajectory in obstacle.prediction_trajectories() {
            // Lower and upper s-bound series of the region this
            // trajectory sweeps through the graph.
            let mut lower_points = Vec::new();
            let mut upper_points = Vec::new();
            for point in trajectory.points() {
                let footprint = obstacle.footprint_at(point.pos, point.heading);
                let Some((low, high)) = self.overlap_range(path, &footprint) else {
                    continue;
                };
                let Some(s) = clamp_range(path, low, high, planning_distance) else {
                    continue;
                };
                lower_points.push(STPoint::new(s.min, point.relative_time));
                upper_points.push(STPoint::new(s.max, point.relative_time));
            }
            // Lower bounds in time order, then upper bounds traced back,
            // closing the polygon.
            let points = lower_points
                .iter()
                .chain(upper_points.iter().rev())
                .copied()
                .collect();
            if let Some(boundary) = StGraphBoundary::new(points) {
                boundaries.push(boundary);
            }
        }
        Ok(boundaries)
    }

    /// Finds the contiguous run of path indices whose vehicle footprint
    /// overlaps the buffered obstacle footprint, scanning inward from
    /// both ends of the path.
    ///
    /// Assumes the overlapping indices form a single contiguous run.
    /// Should the true overlap region be disjoint, the outermost run
    /// ends are found instead, which still covers the union of the
    /// runs.
    fn overlap_range(&self, path: &Path, obstacle: &Box2d) -> Option<(usize, usize)> {
        let points = path.points();
        if points.is_empty() {
            return None;
        }
        let footprint = obstacle.expand(self.config.boundary_buffer);

        let mut low = 0;
        let mut high = points.len() - 1;
        let mut found_low = false;
        let mut found_high = false;
        while low <= high && !(found_low && found_high) {
            if !found_low {
                if self.vehicle.footprint_at(&points[low]).overlaps(&footprint) {
                    found_low = true;
                } else {
                    low += 1;
                }
            }
            if !found_high {
                if self.vehicle.footprint_at(&points[high]).overlaps(&footprint) {
                    found_high = true;
                } else if high == 0 {
                    break;
                } else {
                    high -= 1;
                }
            }
        }
        (found_low && found_high).then_some((low, high))
    }
}

/// Clamps the found arc-length bounds to the planning distance,
/// rejecting ranges that collapse under the clamp.
fn clamp_range(path: &Path, low: usize, high: usize, planning_distance: f64) -> Option<Interval<f64>> {
    let s_lower = path.points()[low].s.min(planning_distance);
    let s_upper = path.points()[high].s.min(planning_distance);
    (s_lower < s_upper).then(|| Interval::new(s_lower, s_upper))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::Point2d;
    use crate::obstacle::PredictionTrajectory;
    use assert_approx_eq::assert_approx_eq;

    /// A straight path along the x axis with unit spacing.
    fn straight_path(count: usize) -> Path {
        let points = (0..count)
            .map(|i| crate::path::PathPoint::new(Point2d::new(i as f64, 0.0), 0.0, i as f64))
            .collect();
        Path::new(points)
    }

    /// A 1m-by-1m vehicle with no buffer, so footprints overlap the
    /// obstacle exactly when their rectangles do.
    fn mapper() -> BoundaryMapper {
        BoundaryMapper::new(
            BoundaryConfig {
                boundary_buffer: 0.0,
            },
            VehicleParam::centered(1.0, 1.0),
        )
    }

    /// A 2m-by-1m obstacle centred on the path at `x`; on a unit-spaced
    /// path it overlaps the 1m vehicle exactly at indices x-1 ..= x+1.
    fn blocking_obstacle(x: f64) -> Obstacle {
        Obstacle::new_static("S1", 2.0, 1.0, Point2d::new(x, 0.0), 0.0)
    }

    fn origin_point() -> TrajectoryPoint {
        TrajectoryPoint::new(Point2d::new(0.0, 0.0), 0.0, 0.0, 0.0)
    }

    #[test]
    fn overlap_range_finds_the_run() {
        let m = mapper();
        let path = straight_path(5);
        let footprint = blocking_obstacle(2.0).fixed_footprint().unwrap();
        assert_eq!(m.overlap_range(&path, &footprint), Some((1, 3)));
    }

    #[test]
    fn overlap_range_misses_distant_obstacle() {
        let m = mapper();
        let path = straight_path(5);
        let footprint = blocking_obstacle(20.0).fixed_footprint().unwrap();
        assert_eq!(m.overlap_range(&path, &footprint), None);
    }

    #[test]
    fn overlap_range_whole_path() {
        let m = mapper();
        let path = straight_path(3);
        let footprint = Obstacle::new_static("S1", 10.0, 1.0, Point2d::new(1.0, 0.0), 0.0)
            .fixed_footprint()
            .unwrap();
        assert_eq!(m.overlap_range(&path, &footprint), Some((0, 2)));
    }

    #[test]
    fn buffer_extends_the_run() {
        let m = BoundaryMapper::new(
            BoundaryConfig {
                boundary_buffer: 0.6,
            },
            VehicleParam::centered(1.0, 1.0),
        );
        let path = straight_path(5);
        let footprint = blocking_obstacle(2.0).fixed_footprint().unwrap();
        // The 0.6m buffer closes the 0.5m gap to indices 0 and 4.
        assert_eq!(m.overlap_range(&path, &footprint), Some((0, 4)));
    }

    #[test]
    fn static_obstacle_rectangle() {
        let m = mapper();
        let path = straight_path(5);
        let boundary = m
            .map_static_obstacle(&blocking_obstacle(2.0), &path, 10.0, 5.0)
            .unwrap()
            .unwrap();
        let expect = [(1.0, 0.0), (1.0, 5.0), (3.0, 5.0), (3.0, 0.0)];
        assert_eq!(boundary.points().len(), 4);
        for (point, (s, t)) in boundary.points().iter().zip(expect) {
            assert_approx_eq!(point.s, s);
            assert_approx_eq!(point.t, t);
        }
    }

    #[test]
    fn static_obstacle_clamps_to_planning_distance() {
        let m = mapper();
        let path = straight_path(5);
        let boundary = m
            .map_static_obstacle(&blocking_obstacle(2.0), &path, 2.0, 5.0)
            .unwrap()
            .unwrap();
        let expect = [(1.0, 0.0), (1.0, 5.0), (2.0, 5.0), (2.0, 0.0)];
        for (point, (s, t)) in boundary.points().iter().zip(expect) {
            assert_approx_eq!(point.s, s);
            assert_approx_eq!(point.t, t);
        }
    }

    #[test]
    fn static_obstacle_collapsed_clamp_yields_nothing() {
        let m = mapper();
        let path = straight_path(5);
        // Both bounds clamp to 1.0, so the range collapses.
        let boundary = m
            .map_static_obstacle(&blocking_obstacle(2.0), &path, 1.0, 5.0)
            .unwrap();
        assert!(boundary.is_none());
    }

    #[test]
    fn static_obstacle_off_path_yields_nothing() {
        let m = mapper();
        let path = straight_path(5);
        let off = Obstacle::new_static("S1", 2.0, 1.0, Point2d::new(2.0, 10.0), 0.0);
        assert!(m.map_static_obstacle(&off, &path, 10.0, 5.0).unwrap().is_none());
    }

    #[test]
    fn static_obstacle_empty_path_is_an_error() {
        let m = mapper();
        let path = Path::default();
        let err = m
            .map_static_obstacle(&blocking_obstacle(2.0), &path, 10.0, 5.0)
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidParameter(_)));
    }

    #[test]
    fn dynamic_obstacle_polygon_vertices() {
        let m = mapper();
        let path = straight_path(5);
        let trajectory = PredictionTrajectory::new(
            (0..3)
                .map(|i| {
                    TrajectoryPoint::new(Point2d::new(2.0 + i as f64, 0.0), 0.0, 1.0, i as f64)
                })
                .collect(),
        );
        let obstacle = Obstacle::new_dynamic("D1", 2.0, 1.0, vec![trajectory]);
        let boundaries = m.map_dynamic_obstacle(&obstacle, &path, 10.0).unwrap();
        assert_eq!(boundaries.len(), 1);
        // Lower series in time order, then the upper series reversed.
        let expect = [
            (1.0, 0.0),
            (2.0, 1.0),
            (3.0, 2.0),
            (4.0, 2.0),
            (4.0, 1.0),
            (3.0, 0.0),
        ];
        let points = boundaries[0].points();
        assert_eq!(points.len(), expect.len());
        for (point, (s, t)) in points.iter().zip(expect) {
            assert_approx_eq!(point.s, s);
            assert_approx_eq!(point.t, t);
        }
    }

    #[test]
    fn dynamic_trajectories_stay_separate() {
        let m = mapper();
        let path = straight_path(5);
        let make = |x0: f64| {
            PredictionTrajectory::new(
                (0..2)
                    .map(|i| {
                        TrajectoryPoint::new(Point2d::new(x0 + i as f64, 0.0), 0.0, 1.0, i as f64)
                    })
                    .collect(),
            )
        };
        let obstacle = Obstacle::new_dynamic("D1", 2.0, 1.0, vec![make(1.0), make(2.0)]);
        let boundaries = m.map_dynamic_obstacle(&obstacle, &path, 10.0).unwrap();
        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries[0].points().len(), 4);
        assert_eq!(boundaries[1].points().len(), 4);
        assert_approx_eq!(boundaries[0].points()[0].s, 0.0);
        assert_approx_eq!(boundaries[1].points()[0].s, 1.0);
    }

    #[test]
    fn dynamic_single_sample_cannot_close_a_polygon() {
        let m = mapper();
        let path = straight_path(5);
        let trajectory = PredictionTrajectory::new(vec![TrajectoryPoint::new(
            Point2d::new(2.0, 0.0),
            0.0,
            1.0,
            0.0,
        )]);
        let obstacle = Obstacle::new_dynamic("D1", 2.0, 1.0, vec![trajectory]);
        assert!(m.map_dynamic_obstacle(&obstacle, &path, 10.0).unwrap().is_empty());
    }

    #[test]
    fn dynamic_obstacle_never_on_path_yields_nothing() {
        let m = mapper();
        let path = straight_path(5);
        let trajectory = PredictionTrajectory::new(
            (0..3)
                .map(|i| {
                    TrajectoryPoint::new(Point2d::new(i as f64, 10.0), 0.0, 1.0, i as f64)
                })
                .collect(),
        );
        let obstacle = Obstacle::new_dynamic("D1", 2.0, 1.0, vec![trajectory]);
        assert!(m.map_dynamic_obstacle(&obstacle, &path, 10.0).unwrap().is_empty());
    }

    #[test]
    fn negative_planning_time_fails() {
        let m = mapper();
        let path = straight_path(5);
        let err = m
            .map_boundaries(
                &origin_point(),
                &DecisionData::default(),
                &path,
                &ReferenceLine,
                10.0,
                -0.1,
            )
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidParameter(_)));
    }

    #[test]
    fn short_path_fails() {
        let m = mapper();
        for count in [0, 1] {
            let err = m
                .map_boundaries(
                    &origin_point(),
                    &DecisionData::default(),
                    &straight_path(count),
                    &ReferenceLine,
                    10.0,
                    5.0,
                )
                .unwrap_err();
            assert!(matches!(err, MappingError::InvalidParameter(_)));
        }
    }

    #[test]
    fn obstacle_failure_names_the_obstacle() {
        let err = MappingError::ObstacleMappingFailure {
            id: "S7".into(),
            reason: "invalid parameter: vehicle path is empty".into(),
        };
        assert!(err.to_string().contains("S7"));
    }

    #[test]
    fn absent_entries_are_skipped() {
        let m = mapper();
        let path = straight_path(5);
        let mut decision = DecisionData::default();
        decision.push_static(None);
        decision.push_static(Some(blocking_obstacle(2.0)));
        decision.push_dynamic(None);
        let boundaries = m
            .map_boundaries(&origin_point(), &decision, &path, &ReferenceLine, 10.0, 5.0)
            .unwrap();
        assert_eq!(boundaries.len(), 1);
    }

    #[test]
    fn output_order_mirrors_obstacle_order() {
        let m = mapper();
        let path = straight_path(5);
        let trajectory = PredictionTrajectory::new(
            (0..2)
                .map(|i| {
                    TrajectoryPoint::new(Point2d::new(2.0 + i as f64, 0.0), 0.0, 1.0, i as f64)
                })
                .collect(),
        );
        let mut decision = DecisionData::default();
        decision.push_static(Some(blocking_obstacle(2.0)));
        decision.push_static(Some(blocking_obstacle(3.0)));
        decision.push_dynamic(Some(Obstacle::new_dynamic("D1", 2.0, 1.0, vec![trajectory])));
        let boundaries = m
            .map_boundaries(&origin_point(), &decision, &path, &ReferenceLine, 10.0, 5.0)
            .unwrap();
        assert_eq!(boundaries.len(), 3);
        // Statics first in order, then the dynamic polygon.
        assert_approx_eq!(boundaries[0].s_range().min, 1.0);
        assert_approx_eq!(boundaries[1].s_range().min, 2.0);
        assert_approx_eq!(boundaries[2].t_range().max, 1.0);
    }
}
