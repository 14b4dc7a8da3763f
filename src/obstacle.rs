use crate::math::{Box2d, Point2d};
use itertools::Itertools;

/// A pose along a predicted obstacle trajectory, or the vehicle's own
/// planning start point.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrajectoryPoint {
    /// The world space position of the point.
    pub pos: Point2d,
    /// The heading at the point in radians.
    pub heading: f64,
    /// The velocity in m/s.
    pub vel: f64,
    /// The time offset from the start of planning in s.
    pub relative_time: f64,
}

impl TrajectoryPoint {
    /// Creates a new trajectory point.
    pub const fn new(pos: Point2d, heading: f64, vel: f64, relative_time: f64) -> Self {
        Self {
            pos,
            heading,
            vel,
            relative_time,
        }
    }
}

/// A time-sequenced forecast of an obstacle's future poses.
#[derive(Clone, Debug, Default)]
pub struct PredictionTrajectory {
    points: Vec<TrajectoryPoint>,
}

impl PredictionTrajectory {
    /// Creates a trajectory from its points, ordered by relative time.
    pub fn new(points: Vec<TrajectoryPoint>) -> Self {
        debug_assert!(
            points
                .iter()
                .tuple_windows()
                .all(|(a, b)| b.relative_time >= a.relative_time),
            "trajectory relative time must be non-decreasing"
        );
        Self { points }
    }

    /// The points of the trajectory in time order.
    pub fn points(&self) -> &[TrajectoryPoint] {
        &self.points
    }
}

/// Whether an obstacle holds a fixed pose or follows predicted trajectories.
#[derive(Clone, Debug)]
pub enum ObstacleShape {
    /// A fixed pose held for the whole planning horizon.
    Static {
        /// The world space position of the obstacle's centre.
        pos: Point2d,
        /// The heading in radians.
        heading: f64,
    },
    /// Zero or more predicted futures; each may constrain the ST graph
    /// on its own.
    Dynamic(Vec<PredictionTrajectory>),
}

/// A perceived obstacle with a fixed rectangular extent.
#[derive(Clone, Debug)]
pub struct Obstacle {
    /// Identity assigned by the perception pipeline.
    pub id: String,
    /// The obstacle length in m.
    pub length: f64,
    /// The obstacle width in m.
    pub width: f64,
    /// Whether the obstacle is static or dynamic.
    pub shape: ObstacleShape,
}

impl Obstacle {
    /// Creates a static obstacle at a fixed pose.
    pub fn new_static(
        id: impl Into<String>,
        length: f64,
        width: f64,
        pos: Point2d,
        heading: f64,
    ) -> Self {
        Self {
            id: id.into(),
            length,
            width,
            shape: ObstacleShape::Static { pos, heading },
        }
    }

    /// Creates a dynamic obstacle with the given predicted trajectories.
    pub fn new_dynamic(
        id: impl Into<String>,
        length: f64,
        width: f64,
        trajectories: Vec<PredictionTrajectory>,
    ) -> Self {
        Self {
            id: id.into(),
            length,
            width,
            shape: ObstacleShape::Dynamic(trajectories),
        }
    }

    /// The obstacle's footprint when placed at the given pose.
    pub fn footprint_at(&self, pos: Point2d, heading: f64) -> Box2d {
        Box2d::new(pos, heading, self.length, self.width)
    }

    /// The fixed footprint of a static obstacle, or `None` if the
    /// obstacle is dynamic.
    pub fn fixed_footprint(&self) -> Option<Box2d> {
        match &self.shape {
            ObstacleShape::Static { pos, heading } => Some(self.footprint_at(*pos, *heading)),
            ObstacleShape::Dynamic(_) => None,
        }
    }

    /// The obstacle's predicted trajectories; empty for a static obstacle.
    pub fn prediction_trajectories(&self) -> &[PredictionTrajectory] {
        match &self.shape {
            ObstacleShape::Static { .. } => &[],
            ObstacleShape::Dynamic(trajectories) => trajectories,
        }
    }
}

/// The obstacles relevant to one planning cycle, as handed over by the
/// upstream decision step.
///
/// Entries may be absent; absent entries are skipped by the mapper
/// rather than treated as errors.
#[derive(Clone, Debug, Default)]
pub struct DecisionData {
    statics: Vec<Option<Obstacle>>,
    dynamics: Vec<Option<Obstacle>>,
}

impl DecisionData {
    /// Creates decision data from the two ordered obstacle lists.
    pub fn new(statics: Vec<Option<Obstacle>>, dynamics: Vec<Option<Obstacle>>) -> Self {
        Self { statics, dynamics }
    }

    /// Appends an entry to the static obstacle list.
    pub fn push_static(&mut self, obstacle: Option<Obstacle>) {
        self.statics.push(obstacle);
    }

    /// Appends an entry to the dynamic obstacle list.
    pub fn push_dynamic(&mut self, obstacle: Option<Obstacle>) {
        self.dynamics.push(obstacle);
    }

    /// The static obstacles in their given order.
    pub fn static_obstacles(&self) -> &[Option<Obstacle>] {
        &self.statics
    }

    /// The dynamic obstacles in their given order.
    pub fn dynamic_obstacles(&self) -> &[Option<Obstacle>] {
        &self.dynamics
    }
}
