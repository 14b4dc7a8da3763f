pub use boundary::{BoundaryConfig, STPoint, StGraphBoundary};
pub use cgmath;
pub use error::MappingError;
pub use mapper::BoundaryMapper;
pub use obstacle::{DecisionData, Obstacle, ObstacleShape, PredictionTrajectory, TrajectoryPoint};
pub use path::{Path, PathPoint, ReferenceLine};
pub use util::Interval;
pub use vehicle::VehicleParam;

mod boundary;
mod error;
mod mapper;
pub mod math;
mod obstacle;
mod path;
mod util;
mod vehicle;
