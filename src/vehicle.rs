use crate::math::{heading_vector, Box2d};
use crate::path::PathPoint;

/// The fixed geometric envelope of the planning vehicle.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleParam {
    /// The vehicle length in m.
    pub length: f64,
    /// The vehicle width in m.
    pub width: f64,
    /// Distance from the reference point to the front edge in m.
    pub front_edge_to_center: f64,
    /// Distance from the reference point to the back edge in m.
    pub back_edge_to_center: f64,
}

impl VehicleParam {
    /// Creates a vehicle envelope whose reference point is its centre.
    pub fn centered(length: f64, width: f64) -> Self {
        Self {
            length,
            width,
            front_edge_to_center: 0.5 * length,
            back_edge_to_center: 0.5 * length,
        }
    }

    /// Places the vehicle footprint at a path point.
    ///
    /// The box centre is shifted forward of the reference point when
    /// the front overhang exceeds the back overhang.
    pub fn footprint_at(&self, point: &PathPoint) -> Box2d {
        let shift = 0.5 * (self.front_edge_to_center - self.back_edge_to_center);
        let center = point.pos + shift * heading_vector(point.heading);
        Box2d::new(center, point.heading, self.length, self.width)
    }
}
