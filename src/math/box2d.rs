use super::{heading_vector, rot90, Point2d, Vector2d};
use crate::util::Interval;
use cgmath::prelude::*;

/// An oriented rectangle in world space, used as the footprint of a
/// vehicle or obstacle at a particular pose.
#[derive(Copy, Clone, Debug)]
pub struct Box2d {
    /// The centre of the box.
    center: Point2d,
    /// Unit vector pointing along the box's length.
    axis: Vector2d,
    /// Half the box's length in m.
    half_len: f64,
    /// Half the box's width in m.
    half_wid: f64,
}

impl Box2d {
    /// Creates a box from its centre, heading and full extents.
    pub fn new(center: Point2d, heading: f64, length: f64, width: f64) -> Self {
        Self {
            center,
            axis: heading_vector(heading),
            half_len: 0.5 * length,
            half_wid: 0.5 * width,
        }
    }

    /// The centre of the box.
    pub fn center(&self) -> Point2d {
        self.center
    }

    /// The box's full length in m.
    pub fn length(&self) -> f64 {
        2.0 * self.half_len
    }

    /// The box's full width in m.
    pub fn width(&self) -> f64 {
        2.0 * self.half_wid
    }

    /// Returns a copy of this box grown by `margin` on every side.
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            half_len: self.half_len + margin,
            half_wid: self.half_wid + margin,
            ..*self
        }
    }

    /// The box's corners.
    pub fn corners(&self) -> [Point2d; 4] {
        let u = self.half_len * self.axis;
        let v = self.half_wid * rot90(self.axis);
        [
            self.center + u + v,
            self.center - u + v,
            self.center - u - v,
            self.center + u - v,
        ]
    }

    /// Projects the box onto an axis through the origin.
    fn project(&self, axis: Vector2d) -> Interval<f64> {
        let radius = self.half_len * self.axis.dot(axis).abs()
            + self.half_wid * rot90(self.axis).dot(axis).abs();
        Interval::disc(self.center.to_vec().dot(axis), radius)
    }

    /// Returns true if the two boxes intersect, including merely
    /// touching at an edge or corner.
    ///
    /// Separating-axis test; only two edge normals per rectangle are
    /// needed since opposite edges are parallel.
    pub fn overlaps(&self, other: &Box2d) -> bool {
        [self.axis, rot90(self.axis), other.axis, rot90(other.axis)]
            .iter()
            .all(|&axis| self.project(axis).touches(&other.project(axis)))
    }
}
