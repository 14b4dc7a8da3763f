//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use box2d::Box2d;

mod box2d;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;

/// Rotates a vector 90 degrees anticlockwise.
pub fn rot90(vec: Vector2d) -> Vector2d {
    Vector2d::new(-vec.y, vec.x)
}

/// The unit vector pointing along a heading angle in radians.
pub fn heading_vector(heading: f64) -> Vector2d {
    Vector2d::new(heading.cos(), heading.sin())
}
