//! # Geometry Kernel
//!
//! Plane geometry used to build stress blocks: polygon area and centroid,
//! signed point-to-line distances, line/polygon intersections and vertex
//! ordering. All functions are pure and take their inputs by reference.
//!
//! ## Sign Convention
//!
//! - Coordinate system: section-local x/y
//! - A [`Line`] has a unit direction; signed distance is positive on the
//!   right of that direction and negative on the left
//! - Polygons are implicitly closed (last vertex connects to the first)
//!
//! ## Modules
//!
//! - [`line`] - Infinite lines and signed distances
//! - [`polygon`] - Area, centroid, intersections, ordering, containment

pub mod line;
pub mod polygon;

pub use line::{point_to_line_distance, Line};
pub use polygon::{
    bounding_box, compression_side_vertices, contains_point, is_simple_polygon,
    line_polygon_intersections, order_polygon_vertices, polygon_area, polygon_centroid,
    signed_area,
};

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// Base tolerance for geometric predicates, scaled by section size via [`tolerance_for`].
pub const EPSILON: f64 = 1e-9;

/// Absolute tolerance for a section whose largest coordinate magnitude is `extent`.
#[inline]
pub fn tolerance_for(extent: f64) -> f64 {
    EPSILON * (1.0 + extent.abs())
}

/// A point (or vector) in the section plane
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    #[inline]
    pub fn dot(self, other: Point2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 2-D cross product
    #[inline]
    pub fn cross(self, other: Point2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn distance_to(self, other: Point2) -> f64 {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Point2::new(x, y)
    }
}

impl Add for Point2 {
    type Output = Point2;
    fn add(self, rhs: Point2) -> Point2 {
        Point2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point2 {
    type Output = Point2;
    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point2 {
    type Output = Point2;
    fn mul(self, rhs: f64) -> Point2 {
        Point2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Point2 {
    type Output = Point2;
    fn neg(self) -> Point2 {
        Point2::new(-self.x, -self.y)
    }
}
