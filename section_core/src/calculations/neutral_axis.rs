//! # Neutral Axis
//!
//! A neutral axis is an orientation angle plus an intercept. For all
//! non-vertical orientations it represents the line
//!
//! ```text
//!     y = tan(α)·x + intercept
//! ```
//!
//! in the section's local frame. When α ≡ 90° or 270° the line is vertical
//! and the intercept is read as its crossing of the x-axis instead.
//! No tangent is ever evaluated, so orientations close to vertical stay
//! finite.
//!
//! ## Sign Convention (left-handed)
//!
//! - The axis is directed along (cos α, sin α)
//! - Points left of that direction are in compression: negative distance
//! - Points right of it are in tension: positive distance
//!
//! Rotating α through 180° therefore swaps the compression and tension sides.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Line, Point2};
use crate::section::Section;

/// Angular tolerance (degrees) for treating an axis as vertical
pub const VERTICAL_TOLERANCE_DEG: f64 = 1e-9;

/// Neutral-axis parametrization for one capacity sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralAxis {
    /// Orientation in degrees, counter-clockwise from +x
    pub angle_deg: f64,

    /// y-axis crossing, or x-axis crossing for a vertical axis
    pub intercept: f64,
}

impl NeutralAxis {
    pub fn new(angle_deg: f64, intercept: f64) -> Self {
        NeutralAxis { angle_deg, intercept }
    }

    /// Angle reduced to [0, 360)
    pub fn normalized_angle(&self) -> f64 {
        self.angle_deg.rem_euclid(360.0)
    }

    /// True when the axis is vertical (α ≡ 90° or 270°)
    pub fn is_vertical(&self) -> bool {
        let a = self.normalized_angle();
        (a - 90.0).abs() < VERTICAL_TOLERANCE_DEG || (a - 270.0).abs() < VERTICAL_TOLERANCE_DEG
    }

    /// The axis as a directed line.
    ///
    /// Axis-aligned orientations get an exact unit direction so that
    /// symmetric sections produce exactly symmetric distances.
    pub fn line(&self) -> Line {
        let origin = if self.is_vertical() {
            Point2::new(self.intercept, 0.0)
        } else {
            Point2::new(0.0, self.intercept)
        };
        Line {
            origin,
            direction: axis_direction(self.normalized_angle()),
        }
    }

    /// Signed distance of `p` from the axis (negative on the compression side)
    pub fn signed_distance(&self, p: Point2) -> f64 {
        self.line().signed_distance(p)
    }

    /// Signed distances of every section vertex and every bar, in input order.
    pub fn distances(&self, section: &Section) -> SignedDistances {
        let line = self.line();
        SignedDistances {
            vertices: section
                .vertices()
                .iter()
                .map(|p| line.signed_distance(*p))
                .collect(),
            rebars: section
                .rebars()
                .iter()
                .map(|b| line.signed_distance(b.position()))
                .collect(),
        }
    }

    /// Segment of the axis inside the section outline, end points ordered
    /// along the axis direction.
    ///
    /// `None` when the axis misses the section or only touches one point.
    pub fn trace(&self, section: &Section) -> Option<[Point2; 2]> {
        let line = self.line();
        let hits = geometry::line_polygon_intersections(&line, section.vertices(), section.tolerance());
        let first = hits
            .iter()
            .copied()
            .min_by(|a, b| line.project(*a).total_cmp(&line.project(*b)))?;
        let last = hits
            .iter()
            .copied()
            .max_by(|a, b| line.project(*a).total_cmp(&line.project(*b)))?;
        if first == last {
            return None;
        }
        Some([first, last])
    }
}

/// Perpendicular distances from the neutral axis, compression negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedDistances {
    /// One entry per section vertex
    pub vertices: Vec<f64>,
    /// One entry per reinforcing bar
    pub rebars: Vec<f64>,
}

fn axis_direction(angle_deg: f64) -> Point2 {
    const QUARTERS: [(f64, Point2); 5] = [
        (0.0, Point2::new(1.0, 0.0)),
        (90.0, Point2::new(0.0, 1.0)),
        (180.0, Point2::new(-1.0, 0.0)),
        (270.0, Point2::new(0.0, -1.0)),
        (360.0, Point2::new(1.0, 0.0)),
    ];
    for (quarter, dir) in QUARTERS {
        if (angle_deg - quarter).abs() < VERTICAL_TOLERANCE_DEG {
            return dir;
        }
    }
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Point2::new(cos, sin)
}
