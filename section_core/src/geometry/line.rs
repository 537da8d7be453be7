//! Infinite lines in the section plane.

use serde::{Deserialize, Serialize};

use super::Point2;
use crate::errors::{CalcError, CalcResult};

/// An infinite line through `origin` along the unit vector `direction`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub origin: Point2,
    pub direction: Point2,
}

impl Line {
    /// Line through `origin` at `angle_deg` measured counter-clockwise from +x.
    pub fn from_angle(origin: Point2, angle_deg: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Line {
            origin,
            direction: Point2::new(cos, sin),
        }
    }

    /// Line through two points, directed from `a` to `b`.
    ///
    /// # Errors
    ///
    /// `DegenerateGeometry` if the points coincide.
    pub fn through(a: Point2, b: Point2) -> CalcResult<Self> {
        let d = b - a;
        let len = d.length();
        if len == 0.0 || !len.is_finite() {
            return Err(CalcError::degenerate(format!(
                "line through coincident points ({}, {})",
                a.x, a.y
            )));
        }
        Ok(Line {
            origin: a,
            direction: d * (1.0 / len),
        })
    }

    /// Unit normal pointing to the positive (right-hand) side
    #[inline]
    pub fn normal(&self) -> Point2 {
        Point2::new(self.direction.y, -self.direction.x)
    }

    /// Signed perpendicular distance; positive right of the direction.
    #[inline]
    pub fn signed_distance(&self, p: Point2) -> f64 {
        self.normal().dot(p - self.origin)
    }

    /// Parallel line shifted by `distance` along the normal.
    pub fn offset(&self, distance: f64) -> Self {
        Line {
            origin: self.origin + self.normal() * distance,
            direction: self.direction,
        }
    }

    /// Point at parameter `t` along the direction
    pub fn point_at(&self, t: f64) -> Point2 {
        self.origin + self.direction * t
    }

    /// Parameter of the orthogonal projection of `p` onto the line
    pub fn project(&self, p: Point2) -> f64 {
        self.direction.dot(p - self.origin)
    }
}

/// Signed perpendicular distance from `point` to the line through `a` and `b`.
///
/// The sign is fixed by the direction from `a` to `b`: positive on its right,
/// negative on its left.
///
/// # Errors
///
/// `DegenerateGeometry` if `a` and `b` coincide.
///
/// # Example
/// ```rust
/// use section_core::geometry::{point_to_line_distance, Point2};
///
/// let a = Point2::new(0.0, 0.0);
/// let b = Point2::new(1.0, 0.0);
/// let d = point_to_line_distance(Point2::new(3.0, 2.0), a, b).unwrap();
/// assert!((d + 2.0).abs() < 1e-12);
/// ```
pub fn point_to_line_distance(point: Point2, a: Point2, b: Point2) -> CalcResult<f64> {
    Ok(Line::through(a, b)?.signed_distance(point))
}
