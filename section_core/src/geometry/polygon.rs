//! Polygon formulas for section outlines and stress blocks.
//!
//! ```text
//!      (x3,y3) ●─────────● (x2,y2)
//!              │         │
//!              │    ×    │   × = centroid
//!              │         │
//!      (x0,y0) ●─────────● (x1,y1)      counter-clockwise => positive area
//! ```

use std::cmp::Ordering;

use super::{Line, Point2};
use crate::errors::{CalcError, CalcResult};

/// Signed shoelace area. Positive for counter-clockwise vertex order.
///
/// # Formula
/// A = ½ Σ (xᵢ·yᵢ₊₁ − xᵢ₊₁·yᵢ)
pub fn signed_area(vertices: &[Point2]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += vertices[i].cross(vertices[j]);
    }
    sum * 0.5
}

/// Physical (absolute) polygon area.
///
/// # Errors
///
/// `DegenerateGeometry` if fewer than 3 distinct vertices are given.
///
/// # Example
/// ```rust
/// use section_core::geometry::{polygon_area, Point2};
///
/// let square = [
///     Point2::new(-8.0, 8.0),
///     Point2::new(8.0, 8.0),
///     Point2::new(8.0, -8.0),
///     Point2::new(-8.0, -8.0),
/// ];
/// assert_eq!(polygon_area(&square).unwrap(), 256.0);
/// ```
pub fn polygon_area(vertices: &[Point2]) -> CalcResult<f64> {
    let distinct = count_distinct(vertices);
    if distinct < 3 {
        return Err(CalcError::degenerate(format!(
            "polygon needs at least 3 distinct vertices, got {}",
            distinct
        )));
    }
    Ok(signed_area(vertices).abs())
}

/// Polygon centroid.
///
/// # Formula
/// Cx = 1/(6A) Σ (xᵢ + xᵢ₊₁)(xᵢ·yᵢ₊₁ − xᵢ₊₁·yᵢ), Cy likewise with y
///
/// # Errors
///
/// `DegenerateGeometry` for zero-area input; the centroid is undefined there.
pub fn polygon_centroid(vertices: &[Point2]) -> CalcResult<Point2> {
    polygon_area(vertices)?;

    let n = vertices.len();
    let mut twice_area = 0.0;
    let mut magnitude = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let p = vertices[i];
        let q = vertices[(i + 1) % n];
        let cross = p.cross(q);
        twice_area += cross;
        magnitude += cross.abs();
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }

    if twice_area.abs() <= 1e-12 * magnitude || twice_area == 0.0 {
        return Err(CalcError::degenerate("centroid of a zero-area polygon"));
    }

    let factor = 1.0 / (3.0 * twice_area);
    Ok(Point2::new(cx * factor, cy * factor))
}

/// Axis-aligned bounds as (min, max), `None` for an empty slice.
pub fn bounding_box(vertices: &[Point2]) -> Option<(Point2, Point2)> {
    let first = *vertices.first()?;
    Some(vertices.iter().skip(1).fold((first, first), |(lo, hi), p| {
        (
            Point2::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point2::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

/// Every point where the infinite `line` meets the polygon boundary.
///
/// Vertices within `tol` of the line are reported once (tangency), an edge
/// lying on the line contributes only its two endpoints, and each proper
/// crossing contributes the interpolated point. Output follows boundary order.
pub fn line_polygon_intersections(line: &Line, polygon: &[Point2], tol: f64) -> Vec<Point2> {
    let n = polygon.len();
    let distances: Vec<f64> = polygon.iter().map(|p| line.signed_distance(*p)).collect();
    let mut hits: Vec<Point2> = Vec::new();

    for i in 0..n {
        let j = (i + 1) % n;
        let (di, dj) = (distances[i], distances[j]);

        if di.abs() <= tol {
            push_unique(&mut hits, polygon[i], tol);
        }

        let crosses = (di < -tol && dj > tol) || (di > tol && dj < -tol);
        if crosses {
            let t = di / (di - dj);
            let p = polygon[i] + (polygon[j] - polygon[i]) * t;
            push_unique(&mut hits, p, tol);
        }
    }

    hits
}

/// Vertices lying strictly on the negative (compression) side of `line`,
/// beyond the tolerance band.
pub fn compression_side_vertices(line: &Line, polygon: &[Point2], tol: f64) -> Vec<Point2> {
    polygon
        .iter()
        .copied()
        .filter(|p| line.signed_distance(*p) < -tol)
        .collect()
}

/// Orders boundary and intersection points into a polygon by their angle
/// about the centroid of `reference`.
///
/// Known limitation: the result is only guaranteed to be a simple polygon for
/// convex (or star-shaped about that centroid) regions. Strongly non-convex
/// sections such as T- or L-shapes can produce self-intersecting output;
/// callers check with [`is_simple_polygon`].
///
/// # Errors
///
/// `DegenerateGeometry` if fewer than 3 distinct points remain, or the
/// reference polygon has no centroid.
pub fn order_polygon_vertices(
    points: &[Point2],
    reference: &[Point2],
    counterclockwise: bool,
) -> CalcResult<Vec<Point2>> {
    let center = polygon_centroid(reference)?;

    let mut ordered: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if !ordered.contains(p) {
            ordered.push(*p);
        }
    }
    if ordered.len() < 3 {
        return Err(CalcError::degenerate(format!(
            "cannot order {} distinct points into a polygon",
            ordered.len()
        )));
    }

    ordered.sort_by(|a, b| {
        let ta = (a.y - center.y).atan2(a.x - center.x);
        let tb = (b.y - center.y).atan2(b.x - center.x);
        ta.total_cmp(&tb).then_with(|| {
            // Same bearing: nearer point first
            a.distance_to(center)
                .partial_cmp(&b.distance_to(center))
                .unwrap_or(Ordering::Equal)
        })
    });

    if !counterclockwise {
        ordered.reverse();
    }
    Ok(ordered)
}

/// Even-odd point-in-polygon test. Points exactly on the boundary may go either way.
pub fn contains_point(polygon: &[Point2], p: Point2) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// True when no two non-adjacent edges properly cross each other.
pub fn is_simple_polygon(polygon: &[Point2]) -> bool {
    let n = polygon.len();
    if n < 4 {
        return n == 3;
    }
    for i in 0..n {
        let (a1, a2) = (polygon[i], polygon[(i + 1) % n]);
        for j in (i + 2)..n {
            // First and last edges share a vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            let (b1, b2) = (polygon[j], polygon[(j + 1) % n]);
            if segments_cross(a1, a2, b1, b2) {
                return false;
            }
        }
    }
    true
}

fn segments_cross(a1: Point2, a2: Point2, b1: Point2, b2: Point2) -> bool {
    let o1 = (a2 - a1).cross(b1 - a1);
    let o2 = (a2 - a1).cross(b2 - a1);
    let o3 = (b2 - b1).cross(a1 - b1);
    let o4 = (b2 - b1).cross(a2 - b1);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

fn push_unique(points: &mut Vec<Point2>, p: Point2, tol: f64) {
    if !points.iter().any(|q| q.distance_to(p) <= tol) {
        points.push(p);
    }
}

fn count_distinct(vertices: &[Point2]) -> usize {
    let mut seen: Vec<Point2> = Vec::with_capacity(vertices.len());
    for v in vertices {
        if !seen.contains(v) {
            seen.push(*v);
        }
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const TOL: f64 = 1e-9;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(-8.0, 8.0),
            Point2::new(8.0, 8.0),
            Point2::new(8.0, -8.0),
            Point2::new(-8.0, -8.0),
        ]
    }

    fn l_shape() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 4.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 10.0),
            Point2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_area_invariant_under_rotation_and_reversal() {
        let base = vec![
            Point2::new(0.0, 0.0),
            Point2::new(6.0, -1.0),
            Point2::new(9.0, 4.0),
            Point2::new(3.0, 8.0),
            Point2::new(-2.0, 5.0),
        ];
        let expected = polygon_area(&base).unwrap();
        for shift in 0..base.len() {
            let mut rotated = base.clone();
            rotated.rotate_left(shift);
            assert_abs_diff_eq!(polygon_area(&rotated).unwrap(), expected, epsilon = 1e-9);
            rotated.reverse();
            assert_abs_diff_eq!(polygon_area(&rotated).unwrap(), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_signed_area_winding() {
        let mut pts = square();
        // Listed clockwise
        assert_abs_diff_eq!(signed_area(&pts), -256.0);
        pts.reverse();
        assert_abs_diff_eq!(signed_area(&pts), 256.0);
    }

    #[test]
    fn test_area_requires_three_distinct_vertices() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(0.0, 0.0)];
        assert!(matches!(
            polygon_area(&pts),
            Err(CalcError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_centroid_of_l_shape() {
        // Two rectangles: 10x4 at (5, 2) and 4x6 at (2, 7)
        let c = polygon_centroid(&l_shape()).unwrap();
        let area = 40.0 + 24.0;
        assert_abs_diff_eq!(c.x, (40.0 * 5.0 + 24.0 * 2.0) / area, epsilon = 1e-12);
        assert_abs_diff_eq!(c.y, (40.0 * 2.0 + 24.0 * 7.0) / area, epsilon = 1e-12);
    }

    #[test]
    fn test_centroid_rejects_collinear_points() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 1.0), Point2::new(2.0, 2.0)];
        assert!(polygon_centroid(&pts).is_err());
    }

    #[test]
    fn test_intersections_through_middle() {
        let line = Line::from_angle(Point2::new(0.0, 2.0), 0.0);
        let hits = line_polygon_intersections(&line, &square(), TOL);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|p| (p.y - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_intersections_collinear_edge() {
        let line = Line::from_angle(Point2::new(0.0, 8.0), 0.0);
        let hits = line_polygon_intersections(&line, &square(), TOL);
        assert_eq!(hits, vec![Point2::new(-8.0, 8.0), Point2::new(8.0, 8.0)]);
    }

    #[test]
    fn test_intersections_tangent_vertex() {
        // Touches the square only at (8, 8)
        let line = Line::from_angle(Point2::new(0.0, 16.0), -45.0);
        let hits = line_polygon_intersections(&line, &square(), TOL);
        assert_eq!(hits.len(), 1);
        assert_abs_diff_eq!(hits[0].x, 8.0, epsilon = 1e-9);
        assert_abs_diff_eq!(hits[0].y, 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_intersections_through_opposite_corners() {
        let line = Line::from_angle(Point2::new(0.0, 0.0), 45.0);
        let hits = line_polygon_intersections(&line, &square(), TOL);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_intersections_miss() {
        let line = Line::from_angle(Point2::new(0.0, 20.0), 0.0);
        assert!(line_polygon_intersections(&line, &square(), TOL).is_empty());
    }

    #[test]
    fn test_intersections_non_convex() {
        // x = 2 crosses the bottom and top edges
        let vertical = Line::from_angle(Point2::new(2.0, 0.0), 90.0);
        assert_eq!(line_polygon_intersections(&vertical, &l_shape(), TOL).len(), 2);
        let horizontal = Line::from_angle(Point2::new(0.0, 4.0), 0.0);
        // y = 4 runs along the step: endpoints (10,4), (4,4) plus the crossing at x = 0
        assert_eq!(line_polygon_intersections(&horizontal, &l_shape(), TOL).len(), 3);
    }

    #[test]
    fn test_compression_side_vertices() {
        // Direction +x: the left (upper) side is negative
        let line = Line::from_angle(Point2::new(0.0, 0.0), 0.0);
        let above = compression_side_vertices(&line, &square(), TOL);
        assert_eq!(above, vec![Point2::new(-8.0, 8.0), Point2::new(8.0, 8.0)]);
    }

    #[test]
    fn test_order_shuffled_square() {
        let shuffled = vec![
            Point2::new(8.0, -8.0),
            Point2::new(-8.0, 8.0),
            Point2::new(-8.0, -8.0),
            Point2::new(8.0, 8.0),
        ];
        let ccw = order_polygon_vertices(&shuffled, &square(), true).unwrap();
        assert_abs_diff_eq!(signed_area(&ccw), 256.0);
        let cw = order_polygon_vertices(&shuffled, &square(), false).unwrap();
        assert_abs_diff_eq!(signed_area(&cw), -256.0);
    }

    #[test]
    fn test_order_sliver_about_outside_centroid() {
        // Top strip of the square; the section centroid lies outside it
        let strip = vec![
            Point2::new(8.0, 6.0),
            Point2::new(-8.0, 6.0),
            Point2::new(-8.0, 8.0),
            Point2::new(8.0, 8.0),
        ];
        let ordered = order_polygon_vertices(&strip, &square(), true).unwrap();
        assert!(is_simple_polygon(&ordered));
        assert_abs_diff_eq!(signed_area(&ordered), 32.0, epsilon = 1e-9);
    }

    #[test]
    fn test_order_needs_three_points() {
        let pts = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(1.0, 0.0)];
        assert!(order_polygon_vertices(&pts, &square(), true).is_err());
    }

    #[test]
    fn test_contains_point() {
        let l = l_shape();
        assert!(contains_point(&l, Point2::new(2.0, 8.0)));
        assert!(contains_point(&l, Point2::new(8.0, 2.0)));
        assert!(!contains_point(&l, Point2::new(8.0, 8.0)));
        assert!(!contains_point(&[], Point2::new(0.0, 0.0)));
    }

    #[test]
    fn test_simple_polygon_detection() {
        assert!(is_simple_polygon(&square()));
        assert!(is_simple_polygon(&l_shape()));
        let bowtie = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 4.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        ];
        assert!(!is_simple_polygon(&bowtie));
    }

    #[test]
    fn test_bounding_box() {
        let (lo, hi) = bounding_box(&l_shape()).unwrap();
        assert_eq!(lo, Point2::new(0.0, 0.0));
        assert_eq!(hi, Point2::new(10.0, 10.0));
        assert!(bounding_box(&[]).is_none());
    }
}
