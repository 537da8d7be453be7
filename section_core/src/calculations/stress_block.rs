//! # Stress Block
//!
//! Classifies the section for one neutral axis and builds the compression
//! zone that carries the uniform concrete stress.
//!
//! ```text
//!   extreme fiber  ●────────────────●   ┐
//!                  │▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒▒│   │ a = β·|c|   stress block
//!   inner edge   ─ ─ ─ ─ ─ ─ ─ ─ ─ ─ ─  ┘ ┐
//!                  │                │     │ |c| − a
//!   neutral axis ──────────────────────   ┘
//!                  │    tension     │
//!                  ●────────────────●
//! ```
//!
//! ## States
//!
//! - **PureTension**: no vertex on the compression side; empty block, `c` is
//!   the largest bar distance (used only to scale tension strains)
//! - **PureCompression**: every vertex on the compression side; the block is
//!   the whole section, `c` is the most negative vertex distance
//! - **Mixed**: the block is the part of the section beyond the inner edge
//!
//! Vertices within the section tolerance of the axis count as compression
//! side. A section with no vertex beyond that band on the compression side is
//! pure tension, which keeps `c` away from zero in the mixed case. A mixed
//! block whose depth or area stays inside the band collapses to the same pure
//! tension state.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::neutral_axis::{NeutralAxis, SignedDistances};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::{self, Line, Point2};
use crate::section::Section;

/// Cross-section state for one neutral axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CrossSectionState {
    PureTension,
    PureCompression,
    Mixed,
}

impl CrossSectionState {
    pub fn display_name(&self) -> &'static str {
        match self {
            CrossSectionState::PureTension => "Pure tension",
            CrossSectionState::PureCompression => "Pure compression",
            CrossSectionState::Mixed => "Mixed tension/compression",
        }
    }
}

/// Classify a section from its vertex distances.
///
/// # Errors
///
/// `AmbiguousClassification` if a distance is not finite.
pub fn classify(vertex_distances: &[f64], tol: f64) -> CalcResult<CrossSectionState> {
    if let Some((vertex, &distance)) = vertex_distances
        .iter()
        .enumerate()
        .find(|(_, d)| !d.is_finite())
    {
        return Err(CalcError::AmbiguousClassification { vertex, distance });
    }

    let has_compression = vertex_distances.iter().any(|&d| d < -tol);
    let has_tension = vertex_distances.iter().any(|&d| d > tol);

    Ok(match (has_compression, has_tension) {
        (false, _) => CrossSectionState::PureTension,
        (true, false) => CrossSectionState::PureCompression,
        (true, true) => CrossSectionState::Mixed,
    })
}

/// Compression zone for one neutral axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressBlock {
    pub state: CrossSectionState,

    /// Counter-clockwise block outline; `None` in pure tension
    pub polygon: Option<Vec<Point2>>,

    /// Block area, 0 in pure tension
    pub area: f64,

    /// Block centroid; `None` in pure tension
    pub centroid: Option<Point2>,

    /// Signed distance c from the neutral axis to the extreme fiber
    pub extreme_fiber_distance: f64,

    /// Inner edge of the block (mixed state only)
    pub inner_edge: Option<Line>,
}

impl StressBlock {
    /// Whether `p` lies inside the block; always false when it is empty.
    pub fn contains(&self, p: Point2) -> bool {
        self.polygon
            .as_deref()
            .map(|poly| geometry::contains_point(poly, p))
            .unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        self.polygon.is_none()
    }
}

/// Build the stress block for `axis`.
///
/// `depth_factor` is the compression-zone depth reduction factor (β₁/λ).
///
/// # Errors
///
/// - `AmbiguousClassification` for non-finite distances
/// - `NonConvexOrderingFailure` if the ordered block is self-intersecting
pub fn build(
    section: &Section,
    axis: &NeutralAxis,
    distances: &SignedDistances,
    depth_factor: f64,
) -> CalcResult<StressBlock> {
    let tol = section.tolerance();
    let state = classify(&distances.vertices, tol)?;

    let block = match state {
        CrossSectionState::PureTension => tension_block(&distances.rebars, tol),
        CrossSectionState::PureCompression => StressBlock {
            state,
            polygon: Some(section.vertices().to_vec()),
            area: section.area(),
            centroid: Some(section.centroid()),
            extreme_fiber_distance: min_distance(&distances.vertices),
            inner_edge: None,
        },
        CrossSectionState::Mixed => match mixed_block(section, axis, &distances.vertices, depth_factor, tol)? {
            Some(block) => block,
            None => {
                debug!(
                    "axis ({}, {}): compression zone within tolerance, treated as pure tension",
                    axis.angle_deg, axis.intercept
                );
                tension_block(&distances.rebars, tol)
            }
        },
    };

    trace!(
        "axis ({}, {}): {:?}, c = {:.4}, block area = {:.4}",
        axis.angle_deg,
        axis.intercept,
        block.state,
        block.extreme_fiber_distance,
        block.area
    );
    Ok(block)
}

/// Empty block; `c` is the largest bar distance on the tension side.
fn tension_block(rebar_distances: &[f64], tol: f64) -> StressBlock {
    let c = rebar_distances
        .iter()
        .copied()
        .filter(|&d| d > tol)
        .fold(0.0, f64::max);
    StressBlock {
        state: CrossSectionState::PureTension,
        polygon: None,
        area: 0.0,
        centroid: None,
        extreme_fiber_distance: c,
        inner_edge: None,
    }
}

/// `None` when the block is too thin to form a polygon.
fn mixed_block(
    section: &Section,
    axis: &NeutralAxis,
    vertex_distances: &[f64],
    depth_factor: f64,
    tol: f64,
) -> CalcResult<Option<StressBlock>> {
    let c = min_distance(vertex_distances);
    let depth = depth_factor * c.abs();
    if depth <= tol {
        return Ok(None);
    }

    // Shift toward the compression (negative) side by |c| - a
    let inner_edge = axis.line().offset(-(c.abs() - depth));

    let mut points = geometry::line_polygon_intersections(&inner_edge, section.vertices(), tol);
    points.extend(geometry::compression_side_vertices(
        &inner_edge,
        section.vertices(),
        tol,
    ));

    let assembled = geometry::order_polygon_vertices(&points, section.vertices(), true).and_then(|polygon| {
        let area = geometry::polygon_area(&polygon)?;
        let centroid = geometry::polygon_centroid(&polygon)?;
        Ok((polygon, area, centroid))
    });
    let (polygon, area, centroid) = match assembled {
        Ok(parts) => parts,
        Err(CalcError::DegenerateGeometry { .. }) => return Ok(None),
        Err(e) => return Err(e),
    };
    if area <= tol * section.extent() {
        return Ok(None);
    }
    if !geometry::is_simple_polygon(&polygon) {
        return Err(CalcError::NonConvexOrderingFailure {
            vertex_count: polygon.len(),
        });
    }

    Ok(Some(StressBlock {
        state: CrossSectionState::Mixed,
        polygon: Some(polygon),
        area,
        centroid: Some(centroid),
        extreme_fiber_distance: c,
        inner_edge: Some(inner_edge),
    }))
}

fn min_distance(distances: &[f64]) -> f64 {
    distances.iter().copied().fold(f64::INFINITY, f64::min)
}
