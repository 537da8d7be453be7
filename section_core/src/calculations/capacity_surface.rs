//! # Capacity Surface Sweep
//!
//! Evaluates every (angle, intercept) cell of a neutral-axis grid and collects
//! the resulting (P, Mx, My) points with their generating parameters.
//!
//! Cells are independent. The sweep runs them on the rayon thread pool unless
//! `parallel` is off; output order always follows grid order (angle-major).
//! A cell that fails with a geometry error is recorded in `failures` and the
//! sweep carries on; input errors abort the whole sweep.
//!
//! ## Example
//!
//! ```rust
//! use section_core::calculations::capacity_surface::{calculate, SweepConfig};
//! use section_core::calculations::sample::AnalysisInput;
//! use section_core::materials::MaterialParameters;
//! use section_core::section::{Rebar, Section};
//!
//! let section = Section::rectangular(16.0, 16.0, vec![Rebar::new(0.0, -6.0, 1.0)]).unwrap();
//! let input = AnalysisInput::new("C-1", section, MaterialParameters::aci(4.0, 60.0));
//!
//! let surface = calculate(&input, &SweepConfig::default()).unwrap();
//! assert_eq!(surface.points.len() + surface.failures.len(), 72 * 41);
//! ```

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::neutral_axis::NeutralAxis;
use super::sample::{self, AnalysisInput, CapacityPoint};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::Point2;
use crate::section::Section;

/// Upper bound on grid cells per sweep
pub const MAX_GRID_CELLS: usize = 2_000_000;

/// Neutral-axis orientations, `end_deg` exclusive.
///
/// ## JSON Example
///
/// ```json
/// { "start_deg": 0.0, "end_deg": 360.0, "step_deg": 5.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleRange {
    pub start_deg: f64,
    pub end_deg: f64,
    pub step_deg: f64,
}

impl Default for AngleRange {
    fn default() -> Self {
        AngleRange {
            start_deg: 0.0,
            end_deg: 360.0,
            step_deg: 5.0,
        }
    }
}

impl AngleRange {
    pub fn validate(&self) -> CalcResult<()> {
        check_step("angles.step_deg", self.step_deg)?;
        if !self.start_deg.is_finite() || !self.end_deg.is_finite() || self.end_deg <= self.start_deg {
            return Err(CalcError::invalid_input(
                "angles",
                format!("{}..{}", self.start_deg, self.end_deg),
                "Angle range must be finite with end greater than start",
            ));
        }
        Ok(())
    }

    /// Number of angles in the range
    pub fn count(&self) -> usize {
        ((self.end_deg - self.start_deg) / self.step_deg - 1e-9).ceil().max(0.0) as usize
    }

    pub fn values(&self) -> Vec<f64> {
        (0..self.count())
            .map(|i| self.start_deg + i as f64 * self.step_deg)
            .collect()
    }
}

/// How intercepts are chosen for each angle.
///
/// ## JSON Examples
///
/// ```json
/// { "mode": "explicit", "start": -16.0, "end": 16.0, "step": 2.0 }
/// { "mode": "spanning", "divisions": 40, "margin": 0.05 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InterceptRange {
    /// Same intercepts for every angle, `end` inclusive
    Explicit { start: f64, end: f64, step: f64 },

    /// Per angle, `divisions` equal steps across the intercepts that put the
    /// axis through each vertex, widened by `margin` times that span on both
    /// sides. With a positive margin the first and last cells lie fully
    /// outside the section.
    Spanning { divisions: usize, margin: f64 },
}

impl Default for InterceptRange {
    fn default() -> Self {
        InterceptRange::Spanning {
            divisions: 40,
            margin: 0.05,
        }
    }
}

impl InterceptRange {
    pub fn validate(&self) -> CalcResult<()> {
        match *self {
            InterceptRange::Explicit { start, end, step } => {
                check_step("intercepts.step", step)?;
                if !start.is_finite() || !end.is_finite() || end < start {
                    return Err(CalcError::invalid_input(
                        "intercepts",
                        format!("{}..={}", start, end),
                        "Intercept range must be finite with end not less than start",
                    ));
                }
            }
            InterceptRange::Spanning { divisions, margin } => {
                if divisions == 0 {
                    return Err(CalcError::invalid_input(
                        "intercepts.divisions",
                        "0",
                        "At least one division is required",
                    ));
                }
                if !margin.is_finite() || margin < 0.0 {
                    return Err(CalcError::invalid_input(
                        "intercepts.margin",
                        margin.to_string(),
                        "Margin must be a non-negative number",
                    ));
                }
            }
        }
        Ok(())
    }

    /// Number of intercepts per angle
    pub fn count(&self) -> usize {
        match *self {
            // Float to usize casts saturate, so oversized ranges stay above the grid budget
            InterceptRange::Explicit { start, end, step } => {
                (((end - start) / step + 1e-9).floor().max(0.0) as usize).saturating_add(1)
            }
            InterceptRange::Spanning { divisions, .. } => divisions.saturating_add(1),
        }
    }

    /// Intercepts used at `angle_deg` for `section`
    pub fn values(&self, section: &Section, angle_deg: f64) -> Vec<f64> {
        match *self {
            InterceptRange::Explicit { start, step, .. } => {
                (0..self.count()).map(|i| start + i as f64 * step).collect()
            }
            InterceptRange::Spanning { divisions, margin } => {
                let (lo, hi) = spanning_intercepts(section.vertices(), angle_deg);
                let pad = margin * (hi - lo);
                let (lo, hi) = (lo - pad, hi + pad);
                let step = (hi - lo) / divisions as f64;
                (0..=divisions).map(|i| lo + i as f64 * step).collect()
            }
        }
    }
}

/// Smallest and largest intercept at which an axis of `angle_deg` touches a vertex
pub fn spanning_intercepts(vertices: &[Point2], angle_deg: f64) -> (f64, f64) {
    let probe = NeutralAxis::new(angle_deg, 0.0);
    let intercept_through = |p: &Point2| {
        if probe.is_vertical() {
            p.x
        } else {
            p.y - angle_deg.to_radians().tan() * p.x
        }
    };
    vertices
        .iter()
        .map(intercept_through)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| (lo.min(b), hi.max(b)))
}

fn check_step(field: &str, step: f64) -> CalcResult<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(CalcError::invalid_input(field, step.to_string(), "Step must be positive"));
    }
    Ok(())
}

fn default_parallel() -> bool {
    true
}

/// Sweep grid definition.
///
/// ## JSON Example
///
/// ```json
/// {
///   "angles": { "start_deg": 0.0, "end_deg": 360.0, "step_deg": 5.0 },
///   "intercepts": { "mode": "explicit", "start": -16.0, "end": 16.0, "step": 2.0 },
///   "parallel": true
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    #[serde(default)]
    pub angles: AngleRange,

    #[serde(default)]
    pub intercepts: InterceptRange,

    /// Evaluate cells on the rayon pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            angles: AngleRange::default(),
            intercepts: InterceptRange::default(),
            parallel: true,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> CalcResult<()> {
        self.angles.validate()?;
        self.intercepts.validate()?;
        let cells = self.cell_count();
        if cells > MAX_GRID_CELLS {
            return Err(CalcError::invalid_input(
                "sweep",
                cells.to_string(),
                format!("Grid exceeds {} cells; increase the step sizes", MAX_GRID_CELLS),
            ));
        }
        Ok(())
    }

    pub fn cell_count(&self) -> usize {
        self.angles.count().saturating_mul(self.intercepts.count())
    }

    /// Every neutral axis of the grid, angle-major
    pub fn grid(&self, section: &Section) -> Vec<NeutralAxis> {
        self.angles
            .values()
            .into_iter()
            .flat_map(|angle| {
                self.intercepts
                    .values(section, angle)
                    .into_iter()
                    .map(move |b| NeutralAxis::new(angle, b))
            })
            .collect()
    }
}

/// A grid cell that could not be evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleFailure {
    pub angle_deg: f64,
    pub intercept: f64,
    pub error: CalcError,
}

/// Extreme points of a surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceSummary {
    pub evaluated: usize,
    pub failed: usize,
    /// Most negative P
    pub max_compression: Option<CapacityPoint>,
    /// Most positive P
    pub max_tension: Option<CapacityPoint>,
    pub max_abs_mx: Option<CapacityPoint>,
    pub max_abs_my: Option<CapacityPoint>,
}

/// Results of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySurface {
    pub label: String,

    /// Coordinates of the moment reference used for every point
    pub reference_point: Point2,

    pub points: Vec<CapacityPoint>,

    #[serde(default)]
    pub failures: Vec<SampleFailure>,
}

impl CapacitySurface {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn summary(&self) -> SurfaceSummary {
        let pick = |better: fn(&CapacityPoint, &CapacityPoint) -> bool| {
            self.points.iter().copied().fold(None, |best: Option<CapacityPoint>, p| match best {
                Some(b) if !better(&p, &b) => Some(b),
                _ => Some(p),
            })
        };
        SurfaceSummary {
            evaluated: self.points.len(),
            failed: self.failures.len(),
            max_compression: pick(|a, b| a.p < b.p),
            max_tension: pick(|a, b| a.p > b.p),
            max_abs_mx: pick(|a, b| a.mx.abs() > b.mx.abs()),
            max_abs_my: pick(|a, b| a.my.abs() > b.my.abs()),
        }
    }

    /// Point generated by exactly this axis, if it was evaluated
    pub fn find(&self, angle_deg: f64, intercept: f64) -> Option<&CapacityPoint> {
        self.points
            .iter()
            .find(|p| p.angle_deg == angle_deg && p.intercept == intercept)
    }
}

/// Sweep the neutral-axis grid.
///
/// # Errors
///
/// `InvalidInput` for invalid materials or grid settings, or any error that is
/// not local to one sample. Sample-local errors end up in `failures`.
pub fn calculate(input: &AnalysisInput, config: &SweepConfig) -> CalcResult<CapacitySurface> {
    input.validate()?;
    config.validate()?;

    let reference = input.reference_point();
    let grid = config.grid(&input.section);
    debug!(
        "sweeping '{}': {} cells ({} angles), parallel = {}",
        input.label,
        grid.len(),
        config.angles.count(),
        config.parallel
    );

    let run = |axis: NeutralAxis| (axis, sample::evaluate(input, reference, axis).map(|r| r.capacity));
    let outcomes: Vec<_> = if config.parallel {
        grid.into_par_iter().map(run).collect()
    } else {
        grid.into_iter().map(run).collect()
    };

    let mut points = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();
    for (axis, outcome) in outcomes {
        match outcome {
            Ok(point) => points.push(point),
            Err(error) if error.is_sample_local() => {
                warn!(
                    "sample at angle {} intercept {} failed: {}",
                    axis.angle_deg, axis.intercept, error
                );
                failures.push(SampleFailure {
                    angle_deg: axis.angle_deg,
                    intercept: axis.intercept,
                    error,
                });
            }
            Err(error) => return Err(error),
        }
    }

    let surface = CapacitySurface {
        label: input.label.clone(),
        reference_point: reference,
        points,
        failures,
    };
    let summary = surface.summary();
    info!(
        "'{}': {} points evaluated, {} failed",
        surface.label, summary.evaluated, summary.failed
    );
    if let (Some(c), Some(t)) = (summary.max_compression, summary.max_tension) {
        info!("'{}': P from {:.3} to {:.3}", surface.label, c.p, t.p);
    }
    Ok(surface)
}
