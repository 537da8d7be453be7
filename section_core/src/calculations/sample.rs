//! # Single Neutral-Axis Sample
//!
//! Runs the full chain for one neutral axis: signed distances, stress block,
//! bar strains and stresses, then force and moment equilibrium.
//!
//! ## Example
//!
//! ```rust
//! use section_core::calculations::sample::{calculate, AnalysisInput};
//! use section_core::calculations::NeutralAxis;
//! use section_core::materials::MaterialParameters;
//! use section_core::section::{Rebar, Section};
//!
//! let section = Section::rectangular(16.0, 16.0, vec![
//!     Rebar::new(-5.6, 5.6, 0.79),
//!     Rebar::new(5.6, -5.6, 0.79),
//! ]).unwrap();
//! let input = AnalysisInput::new("C-1", section, MaterialParameters::aci(4.0, 60.0));
//!
//! let result = calculate(&input, NeutralAxis::new(0.0, 0.0)).unwrap();
//! assert!(result.capacity.p < 0.0);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use super::equilibrium::{
    self, ForceResultant, MomentReference, PointForce, ResultantDecomposition,
};
use super::neutral_axis::{NeutralAxis, SignedDistances};
use super::reinforcement;
use super::stress_block::{self, CrossSectionState, StressBlock};
use crate::errors::{CalcError, CalcResult};
use crate::geometry::Point2;
use crate::materials::MaterialParameters;
use crate::section::Section;

/// Everything fixed for one analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "C-1",
///   "section": {
///     "vertices": [{ "x": -8.0, "y": 8.0 }, { "x": 8.0, "y": 8.0 },
///                  { "x": 8.0, "y": -8.0 }, { "x": -8.0, "y": -8.0 }],
///     "rebars": [{ "x": -5.6, "y": 5.6, "area": 0.79 }]
///   },
///   "material": {
///     "fck": 4.0, "fyk": 60.0, "es": 29000.0, "eps_cu": 0.003,
///     "gamma_c": 1.0, "gamma_s": 1.0, "stress_block_factor": 0.85
///   },
///   "moment_reference": "origin"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    /// User label for this section (e.g., "C-1", "Pier 3")
    pub label: String,

    pub section: Section,

    pub material: MaterialParameters,

    /// Point about which Mx and My are reported
    #[serde(default)]
    pub moment_reference: MomentReference,
}

impl AnalysisInput {
    pub fn new(label: impl Into<String>, section: Section, material: MaterialParameters) -> Self {
        AnalysisInput {
            label: label.into(),
            section,
            material,
            moment_reference: MomentReference::default(),
        }
    }

    pub fn with_moment_reference(mut self, reference: MomentReference) -> Self {
        self.moment_reference = reference;
        self
    }

    /// Validate input parameters. The section validates itself on construction.
    pub fn validate(&self) -> CalcResult<()> {
        self.material.validate()
    }

    /// Moment reference resolved to coordinates
    pub fn reference_point(&self) -> Point2 {
        self.moment_reference.point(&self.section, &self.material)
    }
}

/// Response of one reinforcing bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarResult {
    /// Index into the section's bar list
    pub index: usize,
    pub position: Point2,
    pub area: f64,
    /// Signed distance from the neutral axis
    pub distance: f64,
    pub strain: f64,
    pub stress: f64,
    pub in_stress_block: bool,
    pub force: f64,
}

/// One point of the capacity surface with the axis that produced it.
///
/// ## JSON Example
///
/// ```json
/// { "angle_deg": 90.0, "intercept": 0.0, "p": -361.862, "mx": 0.0, "my": -3249.147 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityPoint {
    pub angle_deg: f64,
    pub intercept: f64,
    /// Axial force P (compression negative)
    pub p: f64,
    pub mx: f64,
    pub my: f64,
}

impl CapacityPoint {
    pub fn axis(&self) -> NeutralAxis {
        NeutralAxis::new(self.angle_deg, self.intercept)
    }

    /// Direction of the moment vector in degrees, [0, 360)
    pub fn moment_angle(&self) -> Option<f64> {
        equilibrium::moment_vector_angle(self.mx, self.my)
    }
}

/// Full results of a single sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleResult {
    pub axis: NeutralAxis,

    /// Coordinates of the moment reference
    pub reference_point: Point2,

    pub distances: SignedDistances,

    pub stress_block: StressBlock,

    /// Part of the neutral axis inside the section, for drawing
    pub neutral_axis_trace: Option<[Point2; 2]>,

    pub bars: Vec<BarResult>,

    /// True when the extreme fiber distance was zero and strains were set to zero
    pub singular_strain: bool,

    /// Concrete block contribution
    pub concrete: ForceResultant,

    pub capacity: CapacityPoint,

    pub resultants: ResultantDecomposition,

    /// Direction of the total moment vector in degrees
    pub moment_angle_deg: Option<f64>,
}

impl SampleResult {
    pub fn state(&self) -> CrossSectionState {
        self.stress_block.state
    }

    /// Largest |C + T − P| over force and both moments
    pub fn equilibrium_residual(&self) -> f64 {
        let c = &self.resultants.compression;
        let t = &self.resultants.tension;
        let cap = &self.capacity;
        (c.force + t.force - cap.p)
            .abs()
            .max((c.mx + t.mx - cap.mx).abs())
            .max((c.my + t.my - cap.my).abs())
    }
}

/// Evaluate one neutral axis.
///
/// # Errors
///
/// - `InvalidInput` for invalid materials or a non-finite axis
/// - Sample-local geometry errors from the stress block builder
pub fn calculate(input: &AnalysisInput, axis: NeutralAxis) -> CalcResult<SampleResult> {
    input.validate()?;
    if !axis.angle_deg.is_finite() {
        return Err(CalcError::invalid_input(
            "angle_deg",
            axis.angle_deg.to_string(),
            "Neutral axis angle must be finite",
        ));
    }
    if !axis.intercept.is_finite() {
        return Err(CalcError::invalid_input(
            "intercept",
            axis.intercept.to_string(),
            "Neutral axis intercept must be finite",
        ));
    }
    evaluate(input, input.reference_point(), axis)
}

/// Sample evaluation without input validation; the sweep validates once.
pub(crate) fn evaluate(
    input: &AnalysisInput,
    reference: Point2,
    axis: NeutralAxis,
) -> CalcResult<SampleResult> {
    let section = &input.section;
    let material = &input.material;

    let distances = axis.distances(section);
    let block = stress_block::build(section, &axis, &distances, material.stress_block_factor)?;

    let (strains, singular_strain) =
        match reinforcement::rebar_strains(&distances.rebars, block.extreme_fiber_distance, material.eps_cu) {
            Ok(strains) => (strains, false),
            Err(CalcError::SingularNeutralAxis { extreme_fiber_distance }) => {
                debug!(
                    "axis ({}, {}): extreme fiber distance {}, bar strains set to zero",
                    axis.angle_deg, axis.intercept, extreme_fiber_distance
                );
                (vec![0.0; distances.rebars.len()], true)
            }
            Err(e) => return Err(e),
        };
    let in_block = reinforcement::rebars_in_stress_block(section, &block);

    let bars: Vec<BarResult> = section
        .rebars()
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let stress = reinforcement::rebar_stress(strains[i], material);
            BarResult {
                index: i,
                position: bar.position(),
                area: bar.area,
                distance: distances.rebars[i],
                strain: strains[i],
                stress,
                in_stress_block: in_block[i],
                force: equilibrium::rebar_force(stress, bar.area, in_block[i], material),
            }
        })
        .collect();

    let concrete_force = block
        .centroid
        .map(|c| PointForce::new(equilibrium::concrete_force(block.area, material), c));
    let bar_forces: Vec<PointForce> = bars
        .iter()
        .map(|b| PointForce::new(b.force, b.position))
        .collect();

    let concrete = ForceResultant::from_forces(concrete_force.iter(), reference);
    let total = ForceResultant::from_forces(concrete_force.iter().chain(bar_forces.iter()), reference);
    let resultants = equilibrium::decompose(concrete_force.as_ref(), &bar_forces, reference);

    Ok(SampleResult {
        axis,
        reference_point: reference,
        neutral_axis_trace: axis.trace(section),
        distances,
        stress_block: block,
        bars,
        singular_strain,
        concrete,
        capacity: CapacityPoint {
            angle_deg: axis.angle_deg,
            intercept: axis.intercept,
            p: total.force,
            mx: total.mx,
            my: total.my,
        },
        resultants,
        moment_angle_deg: total.moment_angle(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Rebar;
    use approx::assert_abs_diff_eq;

    fn column_input() -> AnalysisInput {
        let bars = [
            (-5.6, 5.6),
            (0.0, 5.6),
            (5.6, 5.6),
            (5.6, 0.0),
            (5.6, -5.6),
            (0.0, -5.6),
            (-5.6, -5.6),
            (-5.6, 0.0),
        ]
        .iter()
        .map(|&(x, y)| Rebar::new(x, y, 0.79))
        .collect();
        let section = Section::rectangular(16.0, 16.0, bars).unwrap();
        AnalysisInput::new("C-1", section, MaterialParameters::aci(4.0, 60.0))
    }

    #[test]
    fn test_vertical_axis_hand_calculation() {
        let result = calculate(&column_input(), NeutralAxis::new(90.0, 0.0)).unwrap();

        assert_eq!(result.state(), CrossSectionState::Mixed);
        assert_abs_diff_eq!(result.stress_block.area, 108.8, epsilon = 1e-9);
        assert_abs_diff_eq!(result.concrete.force, -369.92, epsilon = 1e-9);

        // Left column of bars yields in compression inside the block
        for bar in result.bars.iter().filter(|b| b.position.x < 0.0) {
            assert!(bar.in_stress_block);
            assert_eq!(bar.stress, -60.0);
            assert_abs_diff_eq!(bar.force, -44.714, epsilon = 1e-9);
        }
        for bar in result.bars.iter().filter(|b| b.position.x == 0.0) {
            assert!(!bar.in_stress_block);
            assert_eq!(bar.force, 0.0);
        }

        assert_abs_diff_eq!(result.capacity.p, -361.862, epsilon = 1e-9);
        assert_abs_diff_eq!(result.capacity.mx, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.capacity.my, -3249.1472, epsilon = 1e-9);
        assert!(!result.singular_strain);
    }

    #[test]
    fn test_compression_plus_tension_is_total() {
        let input = column_input();
        for (angle, intercept) in [(0.0, 3.0), (37.0, -2.5), (90.0, 0.0), (225.0, 6.0), (300.0, -9.0)] {
            let result = calculate(&input, NeutralAxis::new(angle, intercept)).unwrap();
            assert!(result.equilibrium_residual() < 1e-9, "axis ({}, {})", angle, intercept);
        }
    }

    #[test]
    fn test_pure_tension_has_no_concrete() {
        let result = calculate(&column_input(), NeutralAxis::new(0.0, 40.0)).unwrap();
        assert_eq!(result.state(), CrossSectionState::PureTension);
        assert_eq!(result.concrete.force, 0.0);
        assert_eq!(result.concrete.ex, None);
        assert!(result.bars.iter().all(|b| !b.in_stress_block));
        // Every bar strain is past yield
        assert_abs_diff_eq!(result.capacity.p, 8.0 * 60.0 * 0.79, epsilon = 1e-9);
        assert!(result.neutral_axis_trace.is_none());
    }

    #[test]
    fn test_squash_load() {
        let input = column_input();
        let result = calculate(&input, NeutralAxis::new(0.0, -40.0)).unwrap();
        assert_eq!(result.state(), CrossSectionState::PureCompression);
        let expected = -3.4 * 256.0 + 8.0 * (-60.0 + 3.4) * 0.79;
        assert_abs_diff_eq!(result.capacity.p, expected, epsilon = 1e-9);
        assert_abs_diff_eq!(result.capacity.mx, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.capacity.my, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_barless_tension_is_singular_not_an_error() {
        let section = Section::rectangular(10.0, 10.0, vec![]).unwrap();
        let input = AnalysisInput::new("plain", section, MaterialParameters::aci(4.0, 60.0));
        let result = calculate(&input, NeutralAxis::new(0.0, 50.0)).unwrap();
        assert!(result.singular_strain);
        assert_eq!(result.capacity.p, 0.0);
        assert_eq!(result.moment_angle_deg, None);
    }

    #[test]
    fn test_moment_reference_shift() {
        let axis = NeutralAxis::new(0.0, 2.0);
        let origin = calculate(&column_input(), axis).unwrap();

        let section = Section::new(
            column_input()
                .section
                .vertices()
                .iter()
                .map(|p| Point2::new(p.x + 10.0, p.y))
                .collect(),
            column_input()
                .section
                .rebars()
                .iter()
                .map(|b| Rebar::new(b.x + 10.0, b.y, b.area))
                .collect(),
        )
        .unwrap();
        let shifted = AnalysisInput::new("shifted", section, MaterialParameters::aci(4.0, 60.0))
            .with_moment_reference(MomentReference::GeometricCentroid);
        let about_centroid = calculate(&shifted, axis).unwrap();

        assert_abs_diff_eq!(about_centroid.capacity.p, origin.capacity.p, epsilon = 1e-9);
        assert_abs_diff_eq!(about_centroid.capacity.mx, origin.capacity.mx, epsilon = 1e-9);
        assert_abs_diff_eq!(about_centroid.capacity.my, origin.capacity.my, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let mut input = column_input();
        input.material.es = -1.0;
        let err = calculate(&input, NeutralAxis::new(0.0, 0.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(!err.is_sample_local());

        let err = calculate(&column_input(), NeutralAxis::new(f64::NAN, 0.0)).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_input_json_default_reference() {
        let input = column_input();
        let mut value = serde_json::to_value(&input).unwrap();
        value.as_object_mut().unwrap().remove("moment_reference");
        let parsed: AnalysisInput = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.moment_reference, MomentReference::Origin);
        assert_eq!(parsed, input);
    }
}
