//! # Force and Moment Equilibrium
//!
//! Reduces the concrete block force and the bar forces of one sample to an
//! axial force and two bending moments about a reference point.
//!
//! ## Conventions
//!
//! - Compression forces are negative, tension positive
//! - Mx = −Σ F·(y − y_ref), My = −Σ F·(x − x_ref)
//! - A bar inside the stress block gets the displaced concrete stress added
//!   back: F = (σ + 0.85·f_cd)·A
//!
//! ## Example
//!
//! ```rust
//! use section_core::calculations::equilibrium::{ForceResultant, PointForce};
//! use section_core::geometry::Point2;
//!
//! let forces = [
//!     PointForce::new(-100.0, Point2::new(0.0, 4.0)),
//!     PointForce::new(40.0, Point2::new(0.0, -4.0)),
//! ];
//! let total = ForceResultant::from_forces(&forces, Point2::new(0.0, 0.0));
//! assert_eq!(total.force, -60.0);
//! assert_eq!(total.mx, 560.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::Point2;
use crate::materials::MaterialParameters;
use crate::section::Section;

/// Point about which moments are taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentReference {
    /// Coordinate origin of the section's frame
    #[default]
    Origin,
    /// Centroid of the gross concrete outline
    GeometricCentroid,
    /// Centroid of the squash load (concrete at 0.85·f_cd, steel at f_yd)
    PlasticCentroid,
}

impl MomentReference {
    pub fn point(&self, section: &Section, material: &MaterialParameters) -> Point2 {
        match self {
            MomentReference::Origin => Point2::new(0.0, 0.0),
            MomentReference::GeometricCentroid => section.centroid(),
            MomentReference::PlasticCentroid => section.plastic_centroid(material),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MomentReference::Origin => "Origin",
            MomentReference::GeometricCentroid => "Geometric centroid",
            MomentReference::PlasticCentroid => "Plastic centroid",
        }
    }
}

/// Concrete stress-block force Fc = −0.85·f_cd·A_sb
#[inline]
pub fn concrete_force(block_area: f64, material: &MaterialParameters) -> f64 {
    -material.concrete_block_stress() * block_area
}

/// Bar force F = σ·A, corrected for displaced concrete inside the block
#[inline]
pub fn rebar_force(stress: f64, area: f64, in_block: bool, material: &MaterialParameters) -> f64 {
    if in_block {
        (stress + material.concrete_block_stress()) * area
    } else {
        stress * area
    }
}

/// A force acting at a point of the section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointForce {
    pub force: f64,
    pub position: Point2,
}

impl PointForce {
    pub fn new(force: f64, position: Point2) -> Self {
        PointForce { force, position }
    }

    /// (Mx, My) of this force about `reference`
    pub fn moments(&self, reference: Point2) -> (f64, f64) {
        let arm = self.position - reference;
        (-self.force * arm.y, -self.force * arm.x)
    }
}

/// Axial force and moments of a group of forces.
///
/// ## JSON Example
///
/// ```json
/// { "force": -504.06, "mx": 0.0, "my": -2452.83, "ex": -4.866, "ey": 0.0 }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceResultant {
    pub force: f64,
    pub mx: f64,
    pub my: f64,

    /// x position of the resultant relative to the reference, −My/F
    pub ex: Option<f64>,

    /// y position of the resultant relative to the reference, −Mx/F
    pub ey: Option<f64>,
}

impl ForceResultant {
    pub fn new(force: f64, mx: f64, my: f64) -> Self {
        let (ex, ey) = if force == 0.0 {
            (None, None)
        } else {
            (Some(-my / force), Some(-mx / force))
        };
        ForceResultant { force, mx, my, ex, ey }
    }

    /// Sum `forces` with moments about `reference`
    pub fn from_forces<'a>(forces: impl IntoIterator<Item = &'a PointForce>, reference: Point2) -> Self {
        let (force, mx, my) = forces.into_iter().fold((0.0, 0.0, 0.0), |(f, mx, my), pf| {
            let (dmx, dmy) = pf.moments(reference);
            (f + pf.force, mx + dmx, my + dmy)
        });
        ForceResultant::new(force, mx, my)
    }

    /// Angle of the moment vector atan2(My, Mx) in degrees, [0, 360)
    pub fn moment_angle(&self) -> Option<f64> {
        moment_vector_angle(self.mx, self.my)
    }
}

/// Compression (C) and tension (T) resultants of one sample.
///
/// C holds the concrete block and every bar with non-positive force; T holds
/// the bars in tension. C + T equals the section total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultantDecomposition {
    pub compression: ForceResultant,
    pub tension: ForceResultant,
}

/// Split the concrete and bar forces into compression and tension resultants.
pub fn decompose(
    concrete: Option<&PointForce>,
    bars: &[PointForce],
    reference: Point2,
) -> ResultantDecomposition {
    let compression = concrete
        .into_iter()
        .chain(bars.iter().filter(|b| b.force <= 0.0));
    let tension = bars.iter().filter(|b| b.force > 0.0);

    ResultantDecomposition {
        compression: ForceResultant::from_forces(compression, reference),
        tension: ForceResultant::from_forces(tension, reference),
    }
}

/// Direction of the moment vector (Mx, My) in degrees, [0, 360).
///
/// `None` when both moments are zero.
pub fn moment_vector_angle(mx: f64, my: f64) -> Option<f64> {
    if mx == 0.0 && my == 0.0 {
        return None;
    }
    Some(my.atan2(mx).to_degrees().rem_euclid(360.0))
}
