//! # Reinforcement Response
//!
//! Linear strain distribution through the section and the bilinear
//! (elastic, perfectly plastic) steel law.
//!
//! ## Formulas
//!
//! - ε_i = d_i / |c| · ε_cu
//! - σ_i = clamp(E_s·ε_i, −f_yd, +f_yd)
//!
//! with d_i the signed bar distance from the neutral axis and c the extreme
//! fiber distance. Compression strains and stresses are negative.

use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialParameters;
use crate::section::Section;

use super::stress_block::StressBlock;

/// Strains of every bar, in bar order.
///
/// # Errors
///
/// `SingularNeutralAxis` if `c` is zero or not finite.
///
/// # Example
///
/// ```rust
/// use section_core::calculations::reinforcement::rebar_strains;
///
/// let strains = rebar_strains(&[-8.0, 4.0], -8.0, 0.003).unwrap();
/// assert!((strains[0] + 0.003).abs() < 1e-15);
/// assert!((strains[1] - 0.0015).abs() < 1e-15);
/// ```
pub fn rebar_strains(distances: &[f64], c: f64, eps_cu: f64) -> CalcResult<Vec<f64>> {
    if c == 0.0 || !c.is_finite() {
        return Err(CalcError::SingularNeutralAxis {
            extreme_fiber_distance: c,
        });
    }
    let scale = eps_cu / c.abs();
    Ok(distances.iter().map(|d| d * scale).collect())
}

/// Bar stress for `strain`, capped at the design yield strength.
#[inline]
pub fn rebar_stress(strain: f64, material: &MaterialParameters) -> f64 {
    let fyd = material.fyd();
    (strain * material.es).clamp(-fyd, fyd)
}

/// Whether each bar lies inside the stress block, in bar order.
pub fn rebars_in_stress_block(section: &Section, block: &StressBlock) -> Vec<bool> {
    section
        .rebars()
        .iter()
        .map(|bar| block.contains(bar.position()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_strain_is_linear_in_distance() {
        let strains = rebar_strains(&[-5.6, 0.0, 5.6], -8.0, 0.003).unwrap();
        assert_abs_diff_eq!(strains[0], -0.0021, epsilon = 1e-15);
        assert_eq!(strains[1], 0.0);
        assert_abs_diff_eq!(strains[2], 0.0021, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_extreme_fiber_is_singular() {
        let err = rebar_strains(&[1.0], 0.0, 0.003).unwrap_err();
        assert_eq!(err.error_code(), "SINGULAR_NEUTRAL_AXIS");
        assert!(err.is_sample_local());
    }

    #[test]
    fn test_stress_caps_at_design_yield() {
        let mat = MaterialParameters::aci(4.0, 60.0);
        assert_abs_diff_eq!(rebar_stress(0.001, &mat), 29.0, epsilon = 1e-12);
        assert_eq!(rebar_stress(0.0021, &mat), 60.0);
        assert_eq!(rebar_stress(-0.0021, &mat), -60.0);

        let factored = MaterialParameters { gamma_s: 1.15, ..mat };
        assert_abs_diff_eq!(rebar_stress(0.01, &factored), 60.0 / 1.15, epsilon = 1e-12);
    }
}
