//! # Material Parameters
//!
//! Concrete and reinforcement properties for an ultimate limit state analysis.
//! One [`MaterialParameters`] value is created per analysis and passed by
//! reference into every calculation; nothing here is global or mutable.
//!
//! ## Material Models
//!
//! - **Concrete**: uniform (Whitney) stress block of intensity 0.85·f_cd over a
//!   depth β₁·c measured from the extreme compression fiber
//! - **Reinforcement**: bilinear, linear-elastic up to f_yd and capped beyond
//!
//! ## Units
//!
//! Any consistent set. The ACI preset assumes ksi, the Eurocode preset MPa.
//!
//! ## Example
//!
//! ```rust
//! use section_core::materials::MaterialParameters;
//!
//! let mat = MaterialParameters::aci(4.0, 60.0);
//! assert!(mat.validate().is_ok());
//! assert_eq!(mat.stress_block_factor, 0.85);
//! assert!((mat.yield_strain() - 60.0 / 29000.0).abs() < 1e-12);
//! ```

pub mod presets;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Intensity factor of the uniform concrete stress block (0.85·f_cd)
pub const CONCRETE_STRESS_FACTOR: f64 = 0.85;

/// Material properties for one analysis.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fck": 4.0,
///   "fyk": 60.0,
///   "es": 29000.0,
///   "eps_cu": 0.003,
///   "gamma_c": 1.0,
///   "gamma_s": 1.0,
///   "stress_block_factor": 0.85
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParameters {
    /// Characteristic concrete compressive strength f_ck
    pub fck: f64,

    /// Characteristic reinforcement yield strength f_yk
    pub fyk: f64,

    /// Reinforcement elastic modulus E_s
    pub es: f64,

    /// Concrete crushing strain ε_cu at the extreme compression fiber
    pub eps_cu: f64,

    /// Partial safety factor for concrete γc
    pub gamma_c: f64,

    /// Partial safety factor for reinforcement γs
    pub gamma_s: f64,

    /// Compression-zone depth reduction factor (β₁ in ACI, λ in EN 1992)
    pub stress_block_factor: f64,
}

impl MaterialParameters {
    /// Validate material parameters.
    pub fn validate(&self) -> CalcResult<()> {
        let positive = [
            ("fck", self.fck),
            ("fyk", self.fyk),
            ("es", self.es),
            ("eps_cu", self.eps_cu),
            ("gamma_c", self.gamma_c),
            ("gamma_s", self.gamma_s),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Must be a positive, finite number",
                ));
            }
        }
        if !(self.stress_block_factor > 0.0 && self.stress_block_factor <= 1.0) {
            return Err(CalcError::invalid_input(
                "stress_block_factor",
                self.stress_block_factor.to_string(),
                "Stress block factor must be in (0, 1]",
            ));
        }
        Ok(())
    }

    /// Design concrete strength f_cd = f_ck/γc
    #[inline]
    pub fn fcd(&self) -> f64 {
        self.fck / self.gamma_c
    }

    /// Design yield strength f_yd = f_yk/γs
    #[inline]
    pub fn fyd(&self) -> f64 {
        self.fyk / self.gamma_s
    }

    /// Uniform stress-block intensity 0.85·f_cd
    #[inline]
    pub fn concrete_block_stress(&self) -> f64 {
        CONCRETE_STRESS_FACTOR * self.fcd()
    }

    /// Strain at first yield, f_yd/E_s
    #[inline]
    pub fn yield_strain(&self) -> f64 {
        self.fyd() / self.es
    }
}
