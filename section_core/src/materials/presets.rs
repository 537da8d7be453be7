//! Code-based default material parameters.
//!
//! Presets only fill in defaults; every factor stays an ordinary field that
//! callers may override before running an analysis.

use super::MaterialParameters;

/// Reinforcement modulus for US customary units (ksi)
pub const ES_KSI: f64 = 29_000.0;

/// Reinforcement modulus in MPa
pub const ES_MPA: f64 = 200_000.0;

impl MaterialParameters {
    /// ACI 318 parameters in ksi, unfactored (γc = γs = 1.0).
    ///
    /// Strength reduction in ACI is applied to the capacity as a φ factor,
    /// outside the section analysis.
    pub fn aci(fc_ksi: f64, fy_ksi: f64) -> Self {
        MaterialParameters {
            fck: fc_ksi,
            fyk: fy_ksi,
            es: ES_KSI,
            eps_cu: 0.003,
            gamma_c: 1.0,
            gamma_s: 1.0,
            stress_block_factor: aci_beta_1(fc_ksi),
        }
    }

    /// EN 1992-1-1 parameters in MPa with the recommended partial factors.
    pub fn eurocode(fck_mpa: f64, fyk_mpa: f64) -> Self {
        MaterialParameters {
            fck: fck_mpa,
            fyk: fyk_mpa,
            es: ES_MPA,
            eps_cu: eurocode_eps_cu3(fck_mpa),
            gamma_c: 1.5,
            gamma_s: 1.15,
            stress_block_factor: eurocode_lambda(fck_mpa),
        }
    }
}

/// ACI 318-19 Table 22.2.2.4.3: β₁ = 0.85 up to 4 ksi, less 0.05 per ksi, not below 0.65.
pub fn aci_beta_1(fc_ksi: f64) -> f64 {
    if fc_ksi <= 4.0 {
        0.85
    } else {
        (0.85 - 0.05 * (fc_ksi - 4.0)).max(0.65)
    }
}

/// EN 1992-1-1 (3.19): λ = 0.8 for f_ck ≤ 50 MPa, 0.8 − (f_ck − 50)/400 up to 90 MPa.
pub fn eurocode_lambda(fck_mpa: f64) -> f64 {
    if fck_mpa <= 50.0 {
        0.8
    } else {
        0.8 - (fck_mpa.min(90.0) - 50.0) / 400.0
    }
}

/// EN 1992-1-1 Table 3.1: ε_cu3 = 3.5‰ for f_ck ≤ 50 MPa, 2.6 + 35·((90 − f_ck)/100)⁴ ‰ above.
pub fn eurocode_eps_cu3(fck_mpa: f64) -> f64 {
    if fck_mpa <= 50.0 {
        0.0035
    } else {
        let reduction = (90.0 - fck_mpa.min(90.0)) / 100.0;
        (2.6 + 35.0 * reduction.powi(4)) / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aci_beta_1() {
        assert_eq!(aci_beta_1(3.0), 0.85);
        assert_eq!(aci_beta_1(4.0), 0.85);
        assert!((aci_beta_1(5.0) - 0.80).abs() < 1e-12);
        assert!((aci_beta_1(6.0) - 0.75).abs() < 1e-12);
        assert_eq!(aci_beta_1(10.0), 0.65);
    }

    #[test]
    fn test_eurocode_high_strength() {
        assert_eq!(eurocode_lambda(30.0), 0.8);
        assert!((eurocode_lambda(70.0) - 0.75).abs() < 1e-12);
        assert_eq!(eurocode_eps_cu3(40.0), 0.0035);
        // ε_cu3 at C90 is 2.6 ‰
        assert!((eurocode_eps_cu3(90.0) - 0.0026).abs() < 1e-12);
    }

    #[test]
    fn test_presets_validate() {
        assert!(MaterialParameters::aci(4.0, 60.0).validate().is_ok());
        let ec = MaterialParameters::eurocode(35.0, 500.0);
        assert!(ec.validate().is_ok());
        assert!((ec.fyd() - 434.78).abs() < 0.01);
    }
}
