//! # Section Capacity Calculations
//!
//! Each neutral-axis sample runs the same pipeline:
//!
//! ```text
//! NeutralAxis ─► signed distances ─► stress block ─► bar strains/stresses ─► P, Mx, My
//! ```
//!
//! and the capacity surface repeats it over a grid of axes.
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ..) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Modules
//!
//! - [`neutral_axis`] - Axis parametrization and signed distances
//! - [`stress_block`] - Section state and compression zone
//! - [`reinforcement`] - Bar strain and stress
//! - [`equilibrium`] - Forces, moments and C/T resultants
//! - [`sample`] - One neutral axis end to end
//! - [`capacity_surface`] - Grid sweep

pub mod capacity_surface;
pub mod equilibrium;
pub mod neutral_axis;
pub mod reinforcement;
pub mod sample;
pub mod stress_block;

// Re-export commonly used types
pub use capacity_surface::{
    AngleRange, CapacitySurface, InterceptRange, SampleFailure, SurfaceSummary, SweepConfig,
};
pub use equilibrium::{ForceResultant, MomentReference, PointForce, ResultantDecomposition};
pub use neutral_axis::{NeutralAxis, SignedDistances};
pub use sample::{AnalysisInput, BarResult, CapacityPoint, SampleResult};
pub use stress_block::{CrossSectionState, StressBlock};
