//! # section_core - Biaxial Section Capacity Engine
//!
//! `section_core` computes the ultimate capacity of reinforced concrete
//! cross-sections of arbitrary polygonal shape under axial force and biaxial
//! bending. For a neutral axis it builds the uniform concrete stress block,
//! evaluates the bar strains and stresses, and reduces everything to
//! (P, Mx, My). Sweeping the axis over a grid of angles and intercepts traces
//! the capacity surface. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit configuration**: material parameters are passed into every call
//!
//! ## Sign Convention
//!
//! Compression is negative and tension positive, for strains, stresses and
//! forces. Mx = −Σ F·y and My = −Σ F·x about the moment reference.
//!
//! ## Quick Start
//!
//! ```rust
//! use section_core::calculations::{sample, AnalysisInput, NeutralAxis};
//! use section_core::materials::MaterialParameters;
//! use section_core::section::{Rebar, Section};
//!
//! let section = Section::rectangular(16.0, 16.0, vec![
//!     Rebar::new(-5.6, -5.6, 0.79),
//!     Rebar::new(5.6, -5.6, 0.79),
//! ]).unwrap();
//! let input = AnalysisInput::new("C-1", section, MaterialParameters::aci(4.0, 60.0));
//!
//! let result = sample::calculate(&input, NeutralAxis::new(0.0, 2.0)).unwrap();
//! println!("P = {:.1}, Mx = {:.1}", result.capacity.p, result.capacity.mx);
//! ```
//!
//! ## Modules
//!
//! - [`geometry`] - Points, lines and polygon operations
//! - [`section`] - Cross-section outline and reinforcement
//! - [`materials`] - Material parameters and code presets
//! - [`calculations`] - Stress block, equilibrium, sample and sweep
//! - [`analysis`] - Persisted analysis definition
//! - [`errors`] - Structured error types
//! - [`file_io`] - File operations with atomic saves

pub mod analysis;
pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod geometry;
pub mod materials;
pub mod section;

// Re-export commonly used types at crate root for convenience
pub use analysis::{AnalysisFile, AnalysisMetadata};
pub use calculations::{AnalysisInput, CapacityPoint, CapacitySurface, NeutralAxis, SweepConfig};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_analysis, save_analysis, save_surface};
pub use materials::MaterialParameters;
pub use section::{Rebar, Section};
