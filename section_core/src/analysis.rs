//! # Analysis Files
//!
//! An [`AnalysisFile`] is the persisted definition of one section analysis:
//! a metadata header, the section and material input, and the sweep grid.
//! Files are human-readable JSON (see [`crate::file_io`] for atomic saves).
//!
//! ## Structure
//!
//! ```text
//! AnalysisFile
//! ├── meta: AnalysisMetadata (schema version, run id, engineer, job, timestamps)
//! ├── input: AnalysisInput (label, section, material, moment reference)
//! └── sweep: SweepConfig (angle and intercept grid)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use section_core::analysis::AnalysisFile;
//! use section_core::calculations::AnalysisInput;
//! use section_core::materials::MaterialParameters;
//! use section_core::section::Section;
//!
//! let section = Section::rectangular(16.0, 16.0, vec![]).unwrap();
//! let input = AnalysisInput::new("C-1", section, MaterialParameters::aci(4.0, 60.0));
//! let file = AnalysisFile::new("Jane Engineer", "25-042", input);
//!
//! let json = serde_json::to_string_pretty(&file).unwrap();
//! assert!(json.contains("\"version\": \"0.1.0\""));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::capacity_surface::{self, CapacitySurface, SweepConfig};
use crate::calculations::sample::{self, AnalysisInput, SampleResult};
use crate::calculations::NeutralAxis;
use crate::errors::CalcResult;

/// Current schema version for analysis files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root container serialized to analysis files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFile {
    pub meta: AnalysisMetadata,

    pub input: AnalysisInput,

    /// Grid used by `run_sweep`; defaults when absent from the file
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Header information for an analysis file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Schema version (semver)
    pub version: String,

    /// Identifier of this analysis, stable across saves
    pub id: Uuid,

    /// Responsible engineer
    #[serde(default)]
    pub engineer: String,

    /// Job/project number (e.g., "25-001")
    #[serde(default)]
    pub job_id: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

impl AnalysisFile {
    /// Create a new analysis with the default sweep grid.
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, input: AnalysisInput) -> Self {
        let now = Utc::now();
        AnalysisFile {
            meta: AnalysisMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                created: now,
                modified: now,
            },
            input,
            sweep: SweepConfig::default(),
        }
    }

    pub fn with_sweep(mut self, sweep: SweepConfig) -> Self {
        self.sweep = sweep;
        self
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Evaluate a single neutral axis for this analysis
    pub fn run_sample(&self, axis: NeutralAxis) -> CalcResult<SampleResult> {
        sample::calculate(&self.input, axis)
    }

    /// Sweep the configured grid
    pub fn run_sweep(&self) -> CalcResult<CapacitySurface> {
        capacity_surface::calculate(&self.input, &self.sweep)
    }
}
