//! # Error Types
//!
//! Structured error types for section_core. Geometry and material errors
//! describe a single neutral-axis sample; the capacity sweep records them
//! against the failing grid cell and keeps going.
//!
//! ## Example
//!
//! ```rust
//! use section_core::errors::{CalcError, CalcResult};
//!
//! fn validate_strength(fck: f64) -> CalcResult<()> {
//!     if fck <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "fck",
//!             fck.to_string(),
//!             "Concrete strength must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for section_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for section analysis.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value is invalid (out of range, non-finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Fewer than 3 distinct vertices, or a zero-area polygon where an area is required
    #[error("Degenerate geometry: {reason}")]
    DegenerateGeometry { reason: String },

    /// Extreme-fiber distance evaluated to zero, strain scaling is undefined
    #[error("Singular neutral axis: extreme fiber distance {extreme_fiber_distance}")]
    SingularNeutralAxis { extreme_fiber_distance: f64 },

    /// Vertex classification could not be made deterministic
    #[error("Ambiguous classification: vertex {vertex} at distance {distance} from the neutral axis")]
    AmbiguousClassification { vertex: usize, distance: f64 },

    /// Ordered stress-block polygon intersects itself
    #[error("Non-convex ordering failure: stress block with {vertex_count} vertices is self-intersecting")]
    NonConvexOrderingFailure { vertex_count: usize },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a DegenerateGeometry error
    pub fn degenerate(reason: impl Into<String>) -> Self {
        CalcError::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Whether this error only invalidates a single neutral-axis sample.
    ///
    /// Sample-local errors are recorded by the sweep; everything else aborts it.
    pub fn is_sample_local(&self) -> bool {
        matches!(
            self,
            CalcError::DegenerateGeometry { .. }
                | CalcError::SingularNeutralAxis { .. }
                | CalcError::AmbiguousClassification { .. }
                | CalcError::NonConvexOrderingFailure { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::DegenerateGeometry { .. } => "DEGENERATE_GEOMETRY",
            CalcError::SingularNeutralAxis { .. } => "SINGULAR_NEUTRAL_AXIS",
            CalcError::AmbiguousClassification { .. } => "AMBIGUOUS_CLASSIFICATION",
            CalcError::NonConvexOrderingFailure { .. } => "NON_CONVEX_ORDERING_FAILURE",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::NonConvexOrderingFailure { vertex_count: 6 };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"NonConvexOrderingFailure\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::degenerate("two vertices").error_code(), "DEGENERATE_GEOMETRY");
        assert_eq!(
            CalcError::SingularNeutralAxis { extreme_fiber_distance: 0.0 }.error_code(),
            "SINGULAR_NEUTRAL_AXIS"
        );
    }

    #[test]
    fn test_sample_local_split() {
        assert!(CalcError::degenerate("empty").is_sample_local());
        assert!(CalcError::AmbiguousClassification { vertex: 2, distance: 0.0 }.is_sample_local());
        assert!(!CalcError::invalid_input("fck", "-4", "negative").is_sample_local());
        assert!(!CalcError::serialization("bad json").is_sample_local());
    }
}
