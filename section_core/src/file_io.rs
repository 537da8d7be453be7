//! # File I/O Module
//!
//! Reads and writes analysis definitions and sweep results:
//! - **Atomic saves**: write to a `.tmp` sibling, fsync, rename
//! - **Version validation**: the schema version is checked with semver on load
//!
//! ## Example
//!
//! ```rust,no_run
//! use section_core::analysis::AnalysisFile;
//! use section_core::file_io::{load_analysis, save_analysis};
//! use std::path::Path;
//!
//! let path = Path::new("column.json");
//! let mut file = load_analysis(path)?;
//! file.sweep.parallel = false;
//! file.touch();
//! save_analysis(&file, path)?;
//! # Ok::<(), section_core::errors::CalcError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use log::debug;
use semver::Version;
use serde::Serialize;

use crate::analysis::{AnalysisFile, SCHEMA_VERSION};
use crate::calculations::CapacitySurface;
use crate::errors::{CalcError, CalcResult};

/// Save an analysis file with atomic write semantics.
pub fn save_analysis(file: &AnalysisFile, path: &Path) -> CalcResult<()> {
    write_json_atomic(file, path)
}

/// Load an analysis file and check its schema version.
///
/// # Returns
///
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON or invalid section
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_analysis(path: &Path) -> CalcResult<AnalysisFile> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    // Check the version before the body so old files report a version error
    let header: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;
    let version = header
        .pointer("/meta/version")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    validate_version(version)?;

    let file: AnalysisFile = serde_json::from_value(header)
        .map_err(|e| CalcError::serialization(format!("Invalid analysis in {}: {}", path.display(), e)))?;
    debug!("loaded analysis '{}' ({}) from {}", file.input.label, file.meta.id, path.display());
    Ok(file)
}

/// Save sweep results as pretty JSON with atomic write semantics.
pub fn save_surface(surface: &CapacitySurface, path: &Path) -> CalcResult<()> {
    write_json_atomic(surface, path)
}

/// Load sweep results written by [`save_surface`].
pub fn load_surface(path: &Path) -> CalcResult<CapacitySurface> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write `text` to `path` through a temporary sibling file.
///
/// 1. Write to `<path>.tmp`
/// 2. Sync to disk (fsync)
/// 3. Rename over `path` (atomic on most filesystems)
pub fn write_atomic(text: &str, path: &Path) -> CalcResult<()> {
    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.write_all(text.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!("wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(&json, path)
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Check that a file version can be read by this schema.
///
/// The major version must match; within 0.x the file's minor version may not
/// be newer than ours.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file = Version::parse(file_version).map_err(|_| mismatch())?;
    let current = Version::parse(SCHEMA_VERSION).map_err(|_| mismatch())?;

    if file.major != current.major {
        return Err(mismatch());
    }
    if current.major == 0 && file.minor > current.minor {
        return Err(mismatch());
    }
    Ok(())
}
