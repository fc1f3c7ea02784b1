//! Error and warning types for the scan pipeline.
//!
//! Only configuration failures are fatal. Everything encountered during
//! traversal is recovered: logged, counted, and the scan continues.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal pipeline errors.
///
/// Filesystem trouble never lands here: missing roots, permission
/// denials, and stat failures all become [`ScanWarning`]s and the scan
/// carries on with a partial result.
#[derive(Debug, Error)]
pub enum SiftError {
    /// Invalid policy or parameters; aborts before traversal begins.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A configured or supplied root does not exist.
    MissingRoot,
    /// Permission was denied listing a directory.
    PermissionDenied,
    /// Error listing a directory.
    ReadError,
    /// Error reading a single entry's metadata.
    MetadataError,
}

/// Non-fatal warning encountered during a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a missing-root warning.
    pub fn missing_root(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            message: format!("Scan root not found, skipping: {}", path.display()),
            path,
            kind: WarningKind::MissingRoot,
        }
    }

    /// Create a directory read warning.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        let kind = if error.kind() == std::io::ErrorKind::PermissionDenied {
            WarningKind::PermissionDenied
        } else {
            WarningKind::ReadError
        };
        Self {
            message: format!("Cannot list {}: {error}", path.display()),
            path,
            kind,
        }
    }

    /// Create a metadata warning for a single entry.
    pub fn metadata_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let path = path.into();
        Self {
            message: format!("Cannot stat {}: {error}", path.display()),
            path,
            kind: WarningKind::MetadataError,
        }
    }
}

/// Counts of entries skipped by recovered errors, surfaced alongside a
/// partial result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipCounts {
    /// Roots that did not exist.
    pub missing_roots: u64,
    /// Directories that could not be listed (subtree yielded nothing).
    pub unreadable_dirs: u64,
    /// Entries whose metadata could not be read.
    pub stat_failures: u64,
}

impl SkipCounts {
    /// Total skipped paths/entries.
    pub fn total(&self) -> u64 {
        self.missing_roots + self.unreadable_dirs + self.stat_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = SiftError::InvalidConfig {
            message: "size bucket table is empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: size bucket table is empty"
        );
    }

    #[test]
    fn test_warning_constructors() {
        let warning = ScanWarning::missing_root("/nope");
        assert_eq!(warning.kind, WarningKind::MissingRoot);
        assert!(warning.message.contains("/nope"));

        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let warning = ScanWarning::read_error("/locked", &denied);
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
    }

    #[test]
    fn test_skip_counts_total() {
        let counts = SkipCounts {
            missing_roots: 1,
            unreadable_dirs: 2,
            stat_failures: 3,
        };
        assert_eq!(counts.total(), 6);
    }
}
