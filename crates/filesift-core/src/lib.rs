//! Core types for filesift.
//!
//! This crate provides the fundamental data structures used throughout
//! the filesift pipeline: file records, the classification policy,
//! scan parameters, and error/warning types.
//!
//! Everything here is plain data. Configuration is built once by the
//! caller and passed by reference into the walker, the classifiers,
//! and the aggregator; no component loads its own configuration.

mod error;
mod params;
pub mod paths;
mod policy;
mod record;

pub use error::{ScanWarning, SiftError, SkipCounts, WarningKind};
pub use params::{ScanParams, ScanParamsBuilder};
pub use policy::{CategoryRule, SiftPolicy, SizeBucket};
pub use record::{CategoryTag, FileRecord, Fingerprint, Timestamps};
