//! Aggregation for filesift.
//!
//! Consumes the classified, deduplicated record set and produces the
//! [`ClassificationResult`]: per-category summaries plus statistical
//! breakdowns (size and age distributions, extension frequency,
//! candidate duplicate groups, top-N lists).
//!
//! ```rust
//! use filesift_analyze::Aggregator;
//! use filesift_core::SiftPolicy;
//!
//! let policy = SiftPolicy::default();
//! let result = Aggregator::new(&policy).aggregate(Vec::new());
//! assert_eq!(result.total_files, 0);
//! ```
//!
//! The result is built once per scan invocation and never mutated by
//! the core afterwards; reporting layers consume it as a value (or via
//! its serde serialization).

mod age;
mod aggregate;
mod result;

pub use age::relative_age_label;
pub use aggregate::Aggregator;
pub use result::{
    CategorySummary, ClassificationResult, DuplicateGroup, ExtensionStat, ScanStatistics,
    SizeBucketStats,
};

// Re-export core types for convenience
pub use filesift_core::{CategoryTag, FileRecord, ScanWarning, SiftPolicy, SkipCounts};
