//! Directory walking for filesift.
//!
//! This crate turns scan roots into a flat, deduplicated sequence of
//! [`FileRecord`]s:
//!
//! - **Sequential traversal** - one depth-first recursive walk per root,
//!   strictly in sequence; there is no parallelism by design.
//! - **Cutoff filter** - only files created or modified at/after the
//!   cutoff survive.
//! - **Recovered errors** - unreadable directories and failed stat calls
//!   are warnings, never fatal.
//! - **Cancellation** - a [`CancellationToken`] is checked at every
//!   directory, so a caller can abort a long scan deterministically.
//!
//! The full record set is materialized in memory before classification
//! and aggregation; the design targets at most ~10^5 qualifying entries
//! per scan.
//!
//! # Example
//!
//! ```rust,no_run
//! use filesift_core::{ScanParams, SiftPolicy};
//! use filesift_scan::{Walker, dedup};
//!
//! let policy = SiftPolicy::default();
//! let params = ScanParams::default();
//! let outcome = Walker::new(&policy, &params).walk();
//! let records = dedup(outcome.records);
//! println!("{} records, {} skipped", records.len(), outcome.skipped.total());
//! ```

mod fingerprint;
mod walker;

pub use fingerprint::{dedup, fingerprint};
pub use tokio_util::sync::CancellationToken;
pub use walker::{WalkOutcome, Walker};

// Re-export core types for convenience
pub use filesift_core::{
    FileRecord, Fingerprint, ScanParams, ScanWarning, SiftError, SiftPolicy, SkipCounts,
    Timestamps, WarningKind,
};
