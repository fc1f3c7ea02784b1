//! The aggregation output consumed by reporting layers.

use std::path::PathBuf;
use std::time::SystemTime;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use filesift_core::{CategoryTag, FileRecord, ScanWarning, SkipCounts};

/// Summary for one non-empty category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category tag.
    pub tag: CategoryTag,
    /// Display label from the policy rule.
    pub label: String,
    /// Number of records.
    pub count: u64,
    /// Summed size in bytes.
    pub total_size: u64,
    /// Average size, rounded to the nearest byte.
    pub average_size: u64,
    /// Share of the total record count, two-decimal rounded.
    pub percentage: f64,
    /// Display color from the policy rule.
    pub color: String,
    /// Description from the policy rule.
    pub description: String,
}

/// Count and summed size for one size bucket.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SizeBucketStats {
    pub count: u64,
    pub total_size: u64,
}

/// Count and summed size for one extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionStat {
    /// Lower-cased extension with leading dot, or `none`.
    pub extension: CompactString,
    pub count: u64,
    pub total_size: u64,
}

/// Candidate duplicates: distinct paths with identical size and
/// modification time. A heuristic, not proof of identical content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Size shared by every member.
    pub size: u64,
    /// Modification time shared by every member.
    pub modified: SystemTime,
    /// Member paths, in scan order.
    pub paths: Vec<PathBuf>,
    /// Reclaimable bytes if the group really is duplicated content.
    pub wasted_bytes: u64,
}

impl DuplicateGroup {
    /// Number of members.
    pub fn count(&self) -> usize {
        self.paths.len()
    }
}

/// Statistical breakdowns over the whole record set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanStatistics {
    /// Bucket label -> stats, in declared bucket order.
    pub size_distribution: IndexMap<String, SizeBucketStats>,
    /// Age label -> count, in first-seen order.
    pub time_distribution: IndexMap<String, u64>,
    /// Top 20 extensions by count, descending, first-seen tie-break.
    pub extension_stats: Vec<ExtensionStat>,
    /// First 10 candidate duplicate groups in scan order.
    pub duplicate_groups: Vec<DuplicateGroup>,
    /// Top 10 by size descending.
    pub largest_files: Vec<FileRecord>,
    /// Top 10 by creation time ascending.
    pub oldest_files: Vec<FileRecord>,
    /// Top 10 by creation time descending.
    pub newest_files: Vec<FileRecord>,
}

/// The core's sole output: classified records plus summaries and
/// statistics, built once per scan and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Category label -> records, in policy order; record order within a
    /// category is classification (scan) order. Only non-empty
    /// categories appear.
    pub categories: IndexMap<String, Vec<FileRecord>>,
    /// Per-category summaries for non-empty categories, in policy order.
    pub summaries: Vec<CategorySummary>,
    /// Statistical breakdowns.
    pub statistics: ScanStatistics,
    /// Total deduplicated records.
    pub total_files: u64,
    /// Recovered scan errors, attached by the caller.
    #[serde(default)]
    pub warnings: Vec<ScanWarning>,
    /// Skipped path/entry counts, attached by the caller.
    #[serde(default)]
    pub skipped: SkipCounts,
}

impl ClassificationResult {
    /// Total size across all categories.
    pub fn total_size(&self) -> u64 {
        self.summaries.iter().map(|s| s.total_size).sum()
    }

    /// Summary for `tag`, if that category is non-empty.
    pub fn summary_for(&self, tag: CategoryTag) -> Option<&CategorySummary> {
        self.summaries.iter().find(|s| s.tag == tag)
    }

    /// Attach the scan-side warning report to the result.
    pub fn with_scan_report(mut self, warnings: Vec<ScanWarning>, skipped: SkipCounts) -> Self {
        self.warnings = warnings;
        self.skipped = skipped;
        self
    }
}
