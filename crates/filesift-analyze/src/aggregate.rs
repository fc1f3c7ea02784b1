//! The aggregation step: classified records in, [`ClassificationResult`] out.

use std::path::PathBuf;
use std::time::SystemTime;

use compact_str::CompactString;
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::warn;

use filesift_core::{CategoryTag, FileRecord, SiftPolicy};

use crate::age::relative_age_label;
use crate::result::{
    CategorySummary, ClassificationResult, DuplicateGroup, ExtensionStat, ScanStatistics,
    SizeBucketStats,
};

/// Caps on the statistical breakdowns.
const MAX_EXTENSION_STATS: usize = 20;
const MAX_DUPLICATE_GROUPS: usize = 10;
const MAX_TOP_FILES: usize = 10;

/// Sentinel size label for a size no configured bucket covers.
const UNKNOWN_BUCKET: &str = "Unknown";

/// Builds the final result from the deduplicated, classified set.
///
/// Owns nothing but a policy reference and a reference time; the result
/// builder is exclusive to one `aggregate` call.
pub struct Aggregator<'a> {
    policy: &'a SiftPolicy,
    now: SystemTime,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator using the current time as reference.
    pub fn new(policy: &'a SiftPolicy) -> Self {
        Self::with_reference_time(policy, SystemTime::now())
    }

    /// Create an aggregator with an explicit reference time for age
    /// labelling.
    pub fn with_reference_time(policy: &'a SiftPolicy, now: SystemTime) -> Self {
        Self { policy, now }
    }

    /// Aggregate `records` into the final result. Records are expected
    /// classified; an unset category resolves to `Other`.
    pub fn aggregate(&self, mut records: Vec<FileRecord>) -> ClassificationResult {
        for record in &mut records {
            record.size_label = Some(match self.policy.bucket_for(record.size) {
                Some(bucket) => CompactString::from(bucket.label.as_str()),
                None => {
                    warn!(
                        size = record.size,
                        path = %record.path.display(),
                        "size matches no configured bucket"
                    );
                    CompactString::const_new(UNKNOWN_BUCKET)
                }
            });
            record.relative_age = Some(relative_age_label(
                self.now,
                record.timestamps.created_or_modified(),
            ));
            if record.category.is_none() {
                record.category = Some(CategoryTag::Other);
            }
        }

        let total_files = records.len() as u64;
        let statistics = self.build_statistics(&records);

        // Partition into categories, policy order outside, scan order
        // within.
        let mut by_tag: IndexMap<CategoryTag, Vec<FileRecord>> = self
            .policy
            .categories
            .iter()
            .map(|rule| (rule.tag, Vec::new()))
            .collect();
        for record in records {
            let tag = record.category.unwrap_or(CategoryTag::Other);
            by_tag.entry(tag).or_default().push(record);
        }
        by_tag.retain(|_, records| !records.is_empty());

        let mut summaries = Vec::with_capacity(by_tag.len());
        let mut categories = IndexMap::with_capacity(by_tag.len());
        for (tag, records) in by_tag {
            let count = records.len() as u64;
            let total_size: u64 = records.iter().map(|r| r.size).sum();
            let average_size = (total_size as f64 / count as f64).round() as u64;
            let percentage = round2(count as f64 / total_files as f64 * 100.0);
            let label = self.policy.label_for(tag);
            let (color, description) = match self.policy.rule_for(tag) {
                Some(rule) => (rule.color.clone(), rule.description.clone()),
                None => (String::new(), String::new()),
            };
            summaries.push(CategorySummary {
                tag,
                label: label.clone(),
                count,
                total_size,
                average_size,
                percentage,
                color,
                description,
            });
            categories.insert(label, records);
        }

        ClassificationResult {
            categories,
            summaries,
            statistics,
            total_files,
            warnings: Vec::new(),
            skipped: Default::default(),
        }
    }

    fn build_statistics(&self, records: &[FileRecord]) -> ScanStatistics {
        // Seed every declared bucket so zero-count buckets still appear,
        // in declared order.
        let mut size_distribution: IndexMap<String, SizeBucketStats> = self
            .policy
            .size_buckets
            .iter()
            .map(|bucket| (bucket.label.clone(), SizeBucketStats::default()))
            .collect();
        let mut time_distribution: IndexMap<String, u64> = IndexMap::new();
        let mut extensions: IndexMap<CompactString, ExtensionStat> = IndexMap::new();
        let mut candidates: IndexMap<(u64, SystemTime), Vec<PathBuf>> = IndexMap::new();

        for record in records {
            let size_label = record
                .size_label
                .as_deref()
                .unwrap_or(UNKNOWN_BUCKET)
                .to_string();
            let bucket = size_distribution.entry(size_label).or_default();
            bucket.count += 1;
            bucket.total_size += record.size;

            if let Some(age) = &record.relative_age {
                *time_distribution.entry(age.to_string()).or_insert(0) += 1;
            }

            let ext = if record.extension.is_empty() {
                CompactString::const_new("none")
            } else {
                record.extension.clone()
            };
            let stat = extensions.entry(ext.clone()).or_insert(ExtensionStat {
                extension: ext,
                count: 0,
                total_size: 0,
            });
            stat.count += 1;
            stat.total_size += record.size;

            candidates
                .entry((record.size, record.timestamps.modified))
                .or_default()
                .push(record.path.clone());
        }

        // Stable sort keeps first-seen order for equal counts.
        let extension_stats: Vec<ExtensionStat> = extensions
            .into_values()
            .sorted_by(|a, b| b.count.cmp(&a.count))
            .take(MAX_EXTENSION_STATS)
            .collect();

        let duplicate_groups: Vec<DuplicateGroup> = candidates
            .into_iter()
            .filter(|(_, paths)| paths.len() >= 2)
            .take(MAX_DUPLICATE_GROUPS)
            .map(|((size, modified), paths)| DuplicateGroup {
                size,
                modified,
                wasted_bytes: size * (paths.len() as u64 - 1),
                paths,
            })
            .collect();

        ScanStatistics {
            size_distribution,
            time_distribution,
            extension_stats,
            duplicate_groups,
            largest_files: top_by(records, |a, b| b.size.cmp(&a.size)),
            oldest_files: top_by(records, |a, b| {
                a.timestamps
                    .created_or_modified()
                    .cmp(&b.timestamps.created_or_modified())
            }),
            newest_files: top_by(records, |a, b| {
                b.timestamps
                    .created_or_modified()
                    .cmp(&a.timestamps.created_or_modified())
            }),
        }
    }
}

/// First `MAX_TOP_FILES` records under a stable sort; ties keep scan
/// order.
fn top_by(
    records: &[FileRecord],
    compare: impl Fn(&FileRecord, &FileRecord) -> std::cmp::Ordering,
) -> Vec<FileRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(compare);
    sorted.truncate(MAX_TOP_FILES);
    sorted
}

/// Round to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(25.0), 25.0);
    }
}
