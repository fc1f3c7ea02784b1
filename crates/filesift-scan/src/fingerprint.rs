//! Identity fingerprinting and cross-root deduplication.
//!
//! The fingerprint digests `(path, size, mtime)`. It removes the same
//! physical file reached via two overlapping scan roots; it says nothing
//! about file content.

use std::time::UNIX_EPOCH;

use indexmap::IndexMap;

use filesift_core::{FileRecord, Fingerprint};

/// Derive the identity key for a record.
pub fn fingerprint(record: &FileRecord) -> Fingerprint {
    let mut hasher = blake3::Hasher::new();
    hasher.update(record.path.to_string_lossy().as_bytes());
    hasher.update(&record.size.to_le_bytes());
    let mtime = record
        .timestamps
        .modified
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    hasher.update(&mtime.as_nanos().to_le_bytes());
    Fingerprint::new(*hasher.finalize().as_bytes())
}

/// Deduplicate records across all walked roots.
///
/// Sets each record's fingerprint, keeps the first-seen record per key,
/// and preserves scan order.
pub fn dedup(records: Vec<FileRecord>) -> Vec<FileRecord> {
    let mut seen: IndexMap<Fingerprint, FileRecord> = IndexMap::with_capacity(records.len());
    for mut record in records {
        let key = fingerprint(&record);
        record.fingerprint = Some(key);
        seen.entry(key).or_insert(record);
    }
    seen.into_values().collect()
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime};

    use filesift_core::Timestamps;

    use super::*;

    fn record(path: &str, size: u64, mtime_secs: u64) -> FileRecord {
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(mtime_secs);
        FileRecord::new(path, size, Timestamps::with_modified(mtime))
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = record("/tmp/a.txt", 100, 1000);
        assert_eq!(fingerprint(&a), fingerprint(&a));
    }

    #[test]
    fn test_fingerprint_varies_with_inputs() {
        let a = record("/tmp/a.txt", 100, 1000);
        assert_ne!(fingerprint(&a), fingerprint(&record("/tmp/b.txt", 100, 1000)));
        assert_ne!(fingerprint(&a), fingerprint(&record("/tmp/a.txt", 101, 1000)));
        assert_ne!(fingerprint(&a), fingerprint(&record("/tmp/a.txt", 100, 1001)));
    }

    #[test]
    fn test_dedup_first_seen_wins_and_order_kept() {
        let records = vec![
            record("/tmp/a.txt", 1, 10),
            record("/tmp/b.txt", 2, 20),
            record("/tmp/a.txt", 1, 10),
            record("/tmp/c.txt", 3, 30),
        ];
        let deduped = dedup(records);
        let names: Vec<_> = deduped.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
        assert!(deduped.iter().all(|r| r.fingerprint.is_some()));
    }
}
