//! Content-hint classification.
//!
//! Alternate policy for callers that prefer derived signals over the
//! extension rule table. Checks, in order: derived flags, MIME-type
//! prefixes, filename hints. Not composed with the extension classifier.

use filesift_core::{CategoryTag, FileRecord};
use tracing::trace;

use crate::Classify;

/// Lower-cased filename fragments that hint at a category.
const NAME_HINTS: &[(&str, CategoryTag)] = &[
    ("readme", CategoryTag::Documents),
    ("license", CategoryTag::Documents),
    ("changelog", CategoryTag::Documents),
    ("notes", CategoryTag::Documents),
    ("setup", CategoryTag::Programs),
    ("install", CategoryTag::Programs),
];

/// Classifies by derived flags, MIME prefix, then filename hints.
#[derive(Debug, Default)]
pub struct ContentHintClassifier;

impl ContentHintClassifier {
    /// Create the hint classifier.
    pub fn new() -> Self {
        Self
    }
}

impl Classify for ContentHintClassifier {
    fn classify(&self, record: &FileRecord) -> CategoryTag {
        if record.is_executable {
            return CategoryTag::Programs;
        }
        if record.is_archive {
            return CategoryTag::Archives;
        }
        if record.is_media {
            // MIME prefix decides which media category.
            return if record.mime_type.starts_with("image/") {
                CategoryTag::Images
            } else if record.mime_type.starts_with("video/") {
                CategoryTag::Videos
            } else {
                CategoryTag::Audio
            };
        }
        if record.mime_type.starts_with("text/") || record.mime_type == "application/pdf" {
            return CategoryTag::Documents;
        }

        let name = record.name.to_lowercase();
        for (hint, tag) in NAME_HINTS {
            if name.contains(hint) {
                trace!(name = %record.name, hint, "filename hint matched");
                return *tag;
            }
        }
        CategoryTag::Other
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use filesift_core::Timestamps;

    use super::*;

    fn record(name: &str) -> FileRecord {
        FileRecord::new(
            format!("/tmp/{name}"),
            1,
            Timestamps::with_modified(SystemTime::now()),
        )
    }

    #[test]
    fn test_flags_checked_first() {
        let classifier = ContentHintClassifier::new();
        assert_eq!(classifier.classify(&record("run.sh")), CategoryTag::Programs);
        assert_eq!(classifier.classify(&record("data.tar")), CategoryTag::Archives);
    }

    #[test]
    fn test_mime_prefixes() {
        let classifier = ContentHintClassifier::new();
        assert_eq!(classifier.classify(&record("photo.png")), CategoryTag::Images);
        assert_eq!(classifier.classify(&record("clip.mkv")), CategoryTag::Videos);
        assert_eq!(classifier.classify(&record("song.flac")), CategoryTag::Audio);
        assert_eq!(classifier.classify(&record("report.pdf")), CategoryTag::Documents);
    }

    #[test]
    fn test_filename_hints() {
        let classifier = ContentHintClassifier::new();
        assert_eq!(classifier.classify(&record("README")), CategoryTag::Documents);
        assert_eq!(classifier.classify(&record("LICENSE-MIT")), CategoryTag::Documents);
        assert_eq!(
            classifier.classify(&record("setup-wizard.bin")),
            CategoryTag::Programs
        );
    }

    #[test]
    fn test_fallback_is_other() {
        let classifier = ContentHintClassifier::new();
        assert_eq!(classifier.classify(&record("mystery.xyz")), CategoryTag::Other);
    }
}
