//! Extension-table classification.

use filesift_core::{CategoryTag, FileRecord, SiftPolicy};

use crate::Classify;

/// Classifies by the policy's ordered extension rule table.
///
/// Rule order is part of the contract: when an extension is listed in
/// two rules, the first declared rule wins, every run.
pub struct ExtensionClassifier<'a> {
    policy: &'a SiftPolicy,
}

impl<'a> ExtensionClassifier<'a> {
    /// Create a classifier over `policy`.
    pub fn new(policy: &'a SiftPolicy) -> Self {
        Self { policy }
    }
}

impl Classify for ExtensionClassifier<'_> {
    fn classify(&self, record: &FileRecord) -> CategoryTag {
        if !record.has_extension() {
            return CategoryTag::Other;
        }
        self.policy
            .categories
            .iter()
            .find(|rule| rule.matches(&record.extension))
            .map(|rule| rule.tag)
            .unwrap_or(CategoryTag::Other)
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use compact_str::CompactString;
    use filesift_core::{CategoryRule, Timestamps};

    use super::*;

    fn record(name: &str) -> FileRecord {
        FileRecord::new(
            format!("/tmp/{name}"),
            1,
            Timestamps::with_modified(SystemTime::now()),
        )
    }

    #[test]
    fn test_default_policy_assignments() {
        let policy = SiftPolicy::default();
        let classifier = ExtensionClassifier::new(&policy);

        assert_eq!(classifier.classify(&record("a.pdf")), CategoryTag::Documents);
        assert_eq!(classifier.classify(&record("b.jpg")), CategoryTag::Images);
        assert_eq!(classifier.classify(&record("c.exe")), CategoryTag::Programs);
        assert_eq!(classifier.classify(&record("d.xyz")), CategoryTag::Other);
        assert_eq!(classifier.classify(&record("e.MP4")), CategoryTag::Videos);
    }

    #[test]
    fn test_no_extension_is_other() {
        let policy = SiftPolicy::default();
        let classifier = ExtensionClassifier::new(&policy);
        assert_eq!(classifier.classify(&record("Makefile")), CategoryTag::Other);
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let mut policy = SiftPolicy::default();
        // Misconfigure .pdf into a second, later rule as well.
        policy
            .categories
            .iter_mut()
            .find(|rule| rule.tag == CategoryTag::Images)
            .unwrap()
            .extensions
            .push(CompactString::const_new(".pdf"));

        let classifier = ExtensionClassifier::new(&policy);
        assert_eq!(classifier.classify(&record("a.pdf")), CategoryTag::Documents);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let policy = SiftPolicy::default();
        let classifier = ExtensionClassifier::new(&policy);
        let records: Vec<_> = ["x.pdf", "y.zip", "z.unknown", "noext"]
            .iter()
            .map(|n| record(n))
            .collect();

        let first: Vec<_> = records.iter().map(|r| classifier.classify(r)).collect();
        let second: Vec<_> = records.iter().map(|r| classifier.classify(r)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_rule_never_matches() {
        let rule = CategoryRule {
            tag: CategoryTag::Other,
            label: "其他类".to_string(),
            extensions: vec![],
            color: "#7F7F7F".to_string(),
            description: String::new(),
        };
        assert!(!rule.matches(".pdf"));
        assert!(!rule.matches(""));
    }
}
