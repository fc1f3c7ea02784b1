//! Category classifiers for filesift.
//!
//! Two classification policies are available:
//!
//! - [`ExtensionClassifier`] - the primary policy: first matching rule
//!   in the configured (insertion) order wins.
//! - [`ContentHintClassifier`] - an alternate policy using derived
//!   flags, MIME prefixes, and filename hints.
//!
//! They are never composed: callers pick exactly one [`Classify`]
//! implementation per scan. Classification never fails; anything
//! unresolvable lands in [`CategoryTag::Other`].

mod content;
mod extension;

pub use content::ContentHintClassifier;
pub use extension::ExtensionClassifier;

use filesift_core::{CategoryTag, FileRecord};

/// A classification policy: assigns exactly one category per record.
pub trait Classify {
    /// Category for one record. Infallible.
    fn classify(&self, record: &FileRecord) -> CategoryTag;
}

/// Tag every record in place, preserving order.
pub fn classify_all(classifier: &dyn Classify, records: &mut [FileRecord]) {
    for record in records {
        record.category = Some(classifier.classify(record));
    }
}
