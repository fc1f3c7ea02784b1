//! Classification policy: category rules, size buckets, exclusions.

use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::error::SiftError;
use crate::paths::normalize_for_match;
use crate::record::CategoryTag;

/// One ordered classification rule: a category tag plus the extensions
/// that map to it and its presentation attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category tag this rule assigns.
    pub tag: CategoryTag,
    /// Display label (e.g. 文档类).
    pub label: String,
    /// Lower-cased extensions with leading dot.
    #[serde(default)]
    pub extensions: Vec<CompactString>,
    /// Display color (hex string).
    pub color: String,
    /// Human-readable description.
    pub description: String,
}

impl CategoryRule {
    /// Whether this rule's extension set contains `extension`.
    pub fn matches(&self, extension: &str) -> bool {
        self.extensions.iter().any(|e| e == extension)
    }
}

/// A `[min, max)` size range with a qualitative label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeBucket {
    /// Bucket label (e.g. 小).
    pub label: String,
    /// Inclusive lower bound in bytes.
    pub min: u64,
    /// Exclusive upper bound in bytes; `None` means unbounded.
    /// Serialized as `-1` for unbounded, per the policy file format.
    #[serde(with = "neg_one_unbounded")]
    pub max: Option<u64>,
}

impl SizeBucket {
    /// Whether `size` falls inside this bucket.
    pub fn contains(&self, size: u64) -> bool {
        size >= self.min && self.max.is_none_or(|max| size < max)
    }
}

/// `max: -1` in policy files means unbounded above.
mod neg_one_unbounded {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(max: &Option<u64>, ser: S) -> Result<S::Ok, S::Error> {
        match max {
            Some(v) => ser.serialize_i64(*v as i64),
            None => ser.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
        let raw = i64::deserialize(de)?;
        if raw < 0 {
            Ok(None)
        } else {
            Ok(Some(raw as u64))
        }
    }
}

/// Immutable classification policy.
///
/// Constructed once (defaults or a policy file) and passed by reference
/// into the walker, the classifiers, and the aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiftPolicy {
    /// Ordered category rules; first match wins.
    pub categories: Vec<CategoryRule>,

    /// Size buckets, declared contiguous and exhaustive over `[0, +inf)`.
    pub size_buckets: Vec<SizeBucket>,

    /// Exclusion entries, matched as case-insensitive substrings of
    /// normalized candidate paths.
    #[serde(default)]
    pub exclude_paths: Vec<String>,

    /// Roots scanned when the caller supplies none. May contain `~`.
    #[serde(default)]
    pub default_roots: Vec<PathBuf>,
}

impl SiftPolicy {
    /// Validate the policy. This is the only fatal error class: a scan
    /// never starts with a malformed rule table or bucket table.
    pub fn validate(&self) -> Result<(), SiftError> {
        if self.categories.is_empty() {
            return Err(SiftError::InvalidConfig {
                message: "category rule table is empty".to_string(),
            });
        }
        for rule in &self.categories {
            for ext in &rule.extensions {
                if !ext.starts_with('.') || *ext != ext.to_lowercase() {
                    return Err(SiftError::InvalidConfig {
                        message: format!(
                            "extension {ext:?} in rule {:?} must be lower-cased with a leading dot",
                            rule.label
                        ),
                    });
                }
            }
        }

        if self.size_buckets.is_empty() {
            return Err(SiftError::InvalidConfig {
                message: "size bucket table is empty".to_string(),
            });
        }
        let mut expected_min = 0u64;
        for (i, bucket) in self.size_buckets.iter().enumerate() {
            if bucket.min != expected_min {
                return Err(SiftError::InvalidConfig {
                    message: format!(
                        "size bucket {:?} starts at {} but the previous bucket ends at {expected_min}",
                        bucket.label, bucket.min
                    ),
                });
            }
            match bucket.max {
                Some(max) if max <= bucket.min => {
                    return Err(SiftError::InvalidConfig {
                        message: format!("size bucket {:?} has an empty range", bucket.label),
                    });
                }
                Some(max) => expected_min = max,
                None if i + 1 != self.size_buckets.len() => {
                    return Err(SiftError::InvalidConfig {
                        message: format!(
                            "unbounded size bucket {:?} must be declared last",
                            bucket.label
                        ),
                    });
                }
                None => {}
            }
        }
        if self
            .size_buckets
            .last()
            .is_some_and(|bucket| bucket.max.is_some())
        {
            return Err(SiftError::InvalidConfig {
                message: "size buckets do not cover [0, +inf): last bucket is bounded".to_string(),
            });
        }
        Ok(())
    }

    /// First rule for `tag` in declared order.
    pub fn rule_for(&self, tag: CategoryTag) -> Option<&CategoryRule> {
        self.categories.iter().find(|rule| rule.tag == tag)
    }

    /// Display label for `tag`, falling back to the tag name.
    pub fn label_for(&self, tag: CategoryTag) -> String {
        self.rule_for(tag)
            .map(|rule| rule.label.clone())
            .unwrap_or_else(|| tag.to_string())
    }

    /// First declared bucket containing `size`. `None` only on a
    /// malformed table that slipped past validation.
    pub fn bucket_for(&self, size: u64) -> Option<&SizeBucket> {
        self.size_buckets.iter().find(|bucket| bucket.contains(size))
    }

    /// Whether `path` matches any exclude entry (case-insensitive
    /// substring containment against the normalized forms).
    pub fn is_excluded(&self, path: &std::path::Path) -> bool {
        let candidate = normalize_for_match(&path.to_string_lossy());
        self.exclude_paths
            .iter()
            .any(|entry| candidate.contains(&normalize_for_match(entry)))
    }
}

impl Default for SiftPolicy {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            size_buckets: default_size_buckets(),
            exclude_paths: vec![
                "$recycle.bin".to_string(),
                "system volume information".to_string(),
                "node_modules".to_string(),
                "/.git".to_string(),
                "appdata/local/temp".to_string(),
            ],
            default_roots: vec![
                PathBuf::from("~/Desktop"),
                PathBuf::from("~/Downloads"),
                PathBuf::from("~/Documents"),
            ],
        }
    }
}

fn rule(
    tag: CategoryTag,
    label: &str,
    color: &str,
    description: &str,
    extensions: &[&str],
) -> CategoryRule {
    CategoryRule {
        tag,
        label: label.to_string(),
        extensions: extensions.iter().map(|e| CompactString::from(*e)).collect(),
        color: color.to_string(),
        description: description.to_string(),
    }
}

fn default_categories() -> Vec<CategoryRule> {
    vec![
        rule(
            CategoryTag::Documents,
            "文档类",
            "#4F81BD",
            "文档和文本文件",
            &[
                ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".txt", ".md",
                ".csv", ".rtf", ".odt",
            ],
        ),
        rule(
            CategoryTag::Images,
            "图片类",
            "#9BBB59",
            "图片和图像文件",
            &[
                ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".ico", ".tif",
                ".tiff", ".heic",
            ],
        ),
        rule(
            CategoryTag::Videos,
            "视频类",
            "#8064A2",
            "视频文件",
            &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm", ".m4v", ".mpg", ".mpeg"],
        ),
        rule(
            CategoryTag::Audio,
            "音频类",
            "#4BACC6",
            "音频文件",
            &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a", ".wma"],
        ),
        rule(
            CategoryTag::Programs,
            "程序类",
            "#C0504D",
            "可执行程序和安装包",
            &[
                ".exe", ".msi", ".dll", ".app", ".dmg", ".deb", ".rpm", ".apk", ".bat",
                ".cmd", ".sh", ".com", ".jar",
            ],
        ),
        rule(
            CategoryTag::Archives,
            "压缩类",
            "#F79646",
            "压缩包和归档文件",
            &[".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz", ".tgz", ".iso"],
        ),
        rule(CategoryTag::Other, "其他类", "#7F7F7F", "未分类文件", &[]),
    ]
}

fn default_size_buckets() -> Vec<SizeBucket> {
    vec![
        SizeBucket {
            label: "小".to_string(),
            min: 0,
            max: Some(1_048_576),
        },
        SizeBucket {
            label: "中".to_string(),
            min: 1_048_576,
            max: Some(104_857_600),
        },
        SizeBucket {
            label: "大".to_string(),
            min: 104_857_600,
            max: Some(1_073_741_824),
        },
        SizeBucket {
            label: "超大".to_string(),
            min: 1_073_741_824,
            max: None,
        },
    ]
}
