//! File record types.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use compact_str::{CompactString, ToCompactString};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Closed set of classification categories.
///
/// Display labels, colors, and descriptions live in the policy rule
/// table; the tag itself is what flows through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum CategoryTag {
    /// Documents and text files.
    Documents,
    /// Image files.
    Images,
    /// Video files.
    Videos,
    /// Audio files.
    Audio,
    /// Executables and installers.
    Programs,
    /// Archives and compressed bundles.
    Archives,
    /// Fallback for everything unmatched.
    Other,
}

/// Identity key for deduplication, derived from `(path, size, mtime)`.
///
/// This is *not* a content hash: two records with equal fingerprints are
/// the same physical file reached twice, not proof of equal bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub [u8; 32]);

impl Fingerprint {
    /// Create a fingerprint from raw digest bytes.
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the fingerprint as a hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }
}

/// File metadata timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Timestamps {
    /// Last modification time.
    pub modified: SystemTime,
    /// Last access time (if available).
    pub accessed: Option<SystemTime>,
    /// Creation time (if available, platform-dependent).
    pub created: Option<SystemTime>,
}

impl Timestamps {
    /// Create timestamps with all available times.
    pub fn new(
        modified: SystemTime,
        accessed: Option<SystemTime>,
        created: Option<SystemTime>,
    ) -> Self {
        Self {
            modified,
            accessed,
            created,
        }
    }

    /// Create timestamps with only modified time.
    pub fn with_modified(modified: SystemTime) -> Self {
        Self {
            modified,
            accessed: None,
            created: None,
        }
    }

    /// Creation time, falling back to modification time where the
    /// platform does not report one.
    pub fn created_or_modified(&self) -> SystemTime {
        self.created.unwrap_or(self.modified)
    }

    /// Whether the entry was created or modified at/after `cutoff`.
    pub fn meets_cutoff(&self, cutoff: SystemTime) -> bool {
        self.created_or_modified() >= cutoff || self.modified >= cutoff
    }
}

/// One filesystem entry surviving the cutoff filter.
///
/// Records are created by the walker, enriched by the fingerprinter and
/// the classifier, labelled by the aggregator, and read-only thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute, normalized path.
    pub path: PathBuf,

    /// File name (not full path).
    pub name: CompactString,

    /// Lower-cased extension including the leading dot, or empty.
    pub extension: CompactString,

    /// Size in bytes.
    pub size: u64,

    /// File metadata timestamps.
    pub timestamps: Timestamps,

    /// Identity key, set by the fingerprinter.
    pub fingerprint: Option<Fingerprint>,

    /// Category, set exactly once by the classifier.
    pub category: Option<CategoryTag>,

    /// Size bucket label, set by the aggregator.
    pub size_label: Option<CompactString>,

    /// Qualitative age label, set by the aggregator.
    pub relative_age: Option<CompactString>,

    /// Best-effort MIME type derived from the extension.
    pub mime_type: CompactString,

    /// Extension is a known executable/installer type.
    pub is_executable: bool,

    /// Extension is a known archive type.
    pub is_archive: bool,

    /// MIME type is image/video/audio.
    pub is_media: bool,
}

impl FileRecord {
    /// Build a record from a path plus stat results. Derives the name,
    /// extension, MIME type, and extension flags.
    pub fn new(path: impl Into<PathBuf>, size: u64, timestamps: Timestamps) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_compact_string())
            .unwrap_or_default();
        let extension = extension_of(&path);
        let mime_type = mime_for_extension(&extension);
        let is_media = mime_type.starts_with("image/")
            || mime_type.starts_with("video/")
            || mime_type.starts_with("audio/");

        Self {
            is_executable: EXECUTABLE_EXTENSIONS.contains(&extension.as_str()),
            is_archive: ARCHIVE_EXTENSIONS.contains(&extension.as_str()),
            is_media,
            path,
            name,
            extension,
            size,
            timestamps,
            fingerprint: None,
            category: None,
            size_label: None,
            relative_age: None,
            mime_type,
        }
    }

    /// Whether the record carries a non-empty extension.
    pub fn has_extension(&self) -> bool {
        !self.extension.is_empty()
    }
}

/// Extensions treated as executables/installers.
const EXECUTABLE_EXTENSIONS: &[&str] = &[
    ".exe", ".msi", ".bat", ".cmd", ".com", ".sh", ".app", ".run", ".jar",
];

/// Extensions treated as archives.
const ARCHIVE_EXTENSIONS: &[&str] = &[
    ".zip", ".rar", ".7z", ".tar", ".gz", ".bz2", ".xz", ".tgz", ".iso",
];

/// Lower-cased extension with leading dot, or empty when there is none.
pub fn extension_of(path: &Path) -> CompactString {
    match path.extension() {
        Some(ext) => {
            let mut s = CompactString::new(".");
            s.push_str(&ext.to_string_lossy().to_lowercase());
            s
        }
        None => CompactString::default(),
    }
}

/// Best-effort MIME type for a dotted, lower-cased extension.
pub fn mime_for_extension(extension: &str) -> CompactString {
    let mime = match extension {
        ".pdf" => "application/pdf",
        ".doc" | ".docx" => "application/msword",
        ".xls" | ".xlsx" => "application/vnd.ms-excel",
        ".ppt" | ".pptx" => "application/vnd.ms-powerpoint",
        ".txt" | ".md" | ".rtf" => "text/plain",
        ".csv" => "text/csv",
        ".html" | ".htm" => "text/html",
        ".json" => "application/json",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".png" => "image/png",
        ".gif" => "image/gif",
        ".bmp" => "image/bmp",
        ".svg" => "image/svg+xml",
        ".webp" => "image/webp",
        ".tif" | ".tiff" => "image/tiff",
        ".heic" => "image/heic",
        ".mp4" => "video/mp4",
        ".m4v" => "video/mp4",
        ".avi" => "video/x-msvideo",
        ".mkv" => "video/x-matroska",
        ".mov" => "video/quicktime",
        ".wmv" => "video/x-ms-wmv",
        ".webm" => "video/webm",
        ".mpg" | ".mpeg" => "video/mpeg",
        ".mp3" => "audio/mpeg",
        ".wav" => "audio/wav",
        ".flac" => "audio/flac",
        ".aac" => "audio/aac",
        ".ogg" => "audio/ogg",
        ".m4a" => "audio/mp4",
        ".wma" => "audio/x-ms-wma",
        ".zip" => "application/zip",
        ".rar" => "application/vnd.rar",
        ".7z" => "application/x-7z-compressed",
        ".tar" => "application/x-tar",
        ".gz" | ".tgz" => "application/gzip",
        ".exe" | ".msi" | ".dll" => "application/x-msdownload",
        _ => "application/octet-stream",
    };
    CompactString::const_new(mime)
}
