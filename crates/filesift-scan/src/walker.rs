//! Depth-bounded sequential directory walker.

use std::path::Path;
use std::time::SystemTime;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use filesift_core::{
    FileRecord, ScanParams, ScanWarning, SiftPolicy, SkipCounts, Timestamps, WarningKind, paths,
};

/// Everything one walk produced: candidate records plus the recovered
/// errors encountered along the way.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// Candidate records in scan order, not yet deduplicated.
    pub records: Vec<FileRecord>,
    /// Recovered errors.
    pub warnings: Vec<ScanWarning>,
    /// Counts of skipped paths/entries.
    pub skipped: SkipCounts,
}

impl WalkOutcome {
    /// Record a warning and bump the skip counter matching its kind, so
    /// the two reports never disagree.
    fn push_warning(&mut self, warning: ScanWarning) {
        match warning.kind {
            WarningKind::MissingRoot => self.skipped.missing_roots += 1,
            WarningKind::PermissionDenied | WarningKind::ReadError => {
                self.skipped.unreadable_dirs += 1;
            }
            WarningKind::MetadataError => self.skipped.stat_failures += 1,
        }
        self.warnings.push(warning);
    }
}

/// Sequential depth-first walker.
///
/// Borrows an immutable policy and parameter set; one walker performs
/// one scan invocation over all configured roots, strictly in sequence.
pub struct Walker<'a> {
    policy: &'a SiftPolicy,
    params: &'a ScanParams,
    cancel: CancellationToken,
}

impl<'a> Walker<'a> {
    /// Create a new walker with its own cancellation token.
    pub fn new(policy: &'a SiftPolicy, params: &'a ScanParams) -> Self {
        Self::with_cancellation(policy, params, CancellationToken::new())
    }

    /// Create a walker aborted when `cancel` fires. A cancelled walk
    /// returns whatever it gathered so far.
    pub fn with_cancellation(
        policy: &'a SiftPolicy,
        params: &'a ScanParams,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            policy,
            params,
            cancel,
        }
    }

    /// Walk all roots (explicit params roots, or the policy defaults)
    /// and collect candidate records filtered by the cutoff.
    pub fn walk(&self) -> WalkOutcome {
        let cutoff = self.params.cutoff_time();
        let roots = if self.params.roots.is_empty() {
            &self.policy.default_roots
        } else {
            &self.params.roots
        };

        let mut outcome = WalkOutcome::default();
        for root in roots {
            let expanded = paths::expand_home(root);
            let root = match expanded.canonicalize() {
                Ok(root) if root.is_dir() => root,
                _ => {
                    warn!(path = %expanded.display(), "scan root not found, skipping");
                    outcome.push_warning(ScanWarning::missing_root(&expanded));
                    continue;
                }
            };
            if self.policy.is_excluded(&root) {
                debug!(path = %root.display(), "scan root excluded by policy");
                continue;
            }
            self.walk_dir(&root, 0, cutoff, &mut outcome);
        }
        outcome
    }

    /// Recurse into `dir` at `depth`. Directories at `max_depth` are
    /// listed for files but never descended into.
    fn walk_dir(&self, dir: &Path, depth: u32, cutoff: SystemTime, outcome: &mut WalkOutcome) {
        if self.cancel.is_cancelled() {
            return;
        }

        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "cannot list directory");
                outcome.push_warning(ScanWarning::read_error(dir, &err));
                return;
            }
        };

        // Sort children by name for a stable scan order.
        let mut children: Vec<_> = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => children.push(entry),
                Err(err) => {
                    warn!(path = %dir.display(), error = %err, "cannot read entry");
                    outcome.push_warning(ScanWarning::read_error(dir, &err));
                }
            }
        }
        children.sort_by_key(|entry| entry.file_name());

        for entry in children {
            let name = entry.file_name();
            if !self.params.include_hidden && name.to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "cannot stat entry");
                    outcome.push_warning(ScanWarning::metadata_error(&path, &err));
                    continue;
                }
            };

            if metadata.is_dir() {
                if self.policy.is_excluded(&path) {
                    debug!(path = %path.display(), "pruning excluded subtree");
                    continue;
                }
                if depth < self.params.max_depth {
                    self.walk_dir(&path, depth + 1, cutoff, outcome);
                }
            } else if metadata.is_file() {
                let timestamps = Timestamps::new(
                    metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                    metadata.accessed().ok(),
                    metadata.created().ok(),
                );
                if timestamps.meets_cutoff(cutoff) {
                    outcome
                        .records
                        .push(FileRecord::new(path, metadata.len(), timestamps));
                }
            }
            // Symlinks and special files are not inventoried.
        }
    }
}
