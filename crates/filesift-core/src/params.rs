//! Scan parameter types.

use std::path::PathBuf;
use std::time::SystemTime;

use chrono::Utc;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Parameters for one scan invocation.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanParams {
    /// Cutoff age in days: entries created or modified within this many
    /// days are kept.
    #[builder(default = "7")]
    #[serde(default = "default_cutoff_days")]
    pub cutoff_days: u32,

    /// Explicit roots to scan; empty means use the policy defaults.
    #[builder(default)]
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Include hidden entries (names starting with `.`).
    #[builder(default = "false")]
    #[serde(default)]
    pub include_hidden: bool,

    /// Maximum recursion depth; directories at this depth are not
    /// descended into.
    #[builder(default = "10")]
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

fn default_cutoff_days() -> u32 {
    7
}

fn default_max_depth() -> u32 {
    10
}

impl ScanParamsBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(0) = self.cutoff_days {
            return Err("cutoff_days must be at least 1".to_string());
        }
        Ok(())
    }
}

impl ScanParams {
    /// Create a new params builder.
    pub fn builder() -> ScanParamsBuilder {
        ScanParamsBuilder::default()
    }

    /// Earliest acceptable created-or-modified time for this scan.
    pub fn cutoff_time(&self) -> SystemTime {
        let cutoff = Utc::now() - chrono::Duration::days(i64::from(self.cutoff_days));
        cutoff.into()
    }
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            cutoff_days: 7,
            roots: Vec::new(),
            include_hidden: false,
            max_depth: 10,
        }
    }
}
