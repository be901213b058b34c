//! Scan configuration.
//!
//! A `ScanConfig` is built once by the CLI layer, validated before any
//! traversal starts, and passed by reference into every per-tree collector.

use regex::Regex;

use crate::category::FileCategory;

/// Default number of entries kept per ranking.
pub const DEFAULT_RANK_CAPACITY: usize = 40;

/// Hard upper bound on a ranking's capacity.
pub const MAX_RANK_CAPACITY: usize = 1000;

/// Which stat timestamp the oldest/newest rankings compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateField {
    Accessed,
    #[default]
    Modified,
    Changed,
}

/// Configuration for one invocation, shared across all directory arguments.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Rankings to maintain and report.
    pub rank_largest: bool,
    pub rank_smallest: bool,
    pub rank_oldest: bool,
    pub rank_newest: bool,

    /// Per-ranking capacities, each in `1..=MAX_RANK_CAPACITY`.
    pub top_largest: usize,
    pub top_smallest: usize,
    pub top_oldest: usize,
    pub top_newest: usize,

    /// Report per-directory usage totals.
    pub dir_usage: bool,

    pub date_field: DateField,

    /// Unanchored include pattern; entries not matching are excluded.
    pub include: Option<String>,
    /// Unanchored exclude pattern; matching entries are excluded.
    pub exclude: Option<String>,
    /// Only count non-directories of this category.
    pub type_filter: Option<FileCategory>,

    /// Exclude any entry with a dot-prefixed path segment.
    pub skip_hidden: bool,
    /// Follow symbolic links during traversal.
    pub follow_links: bool,
    /// Exclude ordinary files whose status change is older than this many days.
    pub max_age_days: Option<u64>,

    /// Basename globs pruned by the walker before filtering.
    pub ignore_patterns: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            rank_largest: false,
            rank_smallest: false,
            rank_oldest: false,
            rank_newest: false,
            top_largest: DEFAULT_RANK_CAPACITY,
            top_smallest: DEFAULT_RANK_CAPACITY,
            top_oldest: DEFAULT_RANK_CAPACITY,
            top_newest: DEFAULT_RANK_CAPACITY,
            dir_usage: false,
            date_field: DateField::default(),
            include: None,
            exclude: None,
            type_filter: None,
            skip_hidden: false,
            follow_links: false,
            max_age_days: None,
            ignore_patterns: Vec::new(),
        }
    }
}

impl ScanConfig {
    /// Check the configuration before any traversal starts.
    ///
    /// Capacity violations and malformed patterns are fatal; the caller is
    /// expected to report the message and exit.
    pub fn validate(&self) -> Result<(), String> {
        check_capacity("largest", self.top_largest)?;
        check_capacity("smallest", self.top_smallest)?;
        check_capacity("oldest", self.top_oldest)?;
        check_capacity("newest", self.top_newest)?;

        if let Some(pattern) = &self.include {
            Regex::new(pattern).map_err(|e| format!("invalid match pattern '{pattern}': {e}"))?;
        }
        if let Some(pattern) = &self.exclude {
            Regex::new(pattern).map_err(|e| format!("invalid exclude pattern '{pattern}': {e}"))?;
        }

        Ok(())
    }

    /// Whether any of the four rankings is enabled.
    pub fn any_ranking(&self) -> bool {
        self.rank_largest || self.rank_smallest || self.rank_oldest || self.rank_newest
    }
}

fn check_capacity(which: &str, capacity: usize) -> Result<(), String> {
    if capacity == 0 || capacity > MAX_RANK_CAPACITY {
        return Err(format!(
            "invalid value for number of {which} files: {capacity} (must be 1..={MAX_RANK_CAPACITY})"
        ));
    }
    Ok(())
}
