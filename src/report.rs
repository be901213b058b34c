//! Scan results handed to the presentation layer.

use std::path::PathBuf;

use serde::Serialize;

use crate::ranked::FileRecord;
use crate::usage::DirUsageRow;

/// Everything one tree's walk produced. Rankings and the directory
/// breakdown are present only when their reporting was enabled.
#[derive(Debug, Serialize)]
pub struct UsageReport {
    pub root: PathBuf,
    pub total_bytes: u64,
    pub file_count: u64,
    pub dir_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub largest: Option<Vec<FileRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smallest: Option<Vec<FileRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest: Option<Vec<FileRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest: Option<Vec<FileRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directories: Option<Vec<DirUsageRow>>,
}

impl UsageReport {
    /// Whether any of the four rankings is part of this report.
    pub fn has_rankings(&self) -> bool {
        self.largest.is_some()
            || self.smallest.is_some()
            || self.oldest.is_some()
            || self.newest.is_some()
    }
}
