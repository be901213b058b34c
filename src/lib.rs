//! hogs - disk usage totals and the files responsible for them
//!
//! Walks each directory tree once, filters entries by configurable rules,
//! and keeps running totals, a per-directory usage breakdown, and bounded
//! rankings of the largest/smallest/oldest/newest files.

pub mod category;
pub mod collect;
pub mod config;
pub mod filter;
pub mod output;
pub mod ranked;
pub mod report;
pub mod usage;
pub mod walk;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use category::{EntryKind, FileCategory};
pub use collect::{UsageCollector, scan_tree};
pub use config::{DEFAULT_RANK_CAPACITY, DateField, MAX_RANK_CAPACITY, ScanConfig};
pub use filter::PathFilter;
pub use output::{OutputConfig, OutputForm, ReportPrinter, UnitSelection, print_json};
pub use ranked::{FileRecord, RankOrder, RankedList};
pub use report::UsageReport;
pub use usage::{DirUsageRow, DirUsageTree};
pub use walk::{Entry, Walker};
