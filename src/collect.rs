//! Per-tree aggregation.
//!
//! `UsageCollector` owns all mutable state for one directory-tree argument:
//! the running totals, entry counts, the four rankings, and the directory
//! usage tree. Entries stream in from the walker; the collector applies the
//! path filter, dispatches on entry kind, and accumulates. `finish()`
//! freezes everything into a `UsageReport`.

use std::path::Path;

use chrono::Utc;

use crate::category::EntryKind;
use crate::config::{DateField, ScanConfig};
use crate::filter::PathFilter;
use crate::ranked::{FileRecord, RankOrder, RankedList};
use crate::report::UsageReport;
use crate::usage::DirUsageTree;
use crate::walk::{Entry, Walker};

pub struct UsageCollector<'a> {
    config: &'a ScanConfig,
    filter: PathFilter,
    total_bytes: u64,
    file_count: u64,
    dir_count: u64,
    largest: RankedList,
    smallest: RankedList,
    oldest: RankedList,
    newest: RankedList,
    dir_usage: DirUsageTree,
}

impl<'a> UsageCollector<'a> {
    /// Build a collector with empty state and the scan clock captured.
    /// Fails on invalid capacities or patterns, before any traversal.
    pub fn new(config: &'a ScanConfig) -> Result<Self, String> {
        config.validate()?;
        let now = Utc::now().timestamp();
        let filter = PathFilter::new(config, now)?;

        Ok(Self {
            config,
            filter,
            total_bytes: 0,
            file_count: 0,
            dir_count: 0,
            largest: RankedList::new(RankOrder::Largest, config.top_largest),
            smallest: RankedList::new(RankOrder::Smallest, config.top_smallest),
            oldest: RankedList::new(RankOrder::Oldest, config.top_oldest),
            newest: RankedList::new(RankOrder::Newest, config.top_newest),
            dir_usage: DirUsageTree::new(),
        })
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn file_count(&self) -> u64 {
        self.file_count
    }

    pub fn dir_count(&self) -> u64 {
        self.dir_count
    }

    /// Feed one visited entry through the filter and into the totals.
    pub fn record(&mut self, entry: &Entry) {
        if !self.filter.matches(entry) {
            return;
        }

        if entry.kind == EntryKind::Directory {
            if entry.is_symlink {
                // A directory reached through a link counts like a file:
                // the link's own size, attributed to its parent.
                self.add_file_usage(entry);
            } else {
                // The directory inode's own size counts toward the total
                // but is never attributed into the usage tree.
                self.total_bytes += entry.size;
            }
            self.dir_count += 1;
            return;
        }

        if entry.is_symlink {
            self.add_file_usage(entry);
            self.file_count += 1;
            return;
        }

        self.add_file_usage(entry);
        self.file_count += 1;

        if self.config.any_ranking() {
            let record = FileRecord {
                path: entry.path.clone(),
                size: entry.size,
                time: self.date_of(entry),
            };
            if self.config.rank_largest {
                self.largest.insert(record.clone());
            }
            if self.config.rank_smallest {
                self.smallest.insert(record.clone());
            }
            if self.config.rank_oldest {
                self.oldest.insert(record.clone());
            }
            if self.config.rank_newest {
                self.newest.insert(record);
            }
        }
    }

    /// Freeze the accumulated state into a report for `root`.
    pub fn finish(self, root: &Path) -> UsageReport {
        let enabled = |on: bool, list: RankedList| {
            if on { Some(list.into_records()) } else { None }
        };
        UsageReport {
            root: root.to_path_buf(),
            total_bytes: self.total_bytes,
            file_count: self.file_count,
            dir_count: self.dir_count,
            largest: enabled(self.config.rank_largest, self.largest),
            smallest: enabled(self.config.rank_smallest, self.smallest),
            oldest: enabled(self.config.rank_oldest, self.oldest),
            newest: enabled(self.config.rank_newest, self.newest),
            directories: if self.config.dir_usage {
                Some(self.dir_usage.leaf_rows())
            } else {
                None
            },
        }
    }

    fn add_file_usage(&mut self, entry: &Entry) {
        self.total_bytes += entry.size;
        if self.config.dir_usage {
            if let Some(parent) = entry.path.parent() {
                if !parent.as_os_str().is_empty() {
                    self.dir_usage.add(parent, entry.size);
                }
            }
        }
    }

    fn date_of(&self, entry: &Entry) -> i64 {
        match self.config.date_field {
            DateField::Accessed => entry.accessed,
            DateField::Modified => entry.modified,
            DateField::Changed => entry.changed,
        }
    }
}

/// Walk one tree to completion and report on it. State lives only for the
/// duration of this call.
pub fn scan_tree(config: &ScanConfig, root: &Path) -> Result<UsageReport, String> {
    let mut collector = UsageCollector::new(config)?;
    let walker = Walker::new(root, config);
    for entry in walker.entries() {
        collector.record(&entry);
    }
    Ok(collector.finish(root))
}
