//! Path inclusion rules.
//!
//! `PathFilter` decides whether a visited entry counts at all. Rules are
//! applied cheapest first: hidden segments, include pattern, exclude
//! pattern, type filter (non-directories), age cutoff (ordinary files).
//! The filter is a pure decision function; it is built once per tree with
//! the scan-start clock captured.

use std::path::{Component, Path};

use regex::Regex;

use crate::category::{EntryKind, FileCategory};
use crate::config::ScanConfig;
use crate::walk::Entry;

pub struct PathFilter {
    skip_hidden: bool,
    include: Option<Regex>,
    exclude: Option<Regex>,
    type_filter: Option<FileCategory>,
    max_age_days: Option<u64>,
    /// Scan-start wall clock, unix seconds.
    now: i64,
}

impl PathFilter {
    /// Compile the filter from configuration. Malformed patterns are a
    /// fatal setup error.
    pub fn new(config: &ScanConfig, now: i64) -> Result<Self, String> {
        let include = compile(config.include.as_deref(), "match")?;
        let exclude = compile(config.exclude.as_deref(), "exclude")?;

        Ok(Self {
            skip_hidden: config.skip_hidden,
            include,
            exclude,
            type_filter: config.type_filter,
            max_age_days: config.max_age_days,
            now,
        })
    }

    /// Whether the entry is counted. No side effects.
    pub fn matches(&self, entry: &Entry) -> bool {
        if self.skip_hidden && has_hidden_segment(&entry.path) {
            return false;
        }

        if self.include.is_some() || self.exclude.is_some() {
            let text = entry.path.to_string_lossy();
            if let Some(re) = &self.include {
                if !re.is_match(&text) {
                    return false;
                }
            }
            if let Some(re) = &self.exclude {
                if re.is_match(&text) {
                    return false;
                }
            }
        }

        if entry.kind != EntryKind::Directory {
            if let Some(want) = self.type_filter {
                if FileCategory::classify(&entry.file_name()) != Some(want) {
                    return false;
                }
            }
        }

        // Age applies to ordinary files only; directories and symlinks are
        // always current enough.
        if entry.kind != EntryKind::Directory && !entry.is_symlink {
            if let Some(max_days) = self.max_age_days {
                let age_days = (self.now - entry.changed) / 86400;
                if age_days > max_days as i64 {
                    return false;
                }
            }
        }

        true
    }
}

fn compile(pattern: Option<&str>, which: &str) -> Result<Option<Regex>, String> {
    match pattern {
        Some(p) => Regex::new(p)
            .map(Some)
            .map_err(|e| format!("invalid {which} pattern '{p}': {e}")),
        None => Ok(None),
    }
}

/// Any normal path segment starting with a dot.
fn has_hidden_segment(path: &Path) -> bool {
    path.components().any(|c| {
        matches!(c, Component::Normal(s) if s.to_string_lossy().starts_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn entry(path: &str, kind: EntryKind) -> Entry {
        Entry {
            path: PathBuf::from(path),
            kind,
            is_symlink: false,
            size: 100,
            accessed: 1_000_000,
            modified: 1_000_000,
            changed: 1_000_000,
        }
    }

    fn filter(config: &ScanConfig, now: i64) -> PathFilter {
        PathFilter::new(config, now).expect("filter should compile")
    }

    #[test]
    fn hidden_segments_exclude_anywhere_in_path() {
        let config = ScanConfig {
            skip_hidden: true,
            ..Default::default()
        };
        let f = filter(&config, 2_000_000);

        assert!(!f.matches(&entry("a/.git/config", EntryKind::Regular)));
        assert!(!f.matches(&entry(".hidden", EntryKind::Regular)));
        assert!(f.matches(&entry("a/visible/file", EntryKind::Regular)));
        // A relative "." root component is not a hidden segment.
        assert!(f.matches(&entry("./a/file", EntryKind::Regular)));
    }

    #[test]
    fn hidden_rule_off_by_default() {
        let f = filter(&ScanConfig::default(), 2_000_000);
        assert!(f.matches(&entry("a/.git/config", EntryKind::Regular)));
    }

    #[test]
    fn include_pattern_is_unanchored() {
        let config = ScanConfig {
            include: Some(r"\.log$".to_string()),
            ..Default::default()
        };
        let f = filter(&config, 2_000_000);

        assert!(f.matches(&entry("var/messages.log", EntryKind::Regular)));
        assert!(!f.matches(&entry("var/messages.txt", EntryKind::Regular)));
    }

    #[test]
    fn exclude_pattern_wins_over_include() {
        let config = ScanConfig {
            include: Some("log".to_string()),
            exclude: Some("old".to_string()),
            ..Default::default()
        };
        let f = filter(&config, 2_000_000);

        assert!(f.matches(&entry("fresh.log", EntryKind::Regular)));
        assert!(!f.matches(&entry("old.log", EntryKind::Regular)));
    }

    #[test]
    fn type_filter_skips_directories() {
        let config = ScanConfig {
            type_filter: Some(FileCategory::Image),
            ..Default::default()
        };
        let f = filter(&config, 2_000_000);

        assert!(f.matches(&entry("photo.png", EntryKind::Regular)));
        assert!(!f.matches(&entry("notes.txt", EntryKind::Regular)));
        // Directories always pass the type check.
        assert!(f.matches(&entry("textures", EntryKind::Directory)));
    }

    #[test]
    fn age_cutoff_excludes_old_files() {
        let now = 1_000_000_000;
        let config = ScanConfig {
            max_age_days: Some(7),
            ..Default::default()
        };
        let f = filter(&config, now);

        let mut ten_days_old = entry("stale.txt", EntryKind::Regular);
        ten_days_old.changed = now - 10 * 86400;
        assert!(!f.matches(&ten_days_old));

        let mut three_days_old = entry("fresh.txt", EntryKind::Regular);
        three_days_old.changed = now - 3 * 86400;
        assert!(f.matches(&three_days_old));

        // Exactly at the limit: 7 whole days old is still allowed.
        let mut boundary = entry("boundary.txt", EntryKind::Regular);
        boundary.changed = now - 7 * 86400;
        assert!(f.matches(&boundary));
    }

    #[test]
    fn age_cutoff_ignores_symlinks_and_directories() {
        let now = 1_000_000_000;
        let config = ScanConfig {
            max_age_days: Some(1),
            ..Default::default()
        };
        let f = filter(&config, now);

        let mut old_link = entry("stale-link", EntryKind::Regular);
        old_link.is_symlink = true;
        old_link.changed = now - 100 * 86400;
        assert!(f.matches(&old_link));

        let mut old_dir = entry("stale-dir", EntryKind::Directory);
        old_dir.changed = now - 100 * 86400;
        assert!(f.matches(&old_dir));
    }

    #[test]
    fn rule_order_hidden_before_patterns() {
        // Hidden exclusion applies even when the include pattern matches.
        let config = ScanConfig {
            skip_hidden: true,
            include: Some("config".to_string()),
            ..Default::default()
        };
        let f = filter(&config, 2_000_000);
        assert!(!f.matches(&entry("a/.git/config", EntryKind::Regular)));
    }
}
