//! Single-pass directory traversal.
//!
//! The walker produces a lazy, depth-first sequence of entries under one
//! root, sorted by file name so two walks over an unchanged tree discover
//! entries in the same order. All of the `ignore` crate's standard
//! filtering (hidden files, gitignore and friends) is disabled; inclusion
//! decisions belong to `PathFilter`, not the walk.

use std::borrow::Cow;
use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use glob::Pattern;
use ignore::WalkBuilder;

use crate::category::EntryKind;
use crate::config::ScanConfig;

/// One visited filesystem entry with its lstat-derived metadata.
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: PathBuf,
    /// Object type; a symlink whose target resolves reports the target's
    /// kind, so a link to a directory has kind `Directory`.
    pub kind: EntryKind,
    /// Whether the entry itself is a symbolic link.
    pub is_symlink: bool,
    /// Size in bytes (the link's own size for symlinks).
    pub size: u64,
    /// Last access time, unix seconds.
    pub accessed: i64,
    /// Last modification time, unix seconds.
    pub modified: i64,
    /// Last status change time, unix seconds.
    pub changed: i64,
}

impl Entry {
    /// Stat a path into an entry. Returns `None` on any stat failure (the
    /// entry may have been removed mid-walk, or be unreadable) so the caller
    /// can skip it and continue.
    ///
    /// With `follow` set, symlinks are resolved and reported as their
    /// targets; otherwise the link itself is the entry.
    pub fn read(path: &Path, follow: bool) -> Option<Self> {
        let lstat = fs::symlink_metadata(path).ok()?;
        let is_symlink = lstat.file_type().is_symlink();

        if follow && is_symlink {
            let meta = fs::metadata(path).ok()?;
            return Some(Self {
                path: path.to_path_buf(),
                kind: EntryKind::from_file_type(meta.file_type()),
                is_symlink: false,
                size: meta.len(),
                accessed: meta.atime(),
                modified: meta.mtime(),
                changed: meta.ctime(),
            });
        }

        let kind = if is_symlink {
            // The kind tag reflects the target where it resolves; a broken
            // link stays a symlink.
            match fs::metadata(path) {
                Ok(meta) => EntryKind::from_file_type(meta.file_type()),
                Err(_) => EntryKind::Symlink,
            }
        } else {
            EntryKind::from_file_type(lstat.file_type())
        };

        Some(Self {
            path: path.to_path_buf(),
            kind,
            is_symlink,
            size: lstat.len(),
            accessed: lstat.atime(),
            modified: lstat.mtime(),
            changed: lstat.ctime(),
        })
    }

    /// Final path segment as text.
    pub fn file_name(&self) -> Cow<'_, str> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or(Cow::Borrowed(""))
    }
}

/// Depth-first walker over a single root.
pub struct Walker {
    root: PathBuf,
    follow_links: bool,
    ignore_patterns: Vec<String>,
}

impl Walker {
    pub fn new(root: &Path, config: &ScanConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            follow_links: config.follow_links,
            ignore_patterns: config.ignore_patterns.clone(),
        }
    }

    /// Walk the tree once, yielding entries in sorted depth-first order.
    /// Unreadable entries are skipped silently; their siblings still appear.
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(self.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));

        if !self.ignore_patterns.is_empty() {
            let patterns = self.ignore_patterns.clone();
            // Pruning here keeps ignored directories' whole subtrees out of
            // the walk, not just the directory entry itself.
            builder.filter_entry(move |de| {
                let name = de.file_name().to_string_lossy();
                !matches_any_glob(&patterns, &name)
            });
        }

        let follow = self.follow_links;
        builder
            .build()
            .filter_map(|result| result.ok())
            .filter_map(move |de| Entry::read(de.path(), follow))
    }
}

/// Glob-match a basename against each pattern; malformed patterns never
/// match.
fn matches_any_glob(patterns: &[String], name: &str) -> bool {
    patterns.iter().any(|pattern| {
        Pattern::new(pattern)
            .map(|p| p.matches(name))
            .unwrap_or(false)
    })
}
