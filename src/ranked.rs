//! Bounded rankings of file records.
//!
//! A `RankedList` keeps the K best records under one of four orders. The
//! insertion path is a linear scan over a small bounded vector; ties keep
//! discovery order, and once the list is full a candidate only displaces
//! the current worst entry when it is strictly better.

use std::path::PathBuf;

use serde::Serialize;

/// One counted file, frozen at discovery time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// The configured date field, unix seconds.
    pub time: i64,
}

/// Comparator for one ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    /// Size descending.
    Largest,
    /// Size ascending.
    Smallest,
    /// Time ascending.
    Oldest,
    /// Time descending.
    Newest,
}

impl RankOrder {
    /// Whether `a` strictly outranks `b`. Equal keys never outrank, which
    /// is what keeps ties in discovery order.
    fn beats(self, a: &FileRecord, b: &FileRecord) -> bool {
        match self {
            Self::Largest => a.size > b.size,
            Self::Smallest => a.size < b.size,
            Self::Oldest => a.time < b.time,
            Self::Newest => a.time > b.time,
        }
    }
}

/// Capacity-bounded list of records, always sorted by its order.
#[derive(Debug, Clone)]
pub struct RankedList {
    order: RankOrder,
    capacity: usize,
    records: Vec<FileRecord>,
}

impl RankedList {
    pub fn new(order: RankOrder, capacity: usize) -> Self {
        Self {
            order,
            capacity,
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn order(&self) -> RankOrder {
        self.order
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<FileRecord> {
        self.records
    }

    /// Offer a record to the ranking.
    ///
    /// Below capacity it is placed at its sorted position, after any
    /// equal-keyed records already present. At capacity it must strictly
    /// beat the current worst (last) record, which is then evicted.
    pub fn insert(&mut self, record: FileRecord) {
        if self.records.len() >= self.capacity {
            let replace = match self.records.last() {
                Some(worst) => self.order.beats(&record, worst),
                None => false,
            };
            if !replace {
                return;
            }
            self.records.pop();
        }

        let pos = self
            .records
            .iter()
            .position(|existing| self.order.beats(&record, existing))
            .unwrap_or(self.records.len());
        self.records.insert(pos, record);
    }
}
