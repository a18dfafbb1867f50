//! Interval index for stage lookups
//!
//! Intervals are held in a rust-lapper table, which keeps them sorted by
//! start. Point lookups binary-search that sorted list directly, so one
//! wide mapping never degrades the other lookups to a linear scan.

use rust_lapper::{Interval, Lapper};

/// One `destination_start source_start length` triple from an almanac stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalMapping {
    /// Value that `source_start` maps to
    pub destination_start: u64,
    /// Inclusive lower bound of the covered domain
    pub source_start: u64,
    /// Number of consecutive integers covered
    pub length: u64,
}

impl IntervalMapping {
    pub fn new(destination_start: u64, source_start: u64, length: u64) -> Self {
        Self {
            destination_start,
            source_start,
            length,
        }
    }

    /// Exclusive upper bound of the covered domain
    pub fn source_end(&self) -> u64 {
        self.source_start.saturating_add(self.length)
    }

    /// Check whether `key` falls inside `[source_start, source_start + length)`
    pub fn contains(&self, key: u64) -> bool {
        self.source_start <= key && key < self.source_end()
    }

    /// Offset-preserving translation of a covered key
    pub fn translate(&self, key: u64) -> u64 {
        self.destination_start.saturating_add(key - self.source_start)
    }
}

/// Type alias for stage intervals; the value is the destination start
pub type StageInterval = Interval<u64, u64>;

/// Sorted lookup table for one stage
///
/// Construction sorts the mappings by source start; every lookup after
/// that is a binary search plus at most one offset computation.
#[derive(Debug, Clone)]
pub struct StageTable {
    lapper: Lapper<u64, u64>,
}

impl StageTable {
    /// Build a table from mappings in input order
    pub fn new(mappings: Vec<IntervalMapping>) -> Self {
        let intervals = mappings
            .into_iter()
            .map(|m| Interval {
                start: m.source_start,
                stop: m.source_end(),
                val: m.destination_start,
            })
            .collect();

        Self {
            lapper: Lapper::new(intervals),
        }
    }

    /// A table with no mappings; every key passes through unchanged
    pub fn identity() -> Self {
        Self::new(Vec::new())
    }

    /// Map `key` through this stage
    ///
    /// Keys outside every interval are returned unchanged.
    pub fn lookup(&self, key: u64) -> u64 {
        match self.find(key) {
            Some(iv) => iv.val.saturating_add(key - iv.start),
            None => key,
        }
    }

    /// Find the mapping covering `key`, if any
    pub fn covering(&self, key: u64) -> Option<IntervalMapping> {
        self.find(key).map(to_mapping)
    }

    /// Binary search for the last interval starting at or before `key`
    ///
    /// Intervals are disjoint, so that is the only one that can contain
    /// `key`. If the input overlaps anyway, the interval with the greatest
    /// start not above `key` decides.
    fn find(&self, key: u64) -> Option<&StageInterval> {
        let intervals = &self.lapper.intervals;
        let idx = intervals.partition_point(|iv| iv.start <= key);
        intervals
            .get(idx.checked_sub(1)?)
            .filter(|iv| key < iv.stop)
    }

    /// Mappings sorted by source start
    pub fn mappings(&self) -> impl Iterator<Item = IntervalMapping> + '_ {
        self.lapper.iter().map(to_mapping)
    }

    /// Number of mappings in the table
    pub fn len(&self) -> usize {
        self.lapper.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lapper.is_empty()
    }
}

impl Default for StageTable {
    fn default() -> Self {
        Self::identity()
    }
}

impl FromIterator<IntervalMapping> for StageTable {
    fn from_iter<T: IntoIterator<Item = IntervalMapping>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

fn to_mapping(iv: &StageInterval) -> IntervalMapping {
    IntervalMapping {
        destination_start: iv.val,
        source_start: iv.start,
        length: iv.stop - iv.start,
    }
}
