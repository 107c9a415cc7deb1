//! Time-ordered series of canonical snapshots.

use crate::errors::Result;
use crate::snapshot::canonical::CanonicalSnapshot;
use crate::snapshot::normalize::normalize;
use crate::snapshot::raw::RawSnapshot;
use crate::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Canonical snapshots sorted ascending by capture timestamp.
///
/// Built once per run. Filtering produces a new series; nothing reorders
/// an existing one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapshotSeries {
    snapshots: Vec<CanonicalSnapshot>,
}

impl SnapshotSeries {
    /// Sort snapshots by `captured_date` (lexicographic, stable).
    pub fn from_unsorted(mut snapshots: Vec<CanonicalSnapshot>) -> Self {
        snapshots.sort_by(|a, b| a.captured_date().cmp(b.captured_date()));
        Self { snapshots }
    }

    /// Normalize every raw snapshot, then sort.
    ///
    /// # Errors
    ///
    /// The first normalization error aborts the whole series.
    pub fn normalize_all(raws: &[RawSnapshot]) -> Result<Self> {
        let start = Instant::now();
        log_op_start!("normalize_series", snapshot_count = raws.len());

        let canonical = raws.iter().map(normalize).collect::<Result<Vec<_>>>();
        let duration_ms = start.elapsed().as_millis() as u64;

        match canonical {
            Ok(snapshots) => {
                log_op_end!("normalize_series", duration_ms = duration_ms);
                Ok(Self::from_unsorted(snapshots))
            }
            Err(err) => {
                log_op_error!("normalize_series", err.clone(), duration_ms = duration_ms);
                Err(err)
            }
        }
    }

    /// Keep only the snapshots the predicate accepts, preserving order.
    ///
    /// # Errors
    ///
    /// Propagates the first predicate error.
    pub fn try_filter<F>(self, mut keep: F) -> Result<Self>
    where
        F: FnMut(&CanonicalSnapshot) -> Result<bool>,
    {
        let mut kept = Vec::with_capacity(self.snapshots.len());
        for snapshot in self.snapshots {
            if keep(&snapshot)? {
                kept.push(snapshot);
            }
        }
        Ok(Self { snapshots: kept })
    }

    /// Consecutive (older, newer) pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&CanonicalSnapshot, &CanonicalSnapshot)> {
        self.snapshots.windows(2).map(|w| (&w[0], &w[1]))
    }

    pub fn first(&self) -> Option<&CanonicalSnapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&CanonicalSnapshot> {
        self.snapshots.last()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalSnapshot> {
        self.snapshots.iter()
    }
}
