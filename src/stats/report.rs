//! Final report assembly and blob-size resolution

use serde::Serialize;
use std::fmt;

use crate::model::BlobSet;
use crate::repository::BlobIndex;
use crate::util::format_size;

use super::accumulator::StatsAccumulator;
use super::error::StatsError;
use super::progress::ProgressHandle;

/// Space-usage report for one snapshot
///
/// Every field carries its own serialization key; none are shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsReport {
    /// Unique blobs (data and tree) referenced by the snapshot
    pub total_blob_count: u64,
    /// Summed stored size of those unique blobs
    pub total_blob_size: u64,
    /// File nodes encountered, duplicates included
    pub total_file_count: u64,
    /// Files distinct by content identity
    pub unique_file_count: u64,
    /// Bytes needed to materialize the snapshot, hard links sharing slots
    pub restore_size: u64,
}

impl StatsReport {
    /// Bytes saved by content-addressed storage relative to a plain
    /// per-inode restore.
    ///
    /// Returns `None` when the stored size exceeds the restore size; that
    /// points at an index or counting bug, so it is logged rather than
    /// clamped to zero.
    pub fn dedup_savings(&self) -> Option<u64> {
        match self.restore_size.checked_sub(self.total_blob_size) {
            Some(saved) => Some(saved),
            None => {
                tracing::warn!(
                    restore_size = self.restore_size,
                    total_blob_size = self.total_blob_size,
                    "blob size exceeds restore size; dedup savings undefined"
                );
                None
            }
        }
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Blob Count:  {}", self.total_blob_count)?;
        match self.dedup_savings() {
            Some(saved) => writeln!(
                f,
                "Unique Files Size: {} (deduped {})",
                format_size(self.total_blob_size),
                format_size(saved)
            )?,
            None => writeln!(f, "Unique Files Size: {}", format_size(self.total_blob_size))?,
        }
        writeln!(f, "Total Files:       {}", self.total_file_count)?;
        writeln!(f, "Unique Files:      {}", self.unique_file_count)?;
        write!(f, "Restore Size:      {}", format_size(self.restore_size))
    }
}

/// Resolve every collected handle against the index and assemble the
/// report from the accumulator's totals.
///
/// A handle missing from the index means the index and the walked tree
/// disagree; that is fatal, not a zero-size blob. Summation order over the
/// set is irrelevant.
pub fn build_report<I: BlobIndex>(
    index: &I,
    blobs: &BlobSet,
    acc: StatsAccumulator,
    progress: &dyn ProgressHandle,
) -> Result<StatsReport, StatsError> {
    let mut total_blob_count = 0u64;
    let mut total_blob_size = 0u64;

    for handle in blobs {
        let Some(size) = index.lookup_blob_size(handle.id, handle.blob_type) else {
            return Err(StatsError::BlobNotFound { handle: *handle });
        };
        total_blob_count += 1;
        total_blob_size += size;
        progress.inc(1);
    }

    Ok(StatsReport {
        total_blob_count,
        total_blob_size,
        total_file_count: acc.total_file_count(),
        unique_file_count: acc.unique_file_count(),
        restore_size: acc.restore_size(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BlobHandle, BlobId};
    use crate::repository::MemoryRepository;
    use crate::stats::progress::{NoopProgress, ProgressReporter};

    fn bid(b: u8) -> BlobId {
        BlobId::from_bytes([b; 32])
    }

    fn report(restore: u64, stored: u64) -> StatsReport {
        StatsReport {
            total_blob_count: 1,
            total_blob_size: stored,
            total_file_count: 1,
            unique_file_count: 1,
            restore_size: restore,
        }
    }

    #[test]
    fn test_build_report_sums_sizes() {
        let mut repo = MemoryRepository::new();
        repo.add_data_blob(bid(1), 40);
        repo.add_data_blob(bid(2), 60);

        let mut blobs = BlobSet::default();
        blobs.insert(BlobHandle::data(bid(1)));
        blobs.insert(BlobHandle::data(bid(2)));

        let pb = NoopProgress.start("resolve", 2);
        let report = build_report(&repo, &blobs, StatsAccumulator::new(), pb.as_ref()).unwrap();

        assert_eq!(report.total_blob_count, 2);
        assert_eq!(report.total_blob_size, 100);
    }

    #[test]
    fn test_missing_blob_is_fatal() {
        let repo = MemoryRepository::new();
        let mut blobs = BlobSet::default();
        blobs.insert(BlobHandle::data(bid(1)));

        let pb = NoopProgress.start("resolve", 1);
        let err = build_report(&repo, &blobs, StatsAccumulator::new(), pb.as_ref()).unwrap_err();

        match err {
            StatsError::BlobNotFound { handle } => assert_eq!(handle, BlobHandle::data(bid(1))),
            other => panic!("expected BlobNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_dedup_savings() {
        assert_eq!(report(150, 100).dedup_savings(), Some(50));
        assert_eq!(report(100, 100).dedup_savings(), Some(0));
        assert_eq!(report(50, 100).dedup_savings(), None);
    }

    #[test]
    fn test_serialized_keys_are_distinct() {
        let json = serde_json::to_value(report(150, 100)).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 5);
        for key in [
            "total_blob_count",
            "total_blob_size",
            "total_file_count",
            "unique_file_count",
            "restore_size",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn test_display_rows() {
        let rendered = report(150, 100).to_string();
        assert!(rendered.contains("Total Blob Count:  1"));
        assert!(rendered.contains("deduped 50 B"));
        assert!(rendered.contains("Restore Size:      150 B"));
    }
}
