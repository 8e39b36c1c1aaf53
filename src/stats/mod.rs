//! Snapshot space-usage statistics
//!
//! Computes how much unique data a snapshot occupies, how many of its files
//! duplicate each other, and how much storage a full restore needs.
//!
//! # Architecture
//!
//! The computation is organized into layers:
//!
//! - **identity**: content-identity digests for duplicate-file detection
//! - **walker**: once-per-tree depth-first traversal over the tree DAG
//! - **used_blobs**: full referenced-blob collection for sizing
//! - **accumulator**: per-computation counters and dedup bookkeeping
//! - **report**: blob-size resolution and final report assembly
//! - **cancel** / **progress** / **error**: supporting contracts
//! - **stats**: main orchestrator (`SnapshotStats`)

mod accumulator;
mod cancel;
mod error;
mod identity;
mod progress;
mod report;
mod used_blobs;
mod walker;

pub use accumulator::{StatsAccumulator, StatsVisitor};
pub use cancel::CancelToken;
pub use error::StatsError;
pub use identity::{FileId, content_id};
pub use progress::{IndicatifProgress, NoopProgress, ProgressHandle, ProgressReporter};
pub use report::{StatsReport, build_report};
pub use used_blobs::collect_used_blobs;
pub use walker::{Descend, TreeVisitor, walk};

use std::time::Instant;

use crate::model::{BlobSet, Snapshot};
use crate::repository::{BlobIndex, SnapshotFilter, SnapshotStore, TreeSource};

/// Space-usage statistics computation for single snapshots
///
/// Holds the repository collaborators plus the progress and cancellation
/// wiring; each `compute` call owns fresh accumulator and set state, so two
/// instances may run concurrently against the same repository.
pub struct SnapshotStats<'a, R> {
    repo: &'a R,
    progress: Box<dyn ProgressReporter>,
    cancel: CancelToken,
}

impl<'a, R> SnapshotStats<'a, R>
where
    R: TreeSource + BlobIndex,
{
    pub fn new(repo: &'a R) -> Self {
        Self {
            repo,
            progress: Box::new(NoopProgress),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Token that aborts computations run by this instance
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Compute the report for an already-loaded snapshot
    pub fn compute(&self, snapshot: &Snapshot) -> Result<StatsReport, StatsError> {
        let Some(root) = snapshot.tree else {
            return Err(StatsError::MissingRootTree { snapshot: snapshot.id });
        };

        tracing::debug!(
            snapshot = %snapshot.id.short(),
            root = %root.short(),
            "computing snapshot stats"
        );

        let phase = Instant::now();
        let blobs = collect_used_blobs(self.repo, root, &self.cancel)?;
        tracing::debug!(blobs = blobs.len(), elapsed = ?phase.elapsed(), "collected used blobs");

        let phase = Instant::now();
        let mut acc = StatsAccumulator::new();
        let mut visited = BlobSet::default();
        let mut visitor = StatsVisitor::new(&mut acc);
        walk(self.repo, root, &mut visited, &mut visitor, &self.cancel)?;
        tracing::debug!(
            trees = visited.len(),
            files = acc.total_file_count(),
            elapsed = ?phase.elapsed(),
            "walked snapshot tree"
        );

        let pb = self.progress.start("Resolving blob sizes", blobs.len() as u64);
        let report = build_report(self.repo, &blobs, acc, pb.as_ref())?;
        pb.finish();

        Ok(report)
    }

    /// Find the latest snapshot matching `filter` in `store`, load it, and
    /// compute its report
    pub async fn compute_latest<S: SnapshotStore>(
        &self,
        store: &S,
        filter: &SnapshotFilter,
    ) -> Result<StatsReport, StatsError> {
        let id = store.find_latest_snapshot(filter).await?;
        let snapshot = store.load_snapshot(id).await?;
        self.compute(&snapshot)
    }
}
