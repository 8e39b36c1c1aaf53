//! Error types for snapshot stats computation

use thiserror::Error;

use crate::model::{BlobHandle, BlobId, SnapshotId};

/// Failures surfaced by a stats computation
///
/// There is no partial-result mode: any of these aborts the computation and
/// no report is returned. Retrying transient backend failures belongs to
/// the repository collaborator, not here.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The snapshot record carries no root tree reference
    #[error("snapshot {snapshot} has no root tree")]
    MissingRootTree { snapshot: SnapshotId },

    /// A fetch or visitor failure during the walk, tagged with the tree
    /// where it occurred
    #[error("walking tree {tree}: {source}")]
    Traversal {
        tree: BlobId,
        #[source]
        source: anyhow::Error,
    },

    /// A referenced blob is absent from the index after a successful walk;
    /// the index and the tree disagree
    #[error("blob {handle} not found in index")]
    BlobNotFound { handle: BlobHandle },

    /// The caller requested an abort; not a bug, unlike the variants above
    #[error("stats computation cancelled")]
    Cancelled,

    /// Failure in a snapshot store collaborator
    #[error(transparent)]
    Repo(#[from] anyhow::Error),
}

impl StatsError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, StatsError::Cancelled)
    }
}
