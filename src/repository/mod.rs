//! Repository collaborator contracts
//!
//! The stats core reads trees and blob sizes through these traits; opening,
//! authentication, decryption and pack decoding all stay behind them. The
//! blob index is assumed fully populated before a computation starts.

mod memory;

pub use memory::MemoryRepository;

use anyhow::Result;

use crate::model::{BlobId, BlobType, Snapshot, SnapshotId, Tree};

/// Size lookups against the repository blob index
pub trait BlobIndex {
    /// Stored size of a blob, or `None` when the index has no entry.
    ///
    /// "Not found" is a distinct outcome from a backend failure; an index
    /// that disagrees with a walked tree signals repository corruption.
    fn lookup_blob_size(&self, id: BlobId, blob_type: BlobType) -> Option<u64>;
}

/// Read access to tree blobs
pub trait TreeSource {
    /// Fetch the ordered node list for a tree blob.
    ///
    /// Backend failures are fatal for the walk in progress; retrying
    /// transient errors is the backend's job, not the caller's.
    fn fetch_tree(&self, id: BlobId) -> Result<Tree>;
}

/// Selection criteria for picking a snapshot; empty lists match anything
#[derive(Debug, Clone, Default)]
pub struct SnapshotFilter {
    pub hosts: Vec<String>,
    pub tags: Vec<String>,
    pub paths: Vec<String>,
}

/// Snapshot lookup and deserialization
#[allow(async_fn_in_trait)]
pub trait SnapshotStore {
    /// Find the most recent snapshot matching the filter
    async fn find_latest_snapshot(&self, filter: &SnapshotFilter) -> Result<SnapshotId>;

    /// Load a snapshot record by id
    async fn load_snapshot(&self, id: SnapshotId) -> Result<Snapshot>;
}
