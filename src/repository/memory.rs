//! In-memory repository for tests and benchmarks
//!
//! Implements all three collaborator contracts over plain maps, letting the
//! stats core be exercised without a real backend.

use anyhow::{Result, anyhow, bail};
use rustc_hash::FxHashMap;

use crate::model::{BlobHandle, BlobId, BlobType, Snapshot, SnapshotId, Tree};

use super::{BlobIndex, SnapshotFilter, SnapshotStore, TreeSource};

/// Map-backed repository holding trees, blob sizes and snapshots
#[derive(Debug, Default)]
pub struct MemoryRepository {
    trees: FxHashMap<BlobId, Tree>,
    blob_sizes: FxHashMap<BlobHandle, u64>,
    snapshots: Vec<Snapshot>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tree blob along with its stored size in the index
    pub fn add_tree(&mut self, id: BlobId, tree: Tree, stored_size: u64) {
        self.trees.insert(id, tree);
        self.blob_sizes.insert(BlobHandle::tree(id), stored_size);
    }

    /// Register a data blob's stored size in the index
    pub fn add_data_blob(&mut self, id: BlobId, stored_size: u64) {
        self.blob_sizes.insert(BlobHandle::data(id), stored_size);
    }

    /// Drop a blob from the index, leaving any tree references dangling
    pub fn remove_blob(&mut self, handle: BlobHandle) {
        self.blob_sizes.remove(&handle);
    }

    pub fn add_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }
}

impl BlobIndex for MemoryRepository {
    fn lookup_blob_size(&self, id: BlobId, blob_type: BlobType) -> Option<u64> {
        self.blob_sizes.get(&BlobHandle::new(id, blob_type)).copied()
    }
}

impl TreeSource for MemoryRepository {
    fn fetch_tree(&self, id: BlobId) -> Result<Tree> {
        self.trees
            .get(&id)
            .cloned()
            .ok_or_else(|| anyhow!("tree {} not present in repository", id.short()))
    }
}

impl SnapshotStore for MemoryRepository {
    async fn find_latest_snapshot(&self, filter: &SnapshotFilter) -> Result<SnapshotId> {
        let latest = self
            .snapshots
            .iter()
            .filter(|sn| matches_filter(sn, filter))
            .max_by_key(|sn| sn.time);
        match latest {
            Some(sn) => Ok(sn.id),
            None => bail!("no snapshot matches the given filter"),
        }
    }

    async fn load_snapshot(&self, id: SnapshotId) -> Result<Snapshot> {
        self.snapshots
            .iter()
            .find(|sn| sn.id == id)
            .cloned()
            .ok_or_else(|| anyhow!("snapshot {} not found", id.short()))
    }
}

fn matches_filter(sn: &Snapshot, filter: &SnapshotFilter) -> bool {
    let host_ok = filter.hosts.is_empty() || filter.hosts.contains(&sn.hostname);
    let tags_ok = filter.tags.iter().all(|t| sn.tags.contains(t));
    let paths_ok = filter.paths.iter().all(|p| sn.paths.contains(p));
    host_ok && tags_ok && paths_ok
}
