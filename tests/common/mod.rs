// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use snapstat::model::{BlobId, Node, Snapshot, SnapshotId, Tree};
use snapstat::repository::MemoryRepository;

/// Deterministic blob id from a single byte label
pub fn bid(b: u8) -> BlobId {
    BlobId::from_bytes([b; 32])
}

/// Deterministic snapshot id from a single byte label
pub fn sid(b: u8) -> SnapshotId {
    SnapshotId::from_bytes([b; 32])
}

/// Snapshot with fixed metadata and the given root tree
pub fn snapshot(id: u8, time: i64, tree: Option<BlobId>) -> Snapshot {
    Snapshot {
        id: sid(id),
        time,
        hostname: "testhost".to_string(),
        paths: vec!["/data".to_string()],
        tags: vec![],
        tree,
    }
}

/// Root tree id used by `hard_link_repo`
pub const HARD_LINK_ROOT: u8 = 0xAA;

/// Stored size registered for the root tree blob in `hard_link_repo`
pub const HARD_LINK_TREE_SIZE: u64 = 20;

/// Repository with one snapshot holding three files in the root tree:
///
/// - fileA: content [b1, b2], size 100, inode 10
/// - fileB: hard link to fileA (same inode, same content)
/// - fileC: content [b3], size 50, inode 20
///
/// Data blob stored sizes: b1=40, b2=60, b3=50.
pub fn hard_link_repo() -> MemoryRepository {
    let mut repo = MemoryRepository::new();
    repo.add_data_blob(bid(0xB1), 40);
    repo.add_data_blob(bid(0xB2), 60);
    repo.add_data_blob(bid(0xB3), 50);

    let root = Tree::new(vec![
        Node::file("fileA", 100, 10, vec![bid(0xB1), bid(0xB2)]),
        Node::file("fileB", 100, 10, vec![bid(0xB1), bid(0xB2)]),
        Node::file("fileC", 50, 20, vec![bid(0xB3)]),
    ]);
    repo.add_tree(bid(HARD_LINK_ROOT), root, HARD_LINK_TREE_SIZE);
    repo.add_snapshot(snapshot(1, 1_700_000_000, Some(bid(HARD_LINK_ROOT))));
    repo
}
