//! Per-computation counters and dedup bookkeeping
//!
//! One accumulator is created per stats request, mutated by exactly one
//! walk, and consumed when the report is built. Nothing else may touch it,
//! which is why no locking appears anywhere in this module.

use rustc_hash::FxHashSet;

use crate::model::{BlobId, Node};

use super::error::StatsError;
use super::identity::{FileId, content_id};
use super::walker::{Descend, TreeVisitor};

/// Running totals for one snapshot stats computation
///
/// Files are deduplicated along two independent axes: content identity
/// answers "how much distinct data exists", inode identity answers "how
/// much space does a restore need when hard links share one slot".
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    total_file_count: u64,
    unique_file_count: u64,
    total_content_size: u64,
    restore_size: u64,
    seen_files: FxHashSet<FileId>,
    seen_inodes: FxHashSet<u64>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file node
    pub fn observe(&mut self, node: &Node) {
        self.total_file_count += 1;

        let file_id = content_id(node);
        if self.seen_files.insert(file_id) {
            self.unique_file_count += 1;
            self.total_content_size += node.size;
        }

        // Inode 0 means the source filesystem reported no inode, so such
        // nodes can never be proven hard-linked; each restores into its
        // own slot and never enters the seen set.
        if node.inode == 0 || self.seen_inodes.insert(node.inode) {
            self.restore_size += node.size;
        }
    }

    pub fn total_file_count(&self) -> u64 {
        self.total_file_count
    }

    pub fn unique_file_count(&self) -> u64 {
        self.unique_file_count
    }

    /// Total size of distinct file contents
    pub fn total_content_size(&self) -> u64 {
        self.total_content_size
    }

    /// Bytes needed to materialize the snapshot, one slot per inode
    pub fn restore_size(&self) -> u64 {
        self.restore_size
    }
}

/// Walk visitor feeding file nodes into an accumulator
///
/// Directories are traversed but not observed; only file nodes carry
/// counted sizes. Holds its dependency explicitly so exactly one walk owns
/// the accumulator for its duration.
pub struct StatsVisitor<'a> {
    acc: &'a mut StatsAccumulator,
}

impl<'a> StatsVisitor<'a> {
    pub fn new(acc: &'a mut StatsAccumulator) -> Self {
        Self { acc }
    }
}

impl TreeVisitor for StatsVisitor<'_> {
    fn visit(&mut self, _parent: BlobId, _path: &str, node: &Node) -> Result<Descend, StatsError> {
        if node.is_file() {
            self.acc.observe(node);
        }
        Ok(Descend::Into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlobId;

    fn bid(b: u8) -> BlobId {
        BlobId::from_bytes([b; 32])
    }

    #[test]
    fn test_single_file() {
        let mut acc = StatsAccumulator::new();
        acc.observe(&Node::file("a", 100, 10, vec![bid(1)]));

        assert_eq!(acc.total_file_count(), 1);
        assert_eq!(acc.unique_file_count(), 1);
        assert_eq!(acc.total_content_size(), 100);
        assert_eq!(acc.restore_size(), 100);
    }

    #[test]
    fn test_duplicate_content_distinct_inodes() {
        let mut acc = StatsAccumulator::new();
        acc.observe(&Node::file("a", 100, 10, vec![bid(1), bid(2)]));
        acc.observe(&Node::file("b", 100, 11, vec![bid(1), bid(2)]));

        // One unique file by content, two restore slots by inode
        assert_eq!(acc.total_file_count(), 2);
        assert_eq!(acc.unique_file_count(), 1);
        assert_eq!(acc.total_content_size(), 100);
        assert_eq!(acc.restore_size(), 200);
    }

    #[test]
    fn test_hard_link_counts_one_restore_slot() {
        let mut acc = StatsAccumulator::new();
        acc.observe(&Node::file("a", 100, 10, vec![bid(1)]));
        acc.observe(&Node::file("hardlink-to-a", 100, 10, vec![bid(1)]));

        assert_eq!(acc.total_file_count(), 2);
        assert_eq!(acc.unique_file_count(), 1);
        assert_eq!(acc.restore_size(), 100);
    }

    #[test]
    fn test_inode_zero_never_deduplicated() {
        let mut acc = StatsAccumulator::new();
        acc.observe(&Node::file("a", 100, 0, vec![bid(1)]));
        acc.observe(&Node::file("b", 100, 0, vec![bid(1)]));
        acc.observe(&Node::file("c", 100, 0, vec![bid(1)]));

        assert_eq!(acc.unique_file_count(), 1);
        assert_eq!(acc.restore_size(), 300);
    }

    #[test]
    fn test_counts_are_monotonic_invariant() {
        let mut acc = StatsAccumulator::new();
        for i in 0..20u8 {
            acc.observe(&Node::file("f", 10, (i % 5) as u64, vec![bid(i % 3)]));
            assert!(acc.total_file_count() >= acc.unique_file_count());
        }
    }
}
