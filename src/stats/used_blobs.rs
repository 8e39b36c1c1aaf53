//! Referenced-blob collection
//!
//! Blob storage is counted once per unique blob across the whole snapshot,
//! never once per reference, so sizing needs the full set of reachable
//! handles rather than the per-file view the accumulator sees.

use crate::model::{BlobHandle, BlobId, BlobSet, Node};
use crate::repository::TreeSource;

use super::cancel::CancelToken;
use super::error::StatsError;
use super::walker::{Descend, TreeVisitor, walk};

/// Visitor inserting every content blob reference into the set
struct BlobCollector<'a> {
    blobs: &'a mut BlobSet,
}

impl TreeVisitor for BlobCollector<'_> {
    fn visit(&mut self, _parent: BlobId, _path: &str, node: &Node) -> Result<Descend, StatsError> {
        for blob in &node.content {
            self.blobs.insert(BlobHandle::data(*blob));
        }
        Ok(Descend::Into)
    }
}

/// Collect every blob handle reachable from `root`: each tree blob visited
/// plus every content blob referenced by a file node.
///
/// Each tree contributes exactly once regardless of how many parents share
/// it; the walker's visited set doubles as the tree-handle half of the
/// result.
pub fn collect_used_blobs<S: TreeSource>(
    source: &S,
    root: BlobId,
    cancel: &CancelToken,
) -> Result<BlobSet, StatsError> {
    let mut blobs = BlobSet::default();
    let mut visited_trees = BlobSet::default();

    let mut collector = BlobCollector { blobs: &mut blobs };
    walk(source, root, &mut visited_trees, &mut collector, cancel)?;

    blobs.extend(visited_trees);
    Ok(blobs)
}
