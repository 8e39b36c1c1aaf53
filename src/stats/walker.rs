//! Depth-first tree walking with a shared-subtree guard
//!
//! The tree DAG may alias subtrees: identical directories collapse to one
//! tree blob referenced by many parents. The walker visits each tree blob
//! at most once, which keeps shared subtrees from being counted twice and
//! bounds traversal even if a malformed repository introduces a cycle.
//!
//! Traversal is iterative over an explicit stack, so depth is limited by
//! heap, not by the call stack.

use crate::model::{BlobHandle, BlobId, BlobSet, Node};
use crate::repository::TreeSource;

use super::cancel::CancelToken;
use super::error::StatsError;

/// Whether to continue into a directory node's subtree
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Descend {
    Into,
    Skip,
}

/// Per-node callback for tree walks
///
/// Visitors hold their own state and dependencies as fields; an error from
/// `visit` aborts the entire walk.
pub trait TreeVisitor {
    fn visit(&mut self, parent: BlobId, path: &str, node: &Node) -> Result<Descend, StatsError>;
}

/// Walk the tree DAG rooted at `root`, depth-first.
///
/// A subtree is entered only if its handle was absent from `visited`; the
/// handle is inserted before descent. Passing a shared `visited` set across
/// multiple walks extends the once-per-tree guard across all of them.
///
/// Cancellation is checked once per tree, before its fetch. The walk is
/// read-only with respect to the repository.
pub fn walk<S, V>(
    source: &S,
    root: BlobId,
    visited: &mut BlobSet,
    visitor: &mut V,
    cancel: &CancelToken,
) -> Result<(), StatsError>
where
    S: TreeSource,
    V: TreeVisitor + ?Sized,
{
    // Stack entries carry the path prefix under which the tree's nodes live
    let mut stack: Vec<(BlobId, String)> = Vec::new();
    if visited.insert(BlobHandle::tree(root)) {
        stack.push((root, String::new()));
    }

    while let Some((tree_id, prefix)) = stack.pop() {
        if cancel.is_cancelled() {
            return Err(StatsError::Cancelled);
        }

        let tree = source
            .fetch_tree(tree_id)
            .map_err(|source| StatsError::Traversal { tree: tree_id, source })?;

        for node in &tree.nodes {
            let path = join_path(&prefix, &node.name);
            let descend = visitor
                .visit(tree_id, &path, node)
                .map_err(|err| wrap_visit_error(tree_id, err))?;

            if descend == Descend::Into {
                if let Some(subtree) = node.subtree {
                    if visited.insert(BlobHandle::tree(subtree)) {
                        stack.push((subtree, path));
                    }
                }
            }
        }
    }

    Ok(())
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}

fn wrap_visit_error(tree: BlobId, err: StatsError) -> StatsError {
    // Cancellation must stay distinguishable from traversal failures
    match err {
        StatsError::Cancelled => StatsError::Cancelled,
        other => StatsError::Traversal {
            tree,
            source: anyhow::Error::new(other),
        },
    }
}
