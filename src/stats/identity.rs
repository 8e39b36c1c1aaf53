//! Content identity for duplicate-file detection
//!
//! Two files restore to identical bytes exactly when their ordered content
//! blob sequences match, so hashing that sequence gives a dedup key without
//! re-reading any file data.

use sha2::{Digest, Sha256};
use std::fmt;

use crate::model::Node;

/// 256-bit digest distinguishing files by content
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FileId([u8; 32]);

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", hex::encode(&self.0[..4]))
    }
}

/// Hash of the node's content blob ids in sequence.
///
/// Nodes with no content blobs (directories, empty files) hash the empty
/// byte sequence and so dedup against each other like any other identity.
pub fn content_id(node: &Node) -> FileId {
    let mut hasher = Sha256::new();
    for blob in &node.content {
        hasher.update(blob.as_bytes());
    }
    FileId(hasher.finalize().into())
}
