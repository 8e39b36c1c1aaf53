//! Tree nodes: one filesystem entry per node

use serde::{Deserialize, Serialize};

use super::blob::BlobId;

/// Kind of filesystem entry a node describes
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Dir,
    Symlink,
    Other,
}

/// One entry inside a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub kind: NodeKind,
    /// Path segment (file or directory name, no separators)
    pub name: String,
    /// Declared size in bytes; meaningful for files
    pub size: u64,
    /// Ordered content blobs; empty for non-files and empty files
    pub content: Vec<BlobId>,
    /// Inode number from the backed-up filesystem; 0 means the source
    /// provided no inode metadata
    pub inode: u64,
    /// Subtree blob id; present for directories
    pub subtree: Option<BlobId>,
}

impl Node {
    /// Create a file node
    pub fn file(name: &str, size: u64, inode: u64, content: Vec<BlobId>) -> Self {
        Self {
            kind: NodeKind::File,
            name: name.to_string(),
            size,
            content,
            inode,
            subtree: None,
        }
    }

    /// Create a directory node referencing a subtree blob
    pub fn dir(name: &str, subtree: BlobId) -> Self {
        Self {
            kind: NodeKind::Dir,
            name: name.to_string(),
            size: 0,
            content: Vec::new(),
            inode: 0,
            subtree: Some(subtree),
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Dir
    }
}

/// Ordered listing of entries for one directory level
///
/// A tree is itself stored as a blob, so identical subtrees share one id
/// regardless of how many parents reference them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}
