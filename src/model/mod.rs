mod blob;
mod node;
mod snapshot;

pub use blob::{BlobHandle, BlobId, BlobSet, BlobType};
pub use node::{Node, NodeKind, Tree};
pub use snapshot::{Snapshot, SnapshotId};
