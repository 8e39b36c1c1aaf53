//! Blob identifiers and handles
//!
//! Everything stored in the repository is a blob addressed by the digest of
//! its contents. A handle pairs the digest with the blob kind, since data
//! and tree blobs live in separate index namespaces.

use anyhow::{Result, bail};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A 256-bit content-addressed blob identifier
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlobId([u8; 32]);

impl BlobId {
    /// Length of the raw digest in bytes
    pub const LEN: usize = 32;

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a 64-character hex digest
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != Self::LEN * 2 {
            bail!("invalid blob id length: expected 64 hex characters, got {}", s.len());
        }
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Abbreviated hex form for logs and diagnostics
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for BlobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlobId({})", self.short())
    }
}

/// Whether a blob stores file content or a directory listing
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlobType {
    Data,
    Tree,
}

impl fmt::Display for BlobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobType::Data => write!(f, "data"),
            BlobType::Tree => write!(f, "tree"),
        }
    }
}

/// Unique key for a stored blob: identifier plus kind
///
/// Two handles are equal only when both the id and the kind match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BlobHandle {
    pub id: BlobId,
    pub blob_type: BlobType,
}

impl BlobHandle {
    pub fn new(id: BlobId, blob_type: BlobType) -> Self {
        Self { id, blob_type }
    }

    pub fn data(id: BlobId) -> Self {
        Self::new(id, BlobType::Data)
    }

    pub fn tree(id: BlobId) -> Self {
        Self::new(id, BlobType::Tree)
    }
}

impl fmt::Display for BlobHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}/{}>", self.blob_type, self.id.short())
    }
}

/// Set of blob handles
///
/// Used both as the visited-tree guard during a walk and as the full
/// referenced-blob set when sizing a snapshot. Only membership matters;
/// nothing may depend on iteration order.
pub type BlobSet = FxHashSet<BlobHandle>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let id = BlobId::from_bytes([0xab; 32]);
        let hex = id.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(BlobId::from_hex(&hex).unwrap(), id);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(BlobId::from_hex("abcd").is_err());
        assert!(BlobId::from_hex(&"z".repeat(64)).is_err());
    }

    #[test]
    fn test_handle_equality_includes_kind() {
        let id = BlobId::from_bytes([1; 32]);
        assert_ne!(BlobHandle::data(id), BlobHandle::tree(id));
        assert_eq!(BlobHandle::data(id), BlobHandle::data(id));
    }

    #[test]
    fn test_blob_set_membership() {
        let id = BlobId::from_bytes([2; 32]);
        let mut set = BlobSet::default();
        assert!(set.insert(BlobHandle::tree(id)));
        assert!(!set.insert(BlobHandle::tree(id)));
        assert!(set.insert(BlobHandle::data(id)));
        assert_eq!(set.len(), 2);
    }
}
