use alloy_primitives::{keccak256, B256};
use dataworker_types::EMPTY_ROOT;

/// A sorted-pair keccak256 Merkle tree.
///
/// Construction and proof primitives are treated as an external
/// collaborator; this is a minimal concrete stand-in so the root builders
/// have something real to hash into. Odd nodes at a layer are carried
/// forward unchanged rather than self-paired, and sibling hashes are sorted
/// before concatenation, matching the common OpenZeppelin-style
/// `MerkleTree` construction used by EVM settlement contracts.
#[derive(Debug, Clone)]
pub struct MerkleTree {
    /// `layers[0]` is the leaf-hash layer; `layers.last()` is `[root]`
    /// (or empty if there are no leaves).
    layers: Vec<Vec<B256>>
}

fn hash_pair(a: B256, b: B256) -> B256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_slice());
    buf[32..].copy_from_slice(hi.as_slice());
    keccak256(buf)
}

impl MerkleTree {
    /// Builds a tree over already-hashed leaves, in the caller-supplied
    /// order. Root builders are responsible for sorting leaves into their
    /// required total order before calling this.
    pub fn from_leaf_hashes(leaf_hashes: Vec<B256>) -> Self {
        if leaf_hashes.is_empty() {
            return Self { layers: Vec::new() };
        }

        let mut layers = vec![leaf_hashes];
        while layers.last().unwrap().len() > 1 {
            let current = layers.last().unwrap();
            let mut next = Vec::with_capacity(current.len().div_ceil(2));
            let mut i = 0;
            while i + 1 < current.len() {
                next.push(hash_pair(current[i], current[i + 1]));
                i += 2;
            }
            if i < current.len() {
                next.push(current[i]);
            }
            layers.push(next);
        }
        Self { layers }
    }

    pub fn get_hex_root(&self) -> B256 {
        self.layers.last().and_then(|l| l.first()).copied().unwrap_or(EMPTY_ROOT)
    }

    pub fn leaf_count(&self) -> usize {
        self.layers.first().map(Vec::len).unwrap_or(0)
    }

    /// Returns the sibling-hash proof for the leaf at `index` in the
    /// original (sorted) leaf order, bottom-up.
    pub fn get_hex_proof(&self, index: usize) -> Option<Vec<B256>> {
        if self.layers.is_empty() || index >= self.layers[0].len() {
            return None;
        }
        let mut proof = Vec::new();
        let mut idx = index;
        for layer in &self.layers[..self.layers.len().saturating_sub(1)] {
            let sibling_idx = idx ^ 1;
            if let Some(sibling) = layer.get(sibling_idx) {
                proof.push(*sibling);
            }
            idx /= 2;
        }
        Some(proof)
    }
}
