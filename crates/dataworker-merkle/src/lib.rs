//! Merkle tree construction for the three Dataworker roots.
//!
//! Merkle construction itself is treated as an external collaborator —
//! only the *leaf ordering* that feeds these builders is part of the
//! in-scope algorithm. This crate is the concrete stand-in needed to
//! produce an actual root and proof.

mod leaf_encoding;
mod tree;

pub use leaf_encoding::{encode_pool_rebalance_leaf, encode_relayer_refund_leaf, encode_slow_relay_leaf};
use dataworker_types::{PoolRebalanceLeaf, RelayerRefundLeaf, SlowRelayLeaf};
pub use tree::MerkleTree;

/// Builds the Slow Relay Root over leaves already sorted by the caller
/// (C2's `(originChainId, depositId)` total order).
pub fn build_slow_relay_tree(leaves: &[SlowRelayLeaf]) -> MerkleTree {
    MerkleTree::from_leaf_hashes(leaves.iter().map(encode_slow_relay_leaf).collect())
}

/// Builds the Relayer Refund Root over leaves already sorted by the caller
/// (C3 Phase C's `(chainId, l2TokenAddress, groupIndex)` total order).
pub fn build_relayer_refund_tree(leaves: &[RelayerRefundLeaf]) -> MerkleTree {
    MerkleTree::from_leaf_hashes(leaves.iter().map(encode_relayer_refund_leaf).collect())
}

/// Builds the Pool Rebalance Root over leaves already sorted by the caller
/// (C4's chain-then-L1-token emission order).
pub fn build_pool_rebalance_tree(leaves: &[PoolRebalanceLeaf]) -> MerkleTree {
    MerkleTree::from_leaf_hashes(leaves.iter().map(encode_pool_rebalance_leaf).collect())
}
