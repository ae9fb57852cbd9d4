use dataworker_merkle::{build_slow_relay_tree, MerkleTree};
use dataworker_types::{SlowRelayLeaf, UnfilledDeposit};
use dataworker_utils::strict_compare;

/// Output of the Slow Relay Root Builder (C2).
pub struct SlowRelayRoot {
    pub leaves: Vec<SlowRelayLeaf>,
    pub tree:   MerkleTree
}

/// Projects every unfilled deposit into a relay-data leaf, sorts by
/// `(originChainId, depositId)` ascending, and builds the Merkle tree.
///
/// The comparator is expected to never observe a tie: `(originChainId,
/// depositId)` is globally unique, so an equal comparison here means two
/// distinct deposits collided on identity upstream — a data anomaly, not a
/// legitimate sort outcome.
pub fn build_slow_relay_root(unfilled_deposits: &[UnfilledDeposit]) -> SlowRelayRoot {
    let mut leaves: Vec<SlowRelayLeaf> = unfilled_deposits.iter().map(|u| SlowRelayLeaf::from(&u.deposit)).collect();

    leaves.sort_by(|a, b| strict_compare(&(a.origin_chain_id, a.deposit_id), &(b.origin_chain_id, b.deposit_id)));

    let tree = build_slow_relay_tree(&leaves);
    SlowRelayRoot { leaves, tree }
}
