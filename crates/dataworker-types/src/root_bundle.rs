use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// Sentinel marking "no pool rebalance leaves in this bundle" on-chain.
/// A pending proposal carrying this as its `poolRebalanceRoot` is never
/// valid and triggers an automatic dispute.
pub const EMPTY_ROOT: B256 = B256::ZERO;

/// A pending root bundle proposal as read back from the HubPool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootBundle {
    pub proposer:                        Address,
    pub challenge_period_end_timestamp:  u64,
    pub bundle_evaluation_block_numbers: Vec<u64>,
    pub unclaimed_pool_rebalance_leaf_count: u32,
    pub pool_rebalance_root:             B256,
    pub relayer_refund_root:             B256,
    pub slow_relay_root:                 B256
}

impl RootBundle {
    pub fn has_empty_pool_rebalance_root(&self) -> bool {
        self.pool_rebalance_root == EMPTY_ROOT
    }
}
