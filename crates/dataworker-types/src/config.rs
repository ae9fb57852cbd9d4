use std::collections::HashMap;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::chain::ChainId;

/// The Dataworker's single immutable configuration record. The Dataworker
/// borrows this for the duration of a cycle; it owns no other long-lived
/// state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataworkerConfig {
    /// Fixed evaluation order for chains. Every block-range vector, running
    /// balance map, and leaf set is built and compared against this order.
    pub chain_ids: Vec<ChainId>,

    /// Overrides `ConfigStoreClient::get_max_refund_count_for_relayer_refund_leaf_for_block`
    /// when set.
    pub max_refund_count_override: Option<u32>,

    /// Overrides `ConfigStoreClient::get_token_transfer_threshold_for_block`'s
    /// max-L1-token-count companion value when set.
    pub max_l1_token_count_override: Option<u32>,

    /// Per-L1-token transfer threshold overrides.
    pub transfer_threshold_overrides: HashMap<Address, U256>,

    /// Per-chain end-block buffer used by the validation controller's
    /// defer-vs-dispute check. Chains absent from this map default to 0.
    pub end_block_buffers: HashMap<ChainId, u64>
}

impl DataworkerConfig {
    pub fn new(chain_ids: Vec<ChainId>) -> Self {
        Self {
            chain_ids,
            max_refund_count_override: None,
            max_l1_token_count_override: None,
            transfer_threshold_overrides: HashMap::new(),
            end_block_buffers: HashMap::new()
        }
    }

    pub fn end_block_buffer(&self, chain_id: ChainId) -> u64 {
        self.end_block_buffers.get(&chain_id).copied().unwrap_or(0)
    }

    pub fn chain_index(&self, chain_id: ChainId) -> Option<usize> {
        self.chain_ids.iter().position(|c| *c == chain_id)
    }
}
