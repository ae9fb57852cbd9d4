use alloy_primitives::{Address, I256, U256};
use serde::{Deserialize, Serialize};

use crate::{chain::ChainId, deposit::Deposit, fixed_point::SignedFixedPoint};

/// The nine on-chain fields of a [`Deposit`] needed to complete a slow
/// relay, i.e. the on-chain `RelayData` struct. Off-chain indexing metadata
/// (`quote_timestamp`, `origin_block`) is deliberately not part of this
/// leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlowRelayLeaf {
    pub deposit_id:          u32,
    pub origin_chain_id:     ChainId,
    pub destination_chain_id: ChainId,
    pub depositor:           Address,
    pub recipient:           Address,
    pub destination_token:  Address,
    pub amount:              U256,
    pub relayer_fee_pct:     SignedFixedPoint,
    pub realized_lp_fee_pct: SignedFixedPoint
}

impl From<&Deposit> for SlowRelayLeaf {
    fn from(deposit: &Deposit) -> Self {
        Self {
            deposit_id: deposit.deposit_id,
            origin_chain_id: deposit.origin_chain_id,
            destination_chain_id: deposit.destination_chain_id,
            depositor: deposit.depositor,
            recipient: deposit.recipient,
            destination_token: deposit.destination_token,
            amount: deposit.amount,
            relayer_fee_pct: deposit.relayer_fee_pct,
            realized_lp_fee_pct: deposit.realized_lp_fee_pct
        }
    }
}

/// One leaf of the Pool Rebalance Root. All four inner vectors are
/// index-aligned: `l1_tokens[i]` corresponds to `bundle_lp_fees[i]`,
/// `net_send_amounts[i]`, and `running_balances[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRebalanceLeaf {
    pub chain_id:          ChainId,
    pub group_index:       u32,
    pub bundle_lp_fees:    Vec<U256>,
    pub net_send_amounts:  Vec<I256>,
    pub running_balances:  Vec<I256>,
    pub l1_tokens:         Vec<Address>,
    pub leaf_id:           u32
}

/// Transient construction form of a Relayer Refund leaf: carries
/// `group_index`, the chunk-start offset within its `(chainId, l2Token)`
/// group, used only to order sub-leaves before `leaf_id` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayerRefundLeafConstruction {
    pub chain_id:          ChainId,
    pub l2_token_address:  Address,
    pub amount_to_return:  U256,
    pub refund_addresses:  Vec<Address>,
    pub refund_amounts:    Vec<U256>,
    pub group_index:       u32
}

/// The final Relayer Refund leaf, with `group_index` discarded and `leaf_id`
/// assigned in the C3 Phase C traversal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayerRefundLeaf {
    pub chain_id:          ChainId,
    pub l2_token_address:  Address,
    pub amount_to_return:  U256,
    pub refund_addresses:  Vec<Address>,
    pub refund_amounts:    Vec<U256>,
    pub leaf_id:           u32
}

impl RelayerRefundLeafConstruction {
    pub fn into_final(self, leaf_id: u32) -> RelayerRefundLeaf {
        RelayerRefundLeaf {
            chain_id: self.chain_id,
            l2_token_address: self.l2_token_address,
            amount_to_return: self.amount_to_return,
            refund_addresses: self.refund_addresses,
            refund_amounts: self.refund_amounts,
            leaf_id
        }
    }
}
