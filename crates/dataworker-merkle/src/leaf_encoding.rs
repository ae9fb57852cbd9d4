use alloy_primitives::{keccak256, B256};
use dataworker_types::{PoolRebalanceLeaf, RelayerRefundLeaf, SlowRelayLeaf};

fn push_u256_be(buf: &mut Vec<u8>, value: alloy_primitives::U256) {
    buf.extend_from_slice(&value.to_be_bytes::<32>());
}

fn push_i256_be(buf: &mut Vec<u8>, value: alloy_primitives::I256) {
    buf.extend_from_slice(&value.to_be_bytes::<32>());
}

/// Canonical leaf encoding for a [`SlowRelayLeaf`] (its nine on-chain
/// `RelayData` fields, in struct-declaration order).
pub fn encode_slow_relay_leaf(leaf: &SlowRelayLeaf) -> B256 {
    let mut buf = Vec::with_capacity(32 * 9);
    buf.extend_from_slice(&(leaf.deposit_id as u64).to_be_bytes());
    buf.extend_from_slice(&leaf.origin_chain_id.as_u64().to_be_bytes());
    buf.extend_from_slice(&leaf.destination_chain_id.as_u64().to_be_bytes());
    buf.extend_from_slice(leaf.depositor.as_slice());
    buf.extend_from_slice(leaf.recipient.as_slice());
    buf.extend_from_slice(leaf.destination_token.as_slice());
    push_u256_be(&mut buf, leaf.amount);
    push_i256_be(&mut buf, leaf.relayer_fee_pct.0);
    push_i256_be(&mut buf, leaf.realized_lp_fee_pct.0);
    keccak256(buf)
}

/// Canonical leaf encoding for a [`RelayerRefundLeaf`].
pub fn encode_relayer_refund_leaf(leaf: &RelayerRefundLeaf) -> B256 {
    let mut buf = Vec::with_capacity(32 * 4 + leaf.refund_addresses.len() * 52);
    buf.extend_from_slice(&leaf.chain_id.as_u64().to_be_bytes());
    buf.extend_from_slice(leaf.l2_token_address.as_slice());
    push_u256_be(&mut buf, leaf.amount_to_return);
    buf.extend_from_slice(&leaf.leaf_id.to_be_bytes());
    for addr in &leaf.refund_addresses {
        buf.extend_from_slice(addr.as_slice());
    }
    for amount in &leaf.refund_amounts {
        push_u256_be(&mut buf, *amount);
    }
    keccak256(buf)
}

/// Canonical leaf encoding for a [`PoolRebalanceLeaf`].
pub fn encode_pool_rebalance_leaf(leaf: &PoolRebalanceLeaf) -> B256 {
    let mut buf = Vec::with_capacity(32 * 3 + leaf.l1_tokens.len() * 20 + leaf.net_send_amounts.len() * 64);
    buf.extend_from_slice(&leaf.chain_id.as_u64().to_be_bytes());
    buf.extend_from_slice(&leaf.group_index.to_be_bytes());
    buf.extend_from_slice(&leaf.leaf_id.to_be_bytes());
    for token in &leaf.l1_tokens {
        buf.extend_from_slice(token.as_slice());
    }
    for fee in &leaf.bundle_lp_fees {
        push_u256_be(&mut buf, *fee);
    }
    for amount in &leaf.net_send_amounts {
        push_i256_be(&mut buf, *amount);
    }
    for balance in &leaf.running_balances {
        push_i256_be(&mut buf, *balance);
    }
    keccak256(buf)
}
