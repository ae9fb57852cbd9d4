use std::collections::HashMap;

use alloy_primitives::{Address, I256, U256};
use dataworker_clients::{ConfigStoreClient, HubPoolClient};
use dataworker_merkle::{build_relayer_refund_tree, MerkleTree};
use dataworker_types::{ChainId, FillsToRefund, PoolRebalanceLeaf, RelayerRefundLeaf, RelayerRefundLeafConstruction};
use dataworker_utils::strict_compare;

use crate::error::DataworkerError;

/// Output of the Relayer Refund Root Builder (C3).
pub struct RelayerRefundRoot {
    pub leaves: Vec<RelayerRefundLeaf>,
    pub tree:   MerkleTree
}

/// Builds the Relayer Refund Root. Requires C4's final pool-rebalance
/// leaves: C3 depends on C4's output, so the two run sequentially rather
/// than concurrently.
pub async fn build_relayer_refund_root<H, C>(
    config: &dataworker_types::DataworkerConfig,
    hub_pool: &H,
    config_store: &C,
    fills_to_refund: &FillsToRefund,
    pool_rebalance_leaves: &[PoolRebalanceLeaf],
    mainnet_block: u64
) -> Result<RelayerRefundRoot, DataworkerError>
where
    H: HubPoolClient,
    C: ConfigStoreClient
{
    let max_refund_count = match config.max_refund_count_override {
        Some(count) => count,
        None => config_store.get_max_refund_count_for_relayer_refund_leaf_for_block(mainnet_block).await?
    }
    .max(1) as usize;

    // The thresholded net-send amount per `(chainId, l1Token)`, as emitted
    // by C4's pool-rebalance leaves. This is distinct from the running
    // balance C4 carries forward past the threshold — `amountToReturn` must
    // track the former, not the latter.
    let mut net_send_amounts: HashMap<(ChainId, Address), I256> = HashMap::new();
    for leaf in pool_rebalance_leaves {
        for (idx, l1_token) in leaf.l1_tokens.iter().enumerate() {
            net_send_amounts.insert((leaf.chain_id, *l1_token), leaf.net_send_amounts[idx]);
        }
    }

    let mut constructions: Vec<RelayerRefundLeafConstruction> = Vec::new();
    let mut seen_groups: std::collections::HashSet<(ChainId, Address)> = std::collections::HashSet::new();

    // Phase A: refund groups.
    for (chain_id, l2_token, bucket) in fills_to_refund.groups() {
        seen_groups.insert((chain_id, l2_token));

        let mut recipients: Vec<(Address, U256)> = bucket.refunds.iter().map(|(a, v)| (*a, *v)).collect();
        recipients.sort_by(|a, b| match b.1.cmp(&a.1) {
            std::cmp::Ordering::Equal => strict_compare(&a.0, &b.0),
            ord => ord
        });

        let l1_token = hub_pool.get_l1_token_counterpart_at_block(chain_id, l2_token, mainnet_block).await?;
        let net_send_amount = net_send_amounts.get(&(chain_id, l1_token)).copied().unwrap_or(I256::ZERO);
        let amount_to_return = if net_send_amount.is_negative() { net_send_amount.unsigned_abs() } else { U256::ZERO };

        for (group_index, chunk) in recipients.chunks(max_refund_count).enumerate() {
            let (refund_addresses, refund_amounts): (Vec<_>, Vec<_>) = chunk.iter().cloned().unzip();
            constructions.push(RelayerRefundLeafConstruction {
                chain_id,
                l2_token_address: l2_token,
                amount_to_return: if group_index == 0 { amount_to_return } else { U256::ZERO },
                refund_addresses,
                refund_amounts,
                group_index: (group_index * max_refund_count) as u32
            });
        }
    }

    // Phase B: return-only leaves for negative net-send amounts with no
    // refund recipients in this bundle.
    for leaf in pool_rebalance_leaves {
        for (idx, net_send_amount) in leaf.net_send_amounts.iter().enumerate() {
            if !net_send_amount.is_negative() {
                continue;
            }
            let l1_token = leaf.l1_tokens[idx];
            let l2_token = hub_pool
                .get_destination_token_for_l1_token_destination_chain_id(l1_token, leaf.chain_id)
                .await?;
            if seen_groups.contains(&(leaf.chain_id, l2_token)) {
                continue;
            }
            seen_groups.insert((leaf.chain_id, l2_token));
            constructions.push(RelayerRefundLeafConstruction {
                chain_id: leaf.chain_id,
                l2_token_address: l2_token,
                amount_to_return: net_send_amount.unsigned_abs(),
                refund_addresses: Vec::new(),
                refund_amounts: Vec::new(),
                group_index: 0
            });
        }
    }

    // Phase C: total order, then assign final leaf ids.
    constructions.sort_by(|a, b| {
        match a.chain_id.cmp(&b.chain_id) {
            std::cmp::Ordering::Equal => {}
            ord => return ord
        }
        match a.l2_token_address.cmp(&b.l2_token_address) {
            std::cmp::Ordering::Equal => {}
            ord => return ord
        }
        strict_compare(&a.group_index, &b.group_index)
    });

    let leaves: Vec<RelayerRefundLeaf> = constructions
        .into_iter()
        .enumerate()
        .map(|(leaf_id, construction)| construction.into_final(leaf_id as u32))
        .collect();

    let tree = build_relayer_refund_tree(&leaves);
    Ok(RelayerRefundRoot { leaves, tree })
}
