use alloy_primitives::{Address, I256, U256};
use dataworker_clients::{ConfigStoreClient, HubPoolClient};
use dataworker_types::{ChainId, DepositWithBlock, FillsToRefund, PoolRebalanceLeaf, RealizedLpFees, RunningBalances};
use dataworker_merkle::{build_pool_rebalance_tree, MerkleTree};

use crate::error::DataworkerError;

/// Output of the Pool Rebalance Root Builder (C4).
///
/// `running_balances` is handed to C3 by borrow: the apparent cyclic
/// dependency between the two root builders is resolved as sequential
/// composition, C4 first.
pub struct PoolRebalanceRoot {
    pub leaves:           Vec<PoolRebalanceLeaf>,
    pub tree:             MerkleTree,
    pub running_balances: RunningBalances,
    pub realized_lp_fees: RealizedLpFees
}

fn i256_from_u256(value: U256) -> I256 {
    I256::try_from(value).expect("token amounts fit in the positive half of I256")
}

/// Builds the Pool Rebalance Root from refund credits, slow-fill-excess
/// corrections, and in-range deposit outflows.
pub async fn build_pool_rebalance_root<H, C>(
    config: &dataworker_types::DataworkerConfig,
    hub_pool: &H,
    config_store: &C,
    fills_to_refund: &FillsToRefund,
    in_range_deposits: &[DepositWithBlock],
    slow_fill_excess: &[(ChainId, Address, U256)],
    mainnet_block: u64
) -> Result<PoolRebalanceRoot, DataworkerError>
where
    H: HubPoolClient,
    C: ConfigStoreClient
{
    let mut running_balances = RunningBalances::new();
    let mut realized_lp_fees = RealizedLpFees::new();

    // Initialization: refund credits and LP fees, converted to L1 units.
    for (chain_id, l2_token, bucket) in fills_to_refund.groups() {
        let l1_token = hub_pool.get_l1_token_counterpart_at_block(chain_id, l2_token, mainnet_block).await?;
        running_balances.add(chain_id, l1_token, i256_from_u256(bucket.total_refund_amount));
        realized_lp_fees.add(chain_id, l1_token, bucket.realized_lp_fees);
    }

    // Slow-fill-excess correction.
    for (chain_id, l1_token, excess) in slow_fill_excess {
        running_balances.subtract(*chain_id, *l1_token, i256_from_u256(*excess));
    }

    // Deposit outflow, priced at the deposit's quote-timestamp block rather
    // than the bundle-end block. The data model carries only a
    // `destinationToken`, not a distinct origin-chain token address, so the
    // L1 counterpart is resolved via the destination side of the deposit
    // (the same logical asset bridges to the origin chain's L1 balance);
    // `origin_block` stands in for the quote-timestamp block since no
    // client maps a timestamp to a mainnet block number.
    for deposit in in_range_deposits {
        let l1_token = hub_pool
            .get_l1_token_counterpart_at_block(deposit.destination_chain_id, deposit.destination_token, deposit.origin_block)
            .await?;
        running_balances.subtract(deposit.origin_chain_id, l1_token, i256_from_u256(deposit.amount));
    }

    // Leaf emission: one leaf per chain-group of at most `maxL1TokenCount`
    // L1 tokens, in deterministic L1-token order.
    let max_l1_token_count = match config.max_l1_token_count_override {
        Some(count) => count,
        None => config_store.get_max_l1_token_count_for_block(mainnet_block).await?
    } as usize;

    let mut leaves = Vec::new();
    for chain_id in config.chain_ids.iter().copied() {
        let mut tokens = running_balances.tokens_for_chain(chain_id);
        if tokens.is_empty() {
            continue;
        }
        tokens.sort_by(|a, b| a.0.cmp(&b.0));

        for (group_index, chunk) in tokens.chunks(max_l1_token_count.max(1)).enumerate() {
            let mut l1_tokens = Vec::with_capacity(chunk.len());
            let mut bundle_lp_fees = Vec::with_capacity(chunk.len());
            let mut net_send_amounts = Vec::with_capacity(chunk.len());
            let mut carried_running_balances = Vec::with_capacity(chunk.len());

            for (l1_token, balance) in chunk {
                let threshold = match config.transfer_threshold_overrides.get(l1_token) {
                    Some(t) => *t,
                    None => config_store.get_token_transfer_threshold_for_block(*l1_token, mainnet_block).await?
                };

                let (net_send_amount, carried_balance) = apply_transfer_threshold(*balance, threshold);

                l1_tokens.push(*l1_token);
                bundle_lp_fees.push(realized_lp_fees.get(chain_id, *l1_token));
                net_send_amounts.push(net_send_amount);
                carried_running_balances.push(carried_balance);
                running_balances.set(chain_id, *l1_token, carried_balance);
            }

            leaves.push(PoolRebalanceLeaf {
                chain_id,
                group_index: group_index as u32,
                bundle_lp_fees,
                net_send_amounts,
                running_balances: carried_running_balances,
                l1_tokens,
                leaf_id: 0
            });
        }
    }

    for (leaf_id, leaf) in leaves.iter_mut().enumerate() {
        leaf.leaf_id = leaf_id as u32;
    }

    let tree = build_pool_rebalance_tree(&leaves);
    Ok(PoolRebalanceRoot { leaves, tree, running_balances, realized_lp_fees })
}

/// `netSendAmount = transferThreshold_policy(transferThreshold, runningBalance)`:
/// if `|balance| >= threshold`, net-send the full balance and zero the
/// carry-forward; otherwise net-send zero and carry the balance forward
/// unchanged.
fn apply_transfer_threshold(balance: I256, threshold: U256) -> (I256, I256) {
    let magnitude = balance.unsigned_abs();
    if magnitude >= threshold {
        (balance, I256::ZERO)
    } else {
        (I256::ZERO, balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_policy_sends_full_balance_when_over_threshold() {
        let balance = I256::try_from(1000).unwrap();
        let (net_send, carried) = apply_transfer_threshold(balance, U256::from(500u64));
        assert_eq!(net_send, balance);
        assert_eq!(carried, I256::ZERO);
    }

    #[test]
    fn threshold_policy_carries_balance_forward_when_under_threshold() {
        let balance = I256::try_from(10).unwrap();
        let (net_send, carried) = apply_transfer_threshold(balance, U256::from(500u64));
        assert_eq!(net_send, I256::ZERO);
        assert_eq!(carried, balance);
    }

    #[test]
    fn threshold_policy_handles_negative_balances_by_magnitude() {
        let balance = I256::try_from(-1000).unwrap();
        let (net_send, carried) = apply_transfer_threshold(balance, U256::from(500u64));
        assert_eq!(net_send, balance);
        assert_eq!(carried, I256::ZERO);
    }
}
