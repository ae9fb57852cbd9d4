use std::collections::HashMap;

use dataworker_clients::{ConfigStoreClient, HubPoolClient, SpokePoolClient};
use dataworker_types::{
    BlockRange, ChainId, Deposit, DepositKey, DepositWithBlock, FillWithBlock, FillsToRefund,
    UnfilledDeposit
};
use tracing::info;

use crate::error::DataworkerError;

/// Output of the bundle data loader (C1).
pub struct LoadedBundleData {
    pub fills_to_refund:  FillsToRefund,
    pub unfilled_deposits: Vec<UnfilledDeposit>,
    pub all_valid_fills:  Vec<FillWithBlock>,
    pub deposits:         Vec<DepositWithBlock>,
    /// Slow-fill-excess correction candidates:
    /// `(destinationChainId, l1TokenCounterpart, excessAmount)` for every
    /// deposit whose first-ever fill was a normal (non-slow) relay but which
    /// was later also slow-filled — the slow-dispatched liquidity is excess
    /// that C4 must subtract from the running balance.
    pub slow_fill_excess: Vec<(ChainId, alloy_primitives::Address, alloy_primitives::U256)>
}

/// Per-deposit accumulator tracked while scanning fills for its origin chain.
#[derive(Default)]
struct UnfilledAccumulator {
    max_total_filled:       alloy_primitives::U256,
    has_first_fill_in_range: bool,
    seen_any_fill:          bool,
    /// Whether the chronologically-first fill observed for this deposit was
    /// a normal (non-slow) relay.
    first_fill_is_slow:     Option<bool>,
    /// `fill_amount` of the first slow-relay fill observed for this
    /// deposit, if any.
    slow_fill_amount:       Option<alloy_primitives::U256>
}

/// Walks every ordered `(origin, destination)` chain pair and produces the
/// refund-credit map, the unfilled-deposit list, and the flat fill/deposit
/// lists the root builders consume.
///
/// `spoke_pool_clients` and `ranges` are indexed in the same order as
/// `config.chain_ids`.
pub async fn load_bundle_data<H, C, S>(
    config: &dataworker_types::DataworkerConfig,
    hub_pool: &H,
    config_store: &C,
    spoke_pool_clients: &HashMap<ChainId, S>,
    ranges: &[BlockRange],
    mainnet_block: u64
) -> Result<LoadedBundleData, DataworkerError>
where
    H: HubPoolClient,
    C: ConfigStoreClient,
    S: SpokePoolClient
{
    if !hub_pool.is_updated() {
        return Err(DataworkerError::Precondition("HubPool client is not updated".into()));
    }
    if !config_store.is_updated() {
        return Err(DataworkerError::Precondition("ConfigStore client is not updated".into()));
    }
    if ranges.len() != config.chain_ids.len() {
        return Err(DataworkerError::BlockRangeLengthMismatch {
            expected: config.chain_ids.len(),
            actual:   ranges.len()
        });
    }
    for chain_id in &config.chain_ids {
        let client = spoke_pool_clients
            .get(chain_id)
            .ok_or_else(|| DataworkerError::Precondition(format!("no SpokePool client configured for chain {chain_id}")))?;
        if !client.is_updated() {
            return Err(DataworkerError::ClientNotUpdated { chain_id: *chain_id });
        }
    }

    let mut fills_to_refund = FillsToRefund::new();
    let mut deposits: Vec<DepositWithBlock> = Vec::new();
    let mut seen_deposit_keys: std::collections::HashSet<DepositKey> = std::collections::HashSet::new();
    let mut all_valid_fills: Vec<FillWithBlock> = Vec::new();
    let mut unfilled_for_origin: HashMap<DepositKey, UnfilledAccumulator> = HashMap::new();
    let mut deposit_by_key: HashMap<DepositKey, Deposit> = HashMap::new();

    for (origin_idx, origin_chain_id) in config.chain_ids.iter().copied().enumerate() {
        let origin_range = ranges[origin_idx];
        let origin_client = spoke_pool_clients.get(&origin_chain_id).expect("checked above");

        for (dest_idx, destination_chain_id) in config.chain_ids.iter().copied().enumerate() {
            if origin_chain_id == destination_chain_id {
                continue;
            }
            let destination_range = ranges[dest_idx];
            let destination_client = spoke_pool_clients.get(&destination_chain_id).expect("checked above");

            // Step 1: in-range deposits from origin -> destination, deduped
            // by (originChainId, depositId), earliest-indexed occurrence wins.
            let origin_deposits = origin_client
                .get_deposits_in_range(origin_range.start, origin_range.end)
                .await?;
            for deposit in origin_deposits {
                if deposit.destination_chain_id != destination_chain_id {
                    continue;
                }
                let key = deposit.key();
                if seen_deposit_keys.insert(key) {
                    deposit_by_key.insert(key, deposit.clone());
                    deposits.push(deposit);
                }
            }

            // Step 2: every fill the destination client has recorded whose
            // originChainId is this origin chain.
            let fills = destination_client.get_fills_with_block_for_origin_chain(origin_chain_id).await?;

            for fill in fills {
                let matched_deposit = origin_client.get_deposit_for_fill(&fill).await?;
                let Some(matched_deposit) = matched_deposit else {
                    info!(
                        origin_chain_id = origin_chain_id.as_u64(),
                        destination_chain_id = destination_chain_id.as_u64(),
                        deposit_id = fill.deposit_id,
                        "invalid fill: no matching deposit"
                    );
                    continue;
                };
                let key = matched_deposit.key();
                deposit_by_key.entry(key).or_insert_with(|| matched_deposit.clone());

                all_valid_fills.push(fill.clone());

                let in_range = destination_range.contains(fill.block_number());

                // Track the deposit's overall fill progress (and whether its
                // first-ever fill landed in range) from every valid fill,
                // not just in-range ones, so `unfilled_amount` reflects the
                // true remainder regardless of which fill happened to land
                // in this bundle's block range.
                let acc = unfilled_for_origin.entry(key).or_default();
                if !acc.seen_any_fill {
                    acc.has_first_fill_in_range = in_range;
                    acc.first_fill_is_slow = Some(fill.is_slow_relay);
                }
                acc.seen_any_fill = true;
                if fill.total_filled_amount > acc.max_total_filled {
                    acc.max_total_filled = fill.total_filled_amount;
                }
                if fill.is_slow_relay && acc.slow_fill_amount.is_none() {
                    acc.slow_fill_amount = Some(fill.fill_amount);
                }

                if !in_range {
                    continue;
                }

                let (chain_to_send_refund_to, repayment_token) = if fill.is_slow_relay {
                    let token = hub_pool
                        .get_destination_token_for_l1_token_destination_chain_id(
                            hub_pool
                                .get_l1_token_counterpart_at_block(destination_chain_id, fill.destination_token, mainnet_block)
                                .await?,
                            destination_chain_id
                        )
                        .await?;
                    (destination_chain_id, token)
                } else {
                    let l1_token = hub_pool
                        .get_l1_token_counterpart_at_block(destination_chain_id, fill.destination_token, mainnet_block)
                        .await?;
                    let token = hub_pool
                        .get_destination_token_for_l1_token_destination_chain_id(l1_token, fill.repayment_chain_id)
                        .await?;
                    (fill.repayment_chain_id, token)
                };

                let lp_fee = fill.realized_lp_fee_pct.checked_mul_amount(fill.fill_amount).map_err(|e| {
                    DataworkerError::DataAnomaly(format!("fixed-point overflow computing lp fee for deposit {key:?}: {e}"))
                })?;

                fills_to_refund
                    .bucket_mut(chain_to_send_refund_to, repayment_token)
                    .credit_fill(&fill, lp_fee);
            }
        }
    }

    let mut slow_fill_excess = Vec::new();
    for (key, acc) in &unfilled_for_origin {
        if acc.first_fill_is_slow != Some(false) {
            continue;
        }
        let Some(excess_amount) = acc.slow_fill_amount else { continue };
        let Some(deposit) = deposit_by_key.get(key) else { continue };
        let l1_token = hub_pool
            .get_l1_token_counterpart_at_block(deposit.destination_chain_id, deposit.destination_token, mainnet_block)
            .await?;
        slow_fill_excess.push((deposit.destination_chain_id, l1_token, excess_amount));
    }

    let unfilled_deposits = unfilled_for_origin
        .into_iter()
        .filter_map(|(key, acc)| {
            let deposit = deposit_by_key.get(&key)?;
            let unfilled_amount = deposit.amount.checked_sub(acc.max_total_filled)?;
            if unfilled_amount.is_zero() {
                return None;
            }
            Some(UnfilledDeposit {
                deposit: deposit.clone(),
                unfilled_amount,
                has_first_fill_in_range: acc.has_first_fill_in_range
            })
        })
        .collect();

    Ok(LoadedBundleData { fills_to_refund, unfilled_deposits, all_valid_fills, deposits, slow_fill_excess })
}
