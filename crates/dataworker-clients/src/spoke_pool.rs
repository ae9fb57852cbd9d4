use alloy_primitives::Address;
use async_trait::async_trait;
use auto_impl::auto_impl;
use dataworker_types::{ChainId, DepositWithBlock, FillWithBlock};

use crate::error::ClientError;

/// Read access to a single chain's SpokePool contract.
///
/// One instance exists per chain in the fixed evaluation order. C5/C6
/// resolve the SpokePool address that was canonical for each chain as of
/// the current mainnet block and pass it into `update`, so refunds for
/// deposits made against a since-deprecated SpokePool address are still
/// resolved correctly.
#[async_trait]
#[auto_impl(Arc)]
pub trait SpokePoolClient: Send + Sync {
    /// The chain this client indexes.
    fn chain_id(&self) -> ChainId;

    /// Whether this client has completed its initial event backfill.
    fn is_updated(&self) -> bool;

    /// Performs (or refreshes) the event backfill against `spoke_pool_address`.
    /// Idempotent.
    async fn update(&mut self, spoke_pool_address: Address) -> Result<(), ClientError>;

    /// Every deposit this client has ever observed whose destination chain
    /// is `origin_chain_id` — used by the loader to look up matching
    /// deposits for fills without bounding the search to the current block
    /// range.
    async fn get_deposits_for_destination_chain(&self, origin_chain_id: ChainId) -> Result<Vec<DepositWithBlock>, ClientError>;

    /// Deposits this client has observed originating on its own chain,
    /// restricted to `[start, end]`.
    async fn get_deposits_in_range(&self, start: u64, end: u64) -> Result<Vec<DepositWithBlock>, ClientError>;

    /// Every fill this client has observed whose `originChainId` equals
    /// `origin_chain_id`, regardless of this client's own block range.
    async fn get_fills_with_block_for_origin_chain(&self, origin_chain_id: ChainId) -> Result<Vec<FillWithBlock>, ClientError>;

    /// Resolves the deposit a fill claims to be filling, searched across
    /// this client's full history (not limited to its block range).
    async fn get_deposit_for_fill(&self, fill: &FillWithBlock) -> Result<Option<DepositWithBlock>, ClientError>;
}
