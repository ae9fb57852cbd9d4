use std::{
    collections::HashMap,
    sync::Mutex
};

use alloy_primitives::{Address, B256, U256};
use async_trait::async_trait;
use dataworker_clients::{
    ChainProvider, ClientError, ConfigStoreClient, DataworkerTransaction, HubPoolClient, SpokePoolClient, TokenInfo, TransactionSink
};
use dataworker_types::{ChainId, DepositWithBlock, FillWithBlock, RootBundle};

/// In-memory [`HubPoolClient`] fixture. Every getter reads from a field set
/// up front by the test; there's no event indexing to simulate.
#[derive(Debug, Default)]
pub struct MockHubPoolClient {
    pub updated:                  bool,
    pub pending_proposal:         Mutex<Option<RootBundle>>,
    pub current_time:             u64,
    pub latest_block_number:      u64,
    pub spoke_pools:              HashMap<ChainId, Address>,
    pub destination_tokens:       HashMap<(Address, ChainId), Address>,
    pub l1_token_counterparts:    HashMap<(ChainId, Address), Address>,
    pub next_bundle_start_blocks: HashMap<ChainId, u64>,
    pub token_info:               HashMap<(ChainId, Address), TokenInfo>,
    pub enqueued_proposals:       Mutex<Vec<DataworkerTransaction>>
}

impl MockHubPoolClient {
    pub fn updated() -> Self {
        Self { updated: true, ..Default::default() }
    }

    /// Registers `l1_token <-> l2_token` as counterparts on `chain_id`, in
    /// both directions the client is asked about.
    pub fn with_token_mapping(mut self, chain_id: ChainId, l1_token: Address, l2_token: Address) -> Self {
        self.l1_token_counterparts.insert((chain_id, l2_token), l1_token);
        self.destination_tokens.insert((l1_token, chain_id), l2_token);
        self
    }

    pub fn with_spoke_pool(mut self, chain_id: ChainId, address: Address) -> Self {
        self.spoke_pools.insert(chain_id, address);
        self
    }

    pub fn with_next_bundle_start_block(mut self, chain_id: ChainId, block: u64) -> Self {
        self.next_bundle_start_blocks.insert(chain_id, block);
        self
    }

    pub fn with_pending_proposal(self, proposal: RootBundle) -> Self {
        *self.pending_proposal.lock().unwrap() = Some(proposal);
        self
    }
}

#[async_trait]
impl HubPoolClient for MockHubPoolClient {
    fn is_updated(&self) -> bool {
        self.updated
    }

    async fn has_pending_proposal(&self) -> Result<bool, ClientError> {
        Ok(self.pending_proposal.lock().unwrap().is_some())
    }

    async fn get_pending_root_bundle_proposal(&self) -> Result<Option<RootBundle>, ClientError> {
        Ok(self.pending_proposal.lock().unwrap().clone())
    }

    async fn current_time(&self) -> Result<u64, ClientError> {
        Ok(self.current_time)
    }

    async fn latest_block_number(&self) -> Result<u64, ClientError> {
        Ok(self.latest_block_number)
    }

    async fn get_spoke_pool_for_block(&self, mainnet_block: u64, chain_id: ChainId) -> Result<Address, ClientError> {
        self.spoke_pools.get(&chain_id).copied().ok_or(ClientError::SpokePoolNotFound { chain_id, mainnet_block })
    }

    async fn get_destination_token_for_l1_token_destination_chain_id(
        &self,
        l1_token: Address,
        chain_id: ChainId
    ) -> Result<Address, ClientError> {
        self.destination_tokens.get(&(l1_token, chain_id)).copied().ok_or(ClientError::L1CounterpartNotFound {
            chain_id,
            l2_token: l1_token,
            mainnet_block: 0
        })
    }

    async fn get_l1_token_counterpart_at_block(
        &self,
        chain_id: ChainId,
        l2_token: Address,
        mainnet_block: u64
    ) -> Result<Address, ClientError> {
        self.l1_token_counterparts.get(&(chain_id, l2_token)).copied().ok_or(ClientError::L1CounterpartNotFound {
            chain_id,
            l2_token,
            mainnet_block
        })
    }

    async fn get_next_bundle_start_block_number(
        &self,
        _chain_ids: &[ChainId],
        _latest_mainnet_block: u64,
        chain_id: ChainId
    ) -> Result<u64, ClientError> {
        Ok(self.next_bundle_start_blocks.get(&chain_id).copied().unwrap_or(0))
    }

    async fn get_token_info(&self, chain_id: ChainId, token: Address) -> Result<TokenInfo, ClientError> {
        self.token_info
            .get(&(chain_id, token))
            .cloned()
            .ok_or(ClientError::L1CounterpartNotFound { chain_id, l2_token: token, mainnet_block: 0 })
    }

    async fn propose_root_bundle(
        &self,
        bundle_evaluation_block_numbers: Vec<u64>,
        pool_rebalance_leaf_count: u32,
        pool_rebalance_root: B256,
        relayer_refund_root: B256,
        slow_relay_root: B256
    ) -> Result<(), ClientError> {
        self.enqueued_proposals.lock().unwrap().push(DataworkerTransaction::ProposeRootBundle {
            bundle_evaluation_block_numbers,
            pool_rebalance_leaf_count,
            pool_rebalance_root,
            relayer_refund_root,
            slow_relay_root
        });
        Ok(())
    }

    async fn dispute_root_bundle(&self, reason_markdown: String) -> Result<(), ClientError> {
        self.enqueued_proposals.lock().unwrap().push(DataworkerTransaction::DisputeRootBundle { reason_markdown });
        Ok(())
    }
}

/// In-memory [`ConfigStoreClient`] fixture.
#[derive(Debug, Clone)]
pub struct MockConfigStoreClient {
    pub updated:           bool,
    pub max_refund_count:  u32,
    pub max_l1_token_count: u32,
    pub transfer_thresholds: HashMap<Address, U256>
}

impl Default for MockConfigStoreClient {
    fn default() -> Self {
        Self { updated: true, max_refund_count: 25, max_l1_token_count: 25, transfer_thresholds: HashMap::new() }
    }
}

impl MockConfigStoreClient {
    pub fn with_transfer_threshold(mut self, l1_token: Address, threshold: U256) -> Self {
        self.transfer_thresholds.insert(l1_token, threshold);
        self
    }
}

#[async_trait]
impl ConfigStoreClient for MockConfigStoreClient {
    fn is_updated(&self) -> bool {
        self.updated
    }

    async fn get_max_refund_count_for_relayer_refund_leaf_for_block(&self, _mainnet_block: u64) -> Result<u32, ClientError> {
        Ok(self.max_refund_count)
    }

    async fn get_token_transfer_threshold_for_block(&self, l1_token: Address, _mainnet_block: u64) -> Result<U256, ClientError> {
        Ok(self.transfer_thresholds.get(&l1_token).copied().unwrap_or(U256::ZERO))
    }

    async fn get_max_l1_token_count_for_block(&self, _mainnet_block: u64) -> Result<u32, ClientError> {
        Ok(self.max_l1_token_count)
    }
}

/// In-memory [`SpokePoolClient`] fixture, fed entirely from fixtures set up
/// by the test rather than any real event backfill.
#[derive(Debug, Clone)]
pub struct MockSpokePoolClient {
    pub chain_id:           ChainId,
    pub updated:            bool,
    pub deposits:           Vec<DepositWithBlock>,
    pub fills:              Vec<FillWithBlock>,
    /// The address last passed to `update`, recorded so tests can assert
    /// the controller resolved the right canonical SpokePool address.
    pub last_update_address: Option<Address>
}

impl MockSpokePoolClient {
    pub fn new(chain_id: ChainId) -> Self {
        Self { chain_id, updated: true, deposits: Vec::new(), fills: Vec::new(), last_update_address: None }
    }

    pub fn with_deposit(mut self, deposit: DepositWithBlock) -> Self {
        self.deposits.push(deposit);
        self
    }

    pub fn with_fill(mut self, fill: FillWithBlock) -> Self {
        self.fills.push(fill);
        self
    }
}

#[async_trait]
impl SpokePoolClient for MockSpokePoolClient {
    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    fn is_updated(&self) -> bool {
        self.updated
    }

    async fn update(&mut self, spoke_pool_address: Address) -> Result<(), ClientError> {
        self.updated = true;
        self.last_update_address = Some(spoke_pool_address);
        Ok(())
    }

    async fn get_deposits_for_destination_chain(&self, origin_chain_id: ChainId) -> Result<Vec<DepositWithBlock>, ClientError> {
        Ok(self.deposits.iter().filter(|d| d.origin_chain_id == origin_chain_id).cloned().collect())
    }

    async fn get_deposits_in_range(&self, start: u64, end: u64) -> Result<Vec<DepositWithBlock>, ClientError> {
        Ok(self.deposits.iter().filter(|d| d.origin_block >= start && d.origin_block <= end).cloned().collect())
    }

    async fn get_fills_with_block_for_origin_chain(&self, origin_chain_id: ChainId) -> Result<Vec<FillWithBlock>, ClientError> {
        Ok(self.fills.iter().filter(|f| f.origin_chain_id == origin_chain_id).cloned().collect())
    }

    async fn get_deposit_for_fill(&self, fill: &FillWithBlock) -> Result<Option<DepositWithBlock>, ClientError> {
        Ok(self.deposits.iter().find(|d| d.key() == fill.deposit.key()).cloned())
    }
}

/// In-memory [`ChainProvider`] fixture: just returns a fixed block number.
#[derive(Debug, Clone, Copy)]
pub struct MockChainProvider {
    pub chain_id:         ChainId,
    pub latest_block_number: u64
}

#[async_trait]
impl ChainProvider for MockChainProvider {
    fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    async fn get_block_number(&self) -> Result<u64, ClientError> {
        Ok(self.latest_block_number)
    }
}

/// In-memory [`TransactionSink`] fixture that records every enqueued
/// transaction for test assertions.
#[derive(Debug, Default)]
pub struct MockTransactionSink {
    pub enqueued: Mutex<Vec<DataworkerTransaction>>
}

#[async_trait]
impl TransactionSink for MockTransactionSink {
    async fn enqueue(&self, tx: DataworkerTransaction) -> Result<(), ClientError> {
        self.enqueued.lock().unwrap().push(tx);
        Ok(())
    }
}
