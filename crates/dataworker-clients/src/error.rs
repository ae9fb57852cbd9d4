use alloy_primitives::Address;
use dataworker_types::ChainId;
use thiserror::Error;

/// Failures surfaced by the external-collaborator client traits.
///
/// These are all "transient I/O" or "precondition" failures — the Dataworker
/// never retries them itself, it propagates them up as a fatal-for-this-cycle
/// error.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("client for chain {chain_id} is not updated")]
    NotUpdated { chain_id: ChainId },

    #[error("rpc call {method} failed for chain {chain_id}: {source}")]
    Rpc {
        chain_id: ChainId,
        method: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>
    },

    #[error("no SpokePool registered for chain {chain_id} at mainnet block {mainnet_block}")]
    SpokePoolNotFound { chain_id: ChainId, mainnet_block: u64 },

    #[error("no L1 counterpart registered for token {l2_token} on chain {chain_id} at mainnet block {mainnet_block}")]
    L1CounterpartNotFound { chain_id: ChainId, l2_token: Address, mainnet_block: u64 },

    #[error("transaction enqueue failed: {0}")]
    TransactionSubmission(String)
}
