use dataworker_clients::ClientError;
use dataworker_types::ChainId;
use thiserror::Error;

/// The Dataworker's error taxonomy.
///
/// Every variant here is fatal for the current cycle; there is no in-cycle
/// retry. The next cycle starts clean and re-reads all inputs from the
/// chain, so the system is idempotent across cycles regardless of which
/// variant aborted the previous one.
#[derive(Debug, Error)]
pub enum DataworkerError {
    /// A required precondition (client updated, block-range shape) did not
    /// hold. Abort the cycle.
    #[error("precondition failed: {0}")]
    Precondition(String),

    /// An upstream invariant was violated: a sort comparator observed a tie
    /// that should be structurally impossible on well-formed input
    /// (duplicate refund-recipient address, duplicate
    /// `(chainId, l2Token, groupIndex)` triple, duplicate
    /// `(originChainId, depositId)` pair).
    #[error("data anomaly: {0}")]
    DataAnomaly(String),

    /// A client call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The block-range list did not have one entry per configured chain.
    #[error("expected {expected} block ranges (one per configured chain), got {actual}")]
    BlockRangeLengthMismatch { expected: usize, actual: usize },

    /// A client for `chain_id` was required but is not updated.
    #[error("required client for chain {chain_id} is not updated")]
    ClientNotUpdated { chain_id: ChainId },

    /// Enqueuing a transaction failed. Logged at error level by the caller;
    /// this variant exists so callers can distinguish it from a build
    /// failure, but it must never crash the controller.
    #[error("transaction submission failed: {0}")]
    TransactionSubmission(String)
}
