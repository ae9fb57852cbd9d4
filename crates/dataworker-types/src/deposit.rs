use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{chain::ChainId, fixed_point::SignedFixedPoint};

/// A user deposit recorded by a SpokePool, as read back from that chain's
/// event history.
///
/// Identity is `(origin_chain_id, deposit_id)`; the event source is assumed
/// to enforce global uniqueness of that pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposit {
    pub deposit_id:          u32,
    pub origin_chain_id:     ChainId,
    pub destination_chain_id: ChainId,
    pub depositor:           Address,
    pub recipient:           Address,
    pub destination_token:  Address,
    pub amount:              U256,
    pub relayer_fee_pct:     SignedFixedPoint,
    pub realized_lp_fee_pct: SignedFixedPoint,
    pub quote_timestamp:     u64,
    pub origin_block:        u64
}

impl Deposit {
    /// Global identity used for dedup and fill correlation.
    pub fn key(&self) -> DepositKey {
        DepositKey { origin_chain_id: self.origin_chain_id, deposit_id: self.deposit_id }
    }
}

/// `(originChainId, depositId)` — the only identity a deposit has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DepositKey {
    pub origin_chain_id: ChainId,
    pub deposit_id:      u32
}

/// Every `Deposit` in this system is read with its origin block number
/// already attached (see `Deposit::origin_block`), so `DepositWithBlock` is
/// the same shape as `Deposit`. The distinct name is kept because callers
/// use it to mean "this deposit came from a block-range-scoped query", the
/// same distinction the upstream indexer draws between `Deposit` and
/// `DepositWithBlock`. See DESIGN.md for the reasoning.
pub type DepositWithBlock = Deposit;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deposit(origin: u64, deposit_id: u32) -> Deposit {
        Deposit {
            deposit_id,
            origin_chain_id: ChainId::new(origin),
            destination_chain_id: ChainId::new(10),
            depositor: Address::ZERO,
            recipient: Address::ZERO,
            destination_token: Address::ZERO,
            amount: U256::from(1000u64),
            relayer_fee_pct: SignedFixedPoint::ZERO,
            realized_lp_fee_pct: SignedFixedPoint::ZERO,
            quote_timestamp: 0,
            origin_block: 100
        }
    }

    #[test]
    fn key_identity_is_origin_chain_and_deposit_id() {
        let d = sample_deposit(1, 7);
        assert_eq!(d.key(), DepositKey { origin_chain_id: ChainId::new(1), deposit_id: 7 });
    }
}
