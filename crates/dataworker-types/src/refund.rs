use std::collections::HashMap;

use alloy_primitives::{Address, U256};

use crate::{chain::ChainId, fill::Fill};

/// Per-`(repaymentChainId, l2Token)` refund accounting.
#[derive(Debug, Clone, Default)]
pub struct RefundBucket {
    pub total_refund_amount: U256,
    pub realized_lp_fees:    U256,
    pub fills:               Vec<Fill>,
    pub refunds:             HashMap<Address, U256>
}

impl RefundBucket {
    /// Credits one fill into this bucket: adds the net refund
    /// (`fill_amount - lp_fee`) to the relayer's running refund and to the
    /// bucket total, and adds the fill's realized LP fee share to
    /// `realized_lp_fees` separately — the LP fee is retained by the pool,
    /// not paid out to the relayer.
    pub fn credit_fill(&mut self, fill: &Fill, lp_fee: U256) {
        let net_refund = fill.fill_amount.saturating_sub(lp_fee);
        self.total_refund_amount += net_refund;
        self.realized_lp_fees += lp_fee;
        *self.refunds.entry(fill.relayer).or_insert(U256::ZERO) += net_refund;
        self.fills.push(fill.clone());
    }
}

/// `repaymentChainId -> l2TokenAddress -> RefundBucket`.
///
/// Insertion order is not observable by design; every root builder that
/// walks this map imposes its own total order before hashing leaves.
#[derive(Debug, Clone, Default)]
pub struct FillsToRefund(HashMap<ChainId, HashMap<Address, RefundBucket>>);

impl FillsToRefund {
    pub fn new() -> Self {
        Self::default()
    }

    /// get-or-insert-default helper over the plain nested mapping.
    pub fn bucket_mut(&mut self, chain_id: ChainId, l2_token: Address) -> &mut RefundBucket {
        self.0.entry(chain_id).or_default().entry(l2_token).or_default()
    }

    pub fn bucket(&self, chain_id: ChainId, l2_token: Address) -> Option<&RefundBucket> {
        self.0.get(&chain_id).and_then(|by_token| by_token.get(&l2_token))
    }

    pub fn chains(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.0.keys().copied()
    }

    /// Every `(chainId, l2Token)` group currently populated, in arbitrary
    /// (hash-map) order. Root builders sort this before use.
    pub fn groups(&self) -> impl Iterator<Item = (ChainId, Address, &RefundBucket)> + '_ {
        self.0.iter().flat_map(|(chain_id, by_token)| {
            by_token.iter().map(move |(token, bucket)| (*chain_id, *token, bucket))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
