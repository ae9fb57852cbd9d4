use std::collections::HashMap;

use alloy_primitives::{Address, I256, U256};

use crate::chain::ChainId;

/// `chainId -> l1Token -> signed running balance`.
///
/// Positive means the SpokePool is owed that amount from the HubPool;
/// negative means the SpokePool holds an excess that should flow back.
#[derive(Debug, Clone, Default)]
pub struct RunningBalances(HashMap<ChainId, HashMap<Address, I256>>);

impl RunningBalances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, chain_id: ChainId, l1_token: Address, delta: I256) {
        let entry = self.0.entry(chain_id).or_default().entry(l1_token).or_insert(I256::ZERO);
        *entry += delta;
    }

    pub fn subtract(&mut self, chain_id: ChainId, l1_token: Address, delta: I256) {
        self.add(chain_id, l1_token, -delta);
    }

    pub fn get(&self, chain_id: ChainId, l1_token: Address) -> I256 {
        self.0
            .get(&chain_id)
            .and_then(|by_token| by_token.get(&l1_token))
            .copied()
            .unwrap_or(I256::ZERO)
    }

    pub fn set(&mut self, chain_id: ChainId, l1_token: Address, value: I256) {
        self.0.entry(chain_id).or_default().insert(l1_token, value);
    }

    pub fn chains(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.0.keys().copied()
    }

    /// All `(l1Token, balance)` pairs tracked for one chain, in arbitrary
    /// order; C4 imposes a deterministic order before chunking.
    pub fn tokens_for_chain(&self, chain_id: ChainId) -> Vec<(Address, I256)> {
        self.0
            .get(&chain_id)
            .map(|by_token| by_token.iter().map(|(t, b)| (*t, *b)).collect())
            .unwrap_or_default()
    }
}

/// `chainId -> l1Token -> accumulated realized LP fees`, always non-negative.
#[derive(Debug, Clone, Default)]
pub struct RealizedLpFees(HashMap<ChainId, HashMap<Address, U256>>);

impl RealizedLpFees {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, chain_id: ChainId, l1_token: Address, amount: U256) {
        let entry = self.0.entry(chain_id).or_default().entry(l1_token).or_insert(U256::ZERO);
        *entry += amount;
    }

    pub fn get(&self, chain_id: ChainId, l1_token: Address) -> U256 {
        self.0
            .get(&chain_id)
            .and_then(|by_token| by_token.get(&l1_token))
            .copied()
            .unwrap_or(U256::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_subtract_commute_to_the_same_total() {
        let chain = ChainId::new(1);
        let token = Address::repeat_byte(9);

        let mut a = RunningBalances::new();
        a.add(chain, token, I256::try_from(100).unwrap());
        a.subtract(chain, token, I256::try_from(40).unwrap());
        a.add(chain, token, I256::try_from(10).unwrap());

        let mut b = RunningBalances::new();
        b.add(chain, token, I256::try_from(10).unwrap());
        b.add(chain, token, I256::try_from(100).unwrap());
        b.subtract(chain, token, I256::try_from(40).unwrap());

        assert_eq!(a.get(chain, token), b.get(chain, token));
        assert_eq!(a.get(chain, token), I256::try_from(70).unwrap());
    }
}
