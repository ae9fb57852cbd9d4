use std::ops::Deref;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{chain::ChainId, deposit::Deposit};

/// A relayer's fill of a [`Deposit`], fully or partially.
///
/// Carries every deposit field via composition rather than field
/// duplication; `Fill` derefs to [`Deposit`] so call sites read
/// `fill.origin_chain_id` the same way they would read
/// `deposit.origin_chain_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    pub deposit:             Deposit,
    pub fill_amount:         U256,
    pub total_filled_amount: U256,
    pub repayment_chain_id:  ChainId,
    pub relayer:             Address,
    pub is_slow_relay:       bool
}

impl Deref for Fill {
    type Target = Deposit;

    fn deref(&self) -> &Deposit {
        &self.deposit
    }
}

/// A [`Fill`] as read from the destination chain's event log, with its
/// position in that chain's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillWithBlock {
    pub fill:                    Fill,
    pub destination_block_number: u64,
    pub destination_tx_index:    u64,
    pub destination_log_index:   u64
}

impl Deref for FillWithBlock {
    type Target = Fill;

    fn deref(&self) -> &Fill {
        &self.fill
    }
}

impl FillWithBlock {
    pub fn block_number(&self) -> u64 {
        self.destination_block_number
    }
}
