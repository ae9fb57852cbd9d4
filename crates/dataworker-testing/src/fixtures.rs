use alloy_primitives::{Address, U256};
use dataworker_types::{ChainId, Deposit, DepositWithBlock, Fill, FillWithBlock, SignedFixedPoint};

/// A zero-fee deposit, defaulted so tests only have to override what they
/// care about. Plain builder functions rather than a generic
/// `Arbitrary`-derived fuzz input, since these fixtures need to satisfy
/// cross-field invariants (matching deposit/fill identities) that a derived
/// `Arbitrary` impl wouldn't respect.
pub fn deposit(origin_chain_id: u64, destination_chain_id: u64, deposit_id: u32, amount: u64, origin_block: u64) -> DepositWithBlock {
    Deposit {
        deposit_id,
        origin_chain_id: ChainId::new(origin_chain_id),
        destination_chain_id: ChainId::new(destination_chain_id),
        depositor: Address::repeat_byte(0xD1),
        recipient: Address::repeat_byte(0xD2),
        destination_token: Address::repeat_byte(0xA1),
        amount: U256::from(amount),
        relayer_fee_pct: SignedFixedPoint::ZERO,
        realized_lp_fee_pct: SignedFixedPoint::ZERO,
        quote_timestamp: 0,
        origin_block
    }
}

/// A full fill of `deposit` by `relayer`, landing at `destination_block`.
pub fn full_fill(deposit: &Deposit, relayer: Address, repayment_chain_id: u64, destination_block: u64) -> FillWithBlock {
    partial_fill(deposit, relayer, repayment_chain_id, deposit.amount, destination_block)
}

/// A fill of `deposit` for `fill_amount` (which also becomes the fill's
/// cumulative `total_filled_amount`, i.e. the deposit's only fill so far).
pub fn partial_fill(deposit: &Deposit, relayer: Address, repayment_chain_id: u64, fill_amount: U256, destination_block: u64) -> FillWithBlock {
    FillWithBlock {
        fill: Fill {
            deposit: deposit.clone(),
            fill_amount,
            total_filled_amount: fill_amount,
            repayment_chain_id: ChainId::new(repayment_chain_id),
            relayer,
            is_slow_relay: false
        },
        destination_block_number: destination_block,
        destination_tx_index: 0,
        destination_log_index: 0
    }
}

/// A slow-relay fill completing the remainder of `deposit`.
pub fn slow_fill(deposit: &Deposit, destination_block: u64) -> FillWithBlock {
    FillWithBlock {
        fill: Fill {
            deposit: deposit.clone(),
            fill_amount: deposit.amount,
            total_filled_amount: deposit.amount,
            repayment_chain_id: deposit.destination_chain_id,
            relayer: Address::ZERO,
            is_slow_relay: true
        },
        destination_block_number: destination_block,
        destination_tx_index: 0,
        destination_log_index: 0
    }
}
