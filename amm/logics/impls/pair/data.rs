use crate::{AccountId, Balance};
use primitive_types::U256;

#[derive(Debug, Clone)]
pub struct PairData {
    pub factory: AccountId,
    pub token_0: AccountId,
    pub token_1: AccountId,
    pub reserve_0: Balance,
    pub reserve_1: Balance,
    /// Seconds, modulo 2^32.
    pub block_timestamp_last: u32,
    pub price_0_cumulative_last: U256,
    pub price_1_cumulative_last: U256,
    /// `reserve_0 * reserve_1` right after the last liquidity event,
    /// tracked only while the protocol fee is on.
    pub k_last: Option<U256>,
    /// Per-mille of the input amount.
    pub fee: u8,
}

impl PairData {
    pub fn new(token_0: AccountId, token_1: AccountId, factory: AccountId, fee: u8) -> Self {
        Self {
            factory,
            token_0,
            token_1,
            reserve_0: 0,
            reserve_1: 0,
            block_timestamp_last: 0,
            price_0_cumulative_last: U256::zero(),
            price_1_cumulative_last: U256::zero(),
            k_last: None,
            fee,
        }
    }
}
