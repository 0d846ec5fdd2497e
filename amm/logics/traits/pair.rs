use crate::{env::Env, impls::psp22::Tokens, AccountId, Balance};
use amm_helpers::math::MathError;
use primitive_types::U256;

use super::PSP22Error;

/// Constant-product market maker holding reserves of exactly two tokens.
///
/// The low-level primitives expect the tokens to have been transferred to the
/// pair beforehand: the pair works out what it received by comparing its
/// balances against the cached reserves.
pub trait Pair {
    /// Returns address of the factory that created the pair.
    fn get_factory(&self) -> AccountId;

    /// Returns the amount of liquidity locked forever on the first deposit.
    fn get_minimum_liquidity(&self) -> u128;

    /// Returns amounts of tokens this pair holds and a timestamp.
    ///
    /// NOTE: This does not include the tokens that were transferred to the contract
    /// and not yet accounted for by `mint`, `swap` or `sync`.
    fn get_reserves(&self) -> (Balance, Balance, u32);

    /// Returns cumulative price of the first token.
    ///
    /// NOTE: Cumulative price is the sum of token price,
    /// recorded at the end of the block (in the last transaction),
    /// since the beginning of the token pair.
    fn price_0_cumulative_last(&self) -> U256;

    /// Returns cumulative price of the second token.
    fn price_1_cumulative_last(&self) -> U256;

    /// Returns the trading fee, in per-mille of the input amount.
    fn get_fee(&self) -> u8;

    /// Mints liquidity tokens `to` account.
    /// The amount minted is equivalent to the excess of contract's balance and reserves.
    fn mint(
        &mut self,
        env: &mut Env,
        tokens: &mut Tokens,
        fee_to: Option<AccountId>,
        to: AccountId,
    ) -> Result<Balance, PairError>;

    /// Burns liquidity transferred to the contract prior to calling this method.
    /// Tokens resulting from the burning of this liquidity tokens are transferred to
    /// an address controlled by `to` account.
    fn burn(
        &mut self,
        env: &mut Env,
        tokens: &mut Tokens,
        fee_to: Option<AccountId>,
        to: AccountId,
    ) -> Result<(Balance, Balance), PairError>;

    /// Requests a swap on the token pair, with the outcome amounts equal to
    /// `amount_0_out` and `amount_1_out`. Assumes enough tokens have been transferred
    /// to the contract before calling the method. Tokens are sent to address controlled
    /// by `to` account.
    fn swap(
        &mut self,
        env: &mut Env,
        tokens: &mut Tokens,
        amount_0_out: Balance,
        amount_1_out: Balance,
        to: AccountId,
    ) -> Result<(), PairError>;

    /// Skims the excess of tokens (difference between balance and reserves) and
    /// sends them to an address controlled by `to` account.
    fn skim(&mut self, env: &mut Env, tokens: &mut Tokens, to: AccountId)
        -> Result<(), PairError>;

    /// Sets the reserves of the contract to its balances providing a graceful recover
    /// in the case that a token asynchronously deflates the balance of a pair.
    fn sync(&mut self, env: &mut Env, tokens: &Tokens) -> Result<(), PairError>;

    /// Returns address of the first token.
    fn get_token_0(&self) -> AccountId;

    /// Returns address of the second token.
    fn get_token_1(&self) -> AccountId;
}

#[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode, scale_info::TypeInfo)]
pub enum PairError {
    PSP22Error(PSP22Error),
    MathError(MathError),

    InsufficientInputAmount,
    InsufficientLiquidity,
    InsufficientLiquidityBurned,
    InsufficientLiquidityMinted,
    InsufficientOutputAmount,
    InvalidTo,
    InvariantViolation,
    ReservesOverflow,
}

impl From<PSP22Error> for PairError {
    fn from(error: PSP22Error) -> Self {
        PairError::PSP22Error(error)
    }
}

impl From<MathError> for PairError {
    fn from(error: MathError) -> Self {
        PairError::MathError(error)
    }
}
