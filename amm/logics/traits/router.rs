use crate::{chain::Chain, AccountId, Balance};
use amm_helpers::math::MathError;

use super::{FactoryError, PSP22Error, PairError};

/// User-facing entry point of the exchange.
///
/// Every mutating message acts on behalf of the chain's current actor and
/// either completes fully or fails leaving the chain untouched.
pub trait Router {
    /// Returns address of the `Factory` contract for this `Router` instance.
    fn factory(&self) -> AccountId;

    /// Returns address of the wrapped native token for this `Router` instance.
    fn wnative(&self) -> AccountId;

    /// Adds liquidity to `(token_a, token_b)` pair, creating the pair if needed.
    ///
    /// Will add at least `*_min` amount of tokens and up to `*_desired`
    /// while still maintaining the constant `k` product of the pair.
    ///
    /// If successful, liquidity tokens will be minted for `to` account.
    #[allow(clippy::too_many_arguments)]
    fn add_liquidity(
        &self,
        chain: &mut Chain,
        token_a: AccountId,
        token_b: AccountId,
        amount_a_desired: Balance,
        amount_b_desired: Balance,
        amount_a_min: Balance,
        amount_b_min: Balance,
        to: AccountId,
        deadline: u64,
    ) -> Result<(Balance, Balance, Balance), RouterError>;

    /// Removes `liquidity` amount of tokens from `(token_a, token_b)`
    /// pair and transfers tokens `to` account.
    ///
    /// Fails if any of the balances is lower than respective `*_min` amount.
    ///
    /// Returns withdrawn balances of both tokens.
    #[allow(clippy::too_many_arguments)]
    fn remove_liquidity(
        &self,
        chain: &mut Chain,
        token_a: AccountId,
        token_b: AccountId,
        liquidity: Balance,
        amount_a_min: Balance,
        amount_b_min: Balance,
        to: AccountId,
        deadline: u64,
    ) -> Result<(Balance, Balance), RouterError>;

    /// Exchanges tokens along `path` tokens.
    /// Starts with `amount_in` and pair under `(path[0], path[1])` address.
    /// Fails if output amount is less than `amount_out_min`.
    /// Transfers tokens to account under `to` address.
    fn swap_exact_tokens_for_tokens(
        &self,
        chain: &mut Chain,
        amount_in: Balance,
        amount_out_min: Balance,
        path: Vec<AccountId>,
        to: AccountId,
        deadline: u64,
    ) -> Result<Vec<Balance>, RouterError>;

    /// Exchanges tokens along `path` token pairs
    /// so that at the end caller receives `amount_out`
    /// worth of tokens and pays no more than `amount_in_max`
    /// of the starting token. Fails if any of these conditions
    /// is not satisfied.
    /// Transfers tokens to account under `to` address.
    fn swap_tokens_for_exact_tokens(
        &self,
        chain: &mut Chain,
        amount_out: Balance,
        amount_in_max: Balance,
        path: Vec<AccountId>,
        to: AccountId,
        deadline: u64,
    ) -> Result<Vec<Balance>, RouterError>;

    /// Returns the amount of `B` worth `amount_a` of `A` at the pair's current price.
    fn quote(
        &self,
        amount_a: Balance,
        reserve_a: Balance,
        reserve_b: Balance,
    ) -> Result<Balance, RouterError>;

    /// Returns amounts of tokens received for `amount_in`.
    fn get_amounts_out(
        &self,
        chain: &Chain,
        amount_in: Balance,
        path: &[AccountId],
    ) -> Result<Vec<Balance>, RouterError>;

    /// Returns amounts of tokens user has to supply.
    fn get_amounts_in(
        &self,
        chain: &Chain,
        amount_out: Balance,
        path: &[AccountId],
    ) -> Result<Vec<Balance>, RouterError>;
}

#[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode, scale_info::TypeInfo)]
pub enum RouterError {
    PSP22Error(PSP22Error),
    FactoryError(FactoryError),
    PairError(PairError),
    MathError(MathError),

    Expired,
    ExcessiveInputAmount,
    IdenticalAddresses,
    InsufficientAAmount,
    InsufficientAmount,
    InsufficientBAmount,
    InsufficientLiquidity,
    InsufficientOutputAmount,
    InvalidPath,
    InvalidTo,
    PairNotFound,
    ZeroAddress,
}

macro_rules! impl_froms {
    ( $( $error:ident ),* ) => {
        $(
            impl From<$error> for RouterError {
                fn from(error: $error) -> Self {
                    RouterError::$error(error)
                }
            }
        )*
    };
}

impl_froms!(PSP22Error, FactoryError, PairError, MathError);
