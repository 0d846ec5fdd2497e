use crate::{env::Env, AccountId, Balance};

/// Fungible token interface shared by plain tokens and liquidity shares.
///
/// Mutating messages act on behalf of `env.caller()`.
pub trait PSP22 {
    /// Returns the total token supply.
    fn total_supply(&self) -> Balance;

    /// Returns the account balance for the specified `owner`.
    ///
    /// Returns `0` if the account is non-existent.
    fn balance_of(&self, owner: AccountId) -> Balance;

    /// Returns the amount which `spender` is still allowed to withdraw from `owner`.
    fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance;

    /// Transfers `value` amount of tokens from the caller's account to account `to`.
    ///
    /// No-op if the caller and `to` is the same address or `value` is zero.
    fn transfer(&mut self, env: &mut Env, to: AccountId, value: Balance)
        -> Result<(), PSP22Error>;

    /// Transfers `value` tokens on the behalf of `from` to the account `to`,
    /// lowering the caller's allowance by `value`.
    ///
    /// An allowance of `u128::MAX` is decremented like any other.
    fn transfer_from(
        &mut self,
        env: &mut Env,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error>;

    /// Runs every check `transfer_from` would run for `spender`, without moving tokens.
    fn check_transfer_from(
        &self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error>;

    /// Sets the allowance of `spender` over the caller's tokens to `value`,
    /// overwriting any previous allowance.
    fn approve(
        &mut self,
        env: &mut Env,
        spender: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error>;

    /// Increases by `delta_value` the allowance granted to `spender` by the caller.
    fn increase_allowance(
        &mut self,
        env: &mut Env,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<(), PSP22Error>;

    /// Decreases by `delta_value` the allowance granted to `spender` by the caller.
    fn decrease_allowance(
        &mut self,
        env: &mut Env,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<(), PSP22Error>;
}

pub trait PSP22Metadata {
    fn token_name(&self) -> Option<String>;
    fn token_symbol(&self) -> Option<String>;
    fn token_decimals(&self) -> u8;
}

#[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode, scale_info::TypeInfo)]
pub enum PSP22Error {
    /// Custom error type for implementation-based errors.
    Custom(String),
    /// Returned when an account does not have enough tokens to complete the operation.
    InsufficientBalance,
    /// Returned if there is not enough allowance to complete the operation.
    InsufficientAllowance,
    /// Returned if recipient's address is zero.
    ZeroRecipientAddress,
}
