use crate::{env::Env, AccountId};

/// Factory trait for tracking all pairs within the exchange.
/// Creates new, unique instances of `Pair` per unordered token pair.
/// Contains the logic to turn on the protocol charge.
pub trait Factory {
    /// Returns address of the pair identified by `pid` id.
    fn all_pairs(&self, pid: u64) -> Option<AccountId>;

    /// Returns number of token pairs created by the factory.
    fn all_pairs_length(&self) -> u64;

    /// Returns the trading fee charged by pairs this factory creates.
    fn trading_fee(&self) -> u8;

    /// Creates an instance of the `Pair` contract for the `(token_0, token_1)` pair.
    /// Returns the address of the pair, which is the already existing one
    /// if the pair was created before.
    /// Fails if the token pair is illegal.
    fn create_pair(
        &mut self,
        env: &mut Env,
        token_0: AccountId,
        token_1: AccountId,
    ) -> Result<AccountId, FactoryError>;

    /// Sets the address for receiving protocol's share of trading fees.
    fn set_fee_to(&mut self, env: &Env, fee_to: AccountId) -> Result<(), FactoryError>;

    /// Sets the address eligible for calling `set_fee_to` method.
    fn set_fee_to_setter(&mut self, env: &Env, fee_to_setter: AccountId)
        -> Result<(), FactoryError>;

    /// Returns recipient address of the trading fees.
    fn fee_to(&self) -> Option<AccountId>;

    /// Returns account allowed to call `set_fee_to_setter`.
    fn fee_to_setter(&self) -> AccountId;

    /// Returns address of `Pair` contract instance (if any) for `(token_0, token_1)` pair.
    /// The lookup is symmetric.
    fn get_pair(&self, token_0: AccountId, token_1: AccountId) -> Option<AccountId>;
}

/// Errors that can be returned from calling `Factory`'s methods.
#[derive(Debug, Clone, PartialEq, Eq, scale::Encode, scale::Decode, scale_info::TypeInfo)]
pub enum FactoryError {
    CallerIsNotFeeSetter,
    IdenticalAddresses,
    InvalidFee,
    ZeroAddress,
}
