use crate::{env::Env, impls::psp22::Tokens, traits::PSP22Error, AccountId, Balance};

/// Transfers `value` amount of `token` held by `sender` to an account controlled by `to` address.
#[inline]
pub fn safe_transfer(
    env: &mut Env,
    tokens: &mut Tokens,
    sender: AccountId,
    token: AccountId,
    to: AccountId,
    value: Balance,
) -> Result<(), PSP22Error> {
    env.with_caller(sender, |env| tokens.transfer(env, token, to, value))
}

/// Transfers `value` amount of `token` tokens `from` account `to` address,
/// spending the allowance `from` gave to `spender`.
#[inline]
pub fn safe_transfer_from(
    env: &mut Env,
    tokens: &mut Tokens,
    spender: AccountId,
    token: AccountId,
    from: AccountId,
    to: AccountId,
    value: Balance,
) -> Result<(), PSP22Error> {
    env.with_caller(spender, |env| {
        tokens.transfer_from(env, token, from, to, value)
    })
}
