use std::collections::BTreeMap;

use crate::{
    env::Env,
    traits::{PSP22Error, PSP22Metadata, PSP22},
    AccountId, Balance,
};

use super::PSP22Data;

/// A plain fungible token with metadata; the whole supply goes to the deployer.
#[derive(Debug, Clone)]
pub struct Token {
    account_id: AccountId,
    data: PSP22Data,
    name: Option<String>,
    symbol: Option<String>,
    decimals: u8,
}

impl Token {
    pub fn new(
        env: &mut Env,
        account_id: AccountId,
        total_supply: Balance,
        name: Option<String>,
        symbol: Option<String>,
        decimals: u8,
    ) -> Self {
        let (data, events) = PSP22Data::new(total_supply, env.caller());
        env.emit_psp22_events(account_id, events);
        Self {
            account_id,
            data,
            name,
            symbol,
            decimals,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }
}

impl PSP22Metadata for Token {
    fn token_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn token_symbol(&self) -> Option<String> {
        self.symbol.clone()
    }

    fn token_decimals(&self) -> u8 {
        self.decimals
    }
}

impl PSP22 for Token {
    fn total_supply(&self) -> Balance {
        self.data.total_supply()
    }

    fn balance_of(&self, owner: AccountId) -> Balance {
        self.data.balance_of(owner)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
        self.data.allowance(owner, spender)
    }

    fn transfer(
        &mut self,
        env: &mut Env,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self.data.transfer(env.caller(), to, value)?;
        env.emit_psp22_events(self.account_id, events);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        env: &mut Env,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self.data.transfer_from(env.caller(), from, to, value)?;
        env.emit_psp22_events(self.account_id, events);
        Ok(())
    }

    fn check_transfer_from(
        &self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        self.data.check_transfer_from(spender, from, to, value)
    }

    fn approve(
        &mut self,
        env: &mut Env,
        spender: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self.data.approve(env.caller(), spender, value)?;
        env.emit_psp22_events(self.account_id, events);
        Ok(())
    }

    fn increase_allowance(
        &mut self,
        env: &mut Env,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self
            .data
            .increase_allowance(env.caller(), spender, delta_value)?;
        env.emit_psp22_events(self.account_id, events);
        Ok(())
    }

    fn decrease_allowance(
        &mut self,
        env: &mut Env,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self
            .data
            .decrease_allowance(env.caller(), spender, delta_value)?;
        env.emit_psp22_events(self.account_id, events);
        Ok(())
    }
}

pub(crate) fn not_deployed() -> PSP22Error {
    PSP22Error::Custom(String::from("token is not deployed"))
}

/// Registry of every `Token` deployed on the chain.
///
/// Liquidity tokens live in their pairs, not here. Pairs and the router only
/// read balances from this registry, so a liquidity token cannot be one of
/// the two tokens of a pair.
#[derive(Debug, Default)]
pub struct Tokens {
    tokens: BTreeMap<AccountId, Token>,
}

impl Tokens {
    /// Deploys a new token owned by `env.caller()` and returns its address.
    pub fn deploy(
        &mut self,
        env: &mut Env,
        total_supply: Balance,
        name: Option<String>,
        symbol: Option<String>,
        decimals: u8,
    ) -> AccountId {
        let account_id = env.next_account_id(env.caller());
        let token = Token::new(env, account_id, total_supply, name, symbol, decimals);
        log::debug!(
            "token {:?} ({:?}) deployed with supply {}",
            account_id,
            token.token_symbol(),
            total_supply
        );
        self.tokens.insert(account_id, token);
        account_id
    }

    pub fn get(&self, token: AccountId) -> Option<&Token> {
        self.tokens.get(&token)
    }

    pub fn get_mut(&mut self, token: AccountId) -> Option<&mut Token> {
        self.tokens.get_mut(&token)
    }

    pub fn contains(&self, token: AccountId) -> bool {
        self.tokens.contains_key(&token)
    }

    /// Balance of `owner` in `token`; `0` for tokens that were never deployed,
    /// liquidity tokens included.
    pub fn balance_of(&self, token: AccountId, owner: AccountId) -> Balance {
        self.get(token)
            .map(|token| token.balance_of(owner))
            .unwrap_or_default()
    }

    /// Transfers `value` of `token` from `env.caller()` to `to`.
    pub fn transfer(
        &mut self,
        env: &mut Env,
        token: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        self.get_mut(token)
            .ok_or_else(not_deployed)?
            .transfer(env, to, value)
    }

    /// Transfers `value` of `token` from `from` to `to` on behalf of `env.caller()`.
    pub fn transfer_from(
        &mut self,
        env: &mut Env,
        token: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        self.get_mut(token)
            .ok_or_else(not_deployed)?
            .transfer_from(env, from, to, value)
    }

    pub fn check_transfer_from(
        &self,
        token: AccountId,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        self.get(token)
            .ok_or_else(not_deployed)?
            .check_transfer_from(spender, from, to, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deploy_assigns_supply_to_deployer() {
        let alice = AccountId::from([1; 32]);
        let mut env = Env::new(alice, 0);
        let mut tokens = Tokens::default();
        let usdt = tokens.deploy(&mut env, 1_000, Some("USDT".into()), Some("USDT".into()), 18);
        let token = tokens.get(usdt).unwrap();
        assert_eq!(token.total_supply(), 1_000);
        assert_eq!(token.balance_of(alice), 1_000);
        assert_eq!(token.token_decimals(), 18);
        assert_eq!(token.token_symbol(), Some("USDT".to_string()));
        assert_eq!(env.events().len(), 1);
    }

    #[test]
    fn calls_to_unknown_token_fail() {
        let alice = AccountId::from([1; 32]);
        let unknown = AccountId::from([9; 32]);
        let mut env = Env::new(alice, 0);
        let mut tokens = Tokens::default();
        assert_eq!(tokens.balance_of(unknown, alice), 0);
        assert_eq!(
            tokens.transfer(&mut env, unknown, alice, 1),
            Err(not_deployed())
        );
    }

    #[test]
    fn transfer_from_uses_env_caller_as_spender() {
        let alice = AccountId::from([1; 32]);
        let router = AccountId::from([2; 32]);
        let bob = AccountId::from([3; 32]);
        let mut env = Env::new(alice, 0);
        let mut tokens = Tokens::default();
        let token = tokens.deploy(&mut env, 1_000, None, None, 18);
        tokens.get_mut(token).unwrap().approve(&mut env, router, 100).unwrap();
        env.with_caller(router, |env| {
            tokens.transfer_from(env, token, alice, bob, 60)
        })
        .unwrap();
        assert_eq!(tokens.balance_of(token, bob), 60);
        assert_eq!(tokens.get(token).unwrap().allowance(alice, router), 40);
    }
}
