use crate::{
    env::{Env, Event},
    impls::{
        factory::FactoryContract,
        pair::PairContract,
        psp22::{not_deployed, Tokens},
        router::RouterContract,
    },
    traits::{Factory, FactoryError, PSP22Error, Pair, PairError, PSP22},
    AccountId, Balance, Timestamp,
};

/// The whole simulated ledger: the environment, every deployed token and the
/// factory with the pairs it owns.
///
/// Calls are made by the current actor (see [`Chain::set_actor`]) and run one
/// at a time, each to completion.
#[derive(Debug)]
pub struct Chain {
    pub env: Env,
    pub tokens: Tokens,
    pub factory: FactoryContract,
}

impl Chain {
    /// A chain at timestamp 0 whose factory charges the default trading fee.
    /// `fee_to_setter` deploys the factory and is the initial actor.
    pub fn new(fee_to_setter: AccountId) -> Self {
        let mut env = Env::new(fee_to_setter, 0);
        let factory = FactoryContract::with_default_fee(&mut env, fee_to_setter);
        Self {
            env,
            tokens: Tokens::default(),
            factory,
        }
    }

    /// Like [`Chain::new`] with a custom per-mille trading fee.
    pub fn with_trading_fee(
        fee_to_setter: AccountId,
        trading_fee: u8,
    ) -> Result<Self, FactoryError> {
        let mut env = Env::new(fee_to_setter, 0);
        let factory = FactoryContract::new(&mut env, fee_to_setter, trading_fee)?;
        Ok(Self {
            env,
            tokens: Tokens::default(),
            factory,
        })
    }

    pub fn actor(&self) -> AccountId {
        self.env.caller()
    }

    /// Makes every following call on behalf of `actor`.
    pub fn set_actor(&mut self, actor: AccountId) -> &mut Self {
        self.env.set_caller(actor);
        self
    }

    /// Deploys a token whose whole supply goes to the actor.
    pub fn deploy_token(
        &mut self,
        total_supply: Balance,
        name: &str,
        symbol: &str,
        decimals: u8,
    ) -> AccountId {
        self.tokens.deploy(
            &mut self.env,
            total_supply,
            Some(name.to_string()),
            Some(symbol.to_string()),
            decimals,
        )
    }

    /// Deploys a router over this chain's factory.
    pub fn deploy_router(&mut self, wnative: AccountId) -> RouterContract {
        RouterContract::new(&mut self.env, self.factory.account_id(), wnative)
    }

    pub fn block_timestamp(&self) -> Timestamp {
        self.env.block_timestamp()
    }

    pub fn set_block_timestamp(&mut self, block_timestamp: Timestamp) {
        self.env.set_block_timestamp(block_timestamp);
    }

    pub fn advance_block_timestamp(&mut self, millis: Timestamp) {
        self.env.advance_block_timestamp(millis);
    }

    pub fn events(&self) -> &[Event] {
        self.env.events()
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        self.env.take_events()
    }

    fn psp22(&self, token: AccountId) -> Option<&dyn PSP22> {
        match self.tokens.get(token) {
            Some(token) => Some(token as &dyn PSP22),
            None => self.factory.pair(token).map(|pair| pair as &dyn PSP22),
        }
    }

    fn psp22_mut(&mut self, token: AccountId) -> Result<(&mut Env, &mut dyn PSP22), PSP22Error> {
        let Chain {
            env,
            tokens,
            factory,
        } = self;
        if let Some(token) = tokens.get_mut(token) {
            return Ok((env, token as &mut dyn PSP22));
        }
        factory
            .pair_mut(token)
            .map(|pair| (env, pair as &mut dyn PSP22))
            .ok_or_else(not_deployed)
    }

    /// Balance of `owner` in a token or liquidity token; `0` if it does not exist.
    pub fn balance_of(&self, token: AccountId, owner: AccountId) -> Balance {
        self.psp22(token)
            .map(|token| token.balance_of(owner))
            .unwrap_or_default()
    }

    pub fn total_supply(&self, token: AccountId) -> Balance {
        self.psp22(token)
            .map(|token| token.total_supply())
            .unwrap_or_default()
    }

    pub fn allowance(&self, token: AccountId, owner: AccountId, spender: AccountId) -> Balance {
        self.psp22(token)
            .map(|token| token.allowance(owner, spender))
            .unwrap_or_default()
    }

    pub fn transfer(
        &mut self,
        token: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        let (env, token) = self.psp22_mut(token)?;
        token.transfer(env, to, value)
    }

    pub fn transfer_from(
        &mut self,
        token: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        let (env, token) = self.psp22_mut(token)?;
        token.transfer_from(env, from, to, value)
    }

    pub fn approve(
        &mut self,
        token: AccountId,
        spender: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        let (env, token) = self.psp22_mut(token)?;
        token.approve(env, spender, value)
    }

    pub fn increase_allowance(
        &mut self,
        token: AccountId,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<(), PSP22Error> {
        let (env, token) = self.psp22_mut(token)?;
        token.increase_allowance(env, spender, delta_value)
    }

    pub fn decrease_allowance(
        &mut self,
        token: AccountId,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<(), PSP22Error> {
        let (env, token) = self.psp22_mut(token)?;
        token.decrease_allowance(env, spender, delta_value)
    }

    pub fn create_pair(
        &mut self,
        token_0: AccountId,
        token_1: AccountId,
    ) -> Result<AccountId, FactoryError> {
        self.factory.create_pair(&mut self.env, token_0, token_1)
    }

    pub fn set_fee_to(&mut self, fee_to: AccountId) -> Result<(), FactoryError> {
        self.factory.set_fee_to(&self.env, fee_to)
    }

    pub fn set_fee_to_setter(&mut self, fee_to_setter: AccountId) -> Result<(), FactoryError> {
        self.factory.set_fee_to_setter(&self.env, fee_to_setter)
    }

    pub fn pair(&self, pair: AccountId) -> Option<&PairContract> {
        self.factory.pair(pair)
    }

    /// The pair of two tokens, in either order.
    pub fn get_pair(&self, token_a: AccountId, token_b: AccountId) -> Option<&PairContract> {
        self.factory
            .get_pair(token_a, token_b)
            .and_then(|pair| self.factory.pair(pair))
    }

    fn with_pair<R>(
        &mut self,
        pair: AccountId,
        f: impl FnOnce(
            &mut PairContract,
            &mut Env,
            &mut Tokens,
            Option<AccountId>,
        ) -> Result<R, PairError>,
    ) -> Result<R, PairError> {
        let fee_to = self.factory.fee_to();
        let Chain {
            env,
            tokens,
            factory,
        } = self;
        let pair = factory.pair_mut(pair).ok_or_else(not_deployed)?;
        f(pair, env, tokens, fee_to)
    }

    /// Low-level `Pair::mint` called directly by the actor.
    pub fn mint_liquidity(&mut self, pair: AccountId, to: AccountId) -> Result<Balance, PairError> {
        self.with_pair(pair, |pair, env, tokens, fee_to| {
            pair.mint(env, tokens, fee_to, to)
        })
    }

    /// Low-level `Pair::burn` called directly by the actor.
    pub fn burn_liquidity(
        &mut self,
        pair: AccountId,
        to: AccountId,
    ) -> Result<(Balance, Balance), PairError> {
        self.with_pair(pair, |pair, env, tokens, fee_to| {
            pair.burn(env, tokens, fee_to, to)
        })
    }

    /// Low-level `Pair::swap` called directly by the actor.
    pub fn swap(
        &mut self,
        pair: AccountId,
        amount_0_out: Balance,
        amount_1_out: Balance,
        to: AccountId,
    ) -> Result<(), PairError> {
        self.with_pair(pair, |pair, env, tokens, _| {
            pair.swap(env, tokens, amount_0_out, amount_1_out, to)
        })
    }

    pub fn skim(&mut self, pair: AccountId, to: AccountId) -> Result<(), PairError> {
        self.with_pair(pair, |pair, env, tokens, _| pair.skim(env, tokens, to))
    }

    pub fn sync(&mut self, pair: AccountId) -> Result<(), PairError> {
        self.with_pair(pair, |pair, env, tokens, _| pair.sync(env, tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_calls_act_for_the_actor() {
        let alice = AccountId::from([1; 32]);
        let bob = AccountId::from([2; 32]);
        let mut chain = Chain::new(alice);
        let token = chain.deploy_token(1_000, "Token", "TKN", 18);

        chain.transfer(token, bob, 100).unwrap();
        chain.set_actor(bob).approve(token, alice, 50).unwrap();
        assert_eq!(chain.allowance(token, bob, alice), 50);

        chain.set_actor(alice).transfer_from(token, bob, alice, 50).unwrap();
        assert_eq!(chain.balance_of(token, alice), 950);
        assert_eq!(chain.balance_of(token, bob), 50);
        assert_eq!(chain.total_supply(token), 1_000);
    }

    #[test]
    fn unknown_contracts_are_reported() {
        let alice = AccountId::from([1; 32]);
        let unknown = AccountId::from([9; 32]);
        let mut chain = Chain::new(alice);
        assert_eq!(chain.balance_of(unknown, alice), 0);
        assert_eq!(chain.transfer(unknown, alice, 1), Err(not_deployed()));
        assert_eq!(
            chain.sync(unknown),
            Err(PairError::PSP22Error(not_deployed()))
        );
    }

    #[test]
    fn with_trading_fee_validates_fee() {
        let alice = AccountId::from([1; 32]);
        assert!(Chain::with_trading_fee(alice, 101).is_err());
        let chain = Chain::with_trading_fee(alice, 10).unwrap();
        assert_eq!(chain.factory.trading_fee(), 10);
    }
}
