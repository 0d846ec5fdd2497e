use std::{borrow::Cow, collections::BTreeSet};

use crate::{
    chain::Chain,
    env::Env,
    helpers::{
        helper::{get_amount_in, get_amount_out, quote, sort_tokens},
        transfer_helper::safe_transfer_from,
    },
    impls::pair::PairContract,
    traits::{Factory, Pair, PairError, Router, RouterError, PSP22},
    AccountId, Balance,
};
use amm_helpers::{constants::ZERO_ADDRESS, ensure};

/// One step of a swap path, resolved against the current chain state.
struct Hop {
    pair: AccountId,
    reserve_in: Balance,
    reserve_out: Balance,
    fee: u8,
}

/// Stateless entry point composing pair primitives into user-level operations.
///
/// Every mutating call runs in two phases: a read-only phase that computes all
/// amounts and runs every check the mutations would, then the mutations.
#[derive(Debug, Clone)]
pub struct RouterContract {
    account_id: AccountId,
    factory: AccountId,
    wnative: AccountId,
}

impl RouterContract {
    /// Deploys a router on behalf of `env.caller()`.
    pub fn new(env: &mut Env, factory: AccountId, wnative: AccountId) -> Self {
        let account_id = env.next_account_id(env.caller());
        log::debug!("router {:?} deployed for factory {:?}", account_id, factory);
        Self {
            account_id,
            factory,
            wnative,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    fn check_factory(&self, chain: &Chain) -> Result<(), RouterError> {
        ensure!(
            chain.factory.account_id() == self.factory,
            RouterError::PairNotFound
        );
        Ok(())
    }

    fn get_pair<'a>(
        &self,
        chain: &'a Chain,
        token_a: AccountId,
        token_b: AccountId,
    ) -> Result<&'a PairContract, RouterError> {
        chain
            .factory
            .get_pair(token_a, token_b)
            .and_then(|pair| chain.factory.pair(pair))
            .ok_or(RouterError::PairNotFound)
    }

    /// Reserves of the `(token_a, token_b)` pair, in that order.
    fn reserves_of(pair: &PairContract, token_a: AccountId) -> (Balance, Balance) {
        let (reserve_0, reserve_1, _) = pair.get_reserves();
        if token_a == pair.get_token_0() {
            (reserve_0, reserve_1)
        } else {
            (reserve_1, reserve_0)
        }
    }

    /// Resolves every hop of `path`. A pair may only be visited once.
    fn hops(&self, chain: &Chain, path: &[AccountId]) -> Result<Vec<Hop>, RouterError> {
        self.check_factory(chain)?;
        ensure!(path.len() >= 2, RouterError::InvalidPath);

        let mut visited = BTreeSet::new();
        let mut hops = Vec::with_capacity(path.len() - 1);
        for step in path.windows(2) {
            let (input, output) = (step[0], step[1]);
            sort_tokens(input, output)?;
            let pair = self.get_pair(chain, input, output)?;
            ensure!(
                visited.insert(pair.account_id()),
                RouterError::InvalidPath
            );
            let (reserve_in, reserve_out) = Self::reserves_of(pair, input);
            hops.push(Hop {
                pair: pair.account_id(),
                reserve_in,
                reserve_out,
                fee: pair.get_fee(),
            });
        }
        Ok(hops)
    }

    /// Computes swap token amounts over the given path of token pairs.
    ///
    /// At each step, a swap for pair `(path[i], path[i+1])` is calculated,
    /// using tokens from the previous trade.
    fn calculate_amounts_out(
        &self,
        chain: &Chain,
        amount_in: Balance,
        path: &[AccountId],
    ) -> Result<(Vec<Balance>, Vec<Hop>), RouterError> {
        let hops = self.hops(chain, path)?;
        let mut amounts = Vec::with_capacity(path.len());
        amounts.push(amount_in);
        for (i, hop) in hops.iter().enumerate() {
            amounts.push(get_amount_out(
                amounts[i],
                hop.reserve_in,
                hop.reserve_out,
                hop.fee,
            )?);
        }
        Ok((amounts, hops))
    }

    /// Computes the amounts of tokens that have to be supplied
    /// at each step of the exchange `path`, to get exactly `amount_out`
    /// tokens at the end of the swaps.
    fn calculate_amounts_in(
        &self,
        chain: &Chain,
        amount_out: Balance,
        path: &[AccountId],
    ) -> Result<(Vec<Balance>, Vec<Hop>), RouterError> {
        let hops = self.hops(chain, path)?;
        let mut amounts = vec![0; path.len()];
        amounts[path.len() - 1] = amount_out;
        for (i, hop) in hops.iter().enumerate().rev() {
            amounts[i] = get_amount_in(amounts[i + 1], hop.reserve_in, hop.reserve_out, hop.fee)?;
        }
        Ok((amounts, hops))
    }

    /// Amounts of both tokens to deposit that keep the pair's price.
    fn calculate_liquidity(
        &self,
        pair: &PairContract,
        token_a: AccountId,
        amount_a_desired: Balance,
        amount_b_desired: Balance,
        amount_a_min: Balance,
        amount_b_min: Balance,
    ) -> Result<(Balance, Balance), RouterError> {
        let (reserve_a, reserve_b) = Self::reserves_of(pair, token_a);

        if reserve_a == 0 && reserve_b == 0 {
            return Ok((amount_a_desired, amount_b_desired));
        }

        let amount_b_optimal = quote(amount_a_desired, reserve_a, reserve_b)?;
        if amount_b_optimal <= amount_b_desired {
            ensure!(
                amount_b_optimal >= amount_b_min,
                RouterError::InsufficientBAmount
            );
            Ok((amount_a_desired, amount_b_optimal))
        } else {
            let amount_a_optimal = quote(amount_b_desired, reserve_b, reserve_a)?;
            // amount_a_optimal <= amount_a_desired holds as amount_b_optimal > amount_b_desired
            ensure!(
                amount_a_optimal >= amount_a_min,
                RouterError::InsufficientAAmount
            );
            Ok((amount_a_optimal, amount_b_desired))
        }
    }

    /// Runs every check of the swap chain without moving any token.
    fn validate_swap(
        &self,
        chain: &Chain,
        amounts: &[Balance],
        hops: &[Hop],
        path: &[AccountId],
        to: AccountId,
    ) -> Result<(), RouterError> {
        let caller = chain.env.caller();
        chain.tokens.check_transfer_from(
            path[0],
            self.account_id,
            caller,
            hops[0].pair,
            amounts[0],
        )?;
        for (i, hop) in hops.iter().enumerate() {
            let pair = chain
                .factory
                .pair(hop.pair)
                .ok_or(RouterError::PairNotFound)?;
            let recipient = hops.get(i + 1).map(|next| next.pair).unwrap_or(to);
            let (amount_in, amount_out) = (amounts[i], amounts[i + 1]);
            let (in_0, in_1, out_0, out_1) = if path[i] == pair.get_token_0() {
                (amount_in, 0, 0, amount_out)
            } else {
                (0, amount_in, amount_out, 0)
            };
            pair.preview_swap(&chain.tokens, in_0, in_1, out_0, out_1, recipient)?;
        }
        Ok(())
    }

    /// Pulls the input from the caller into the first pair and swaps along the path.
    fn swap(
        &self,
        chain: &mut Chain,
        amounts: &[Balance],
        hops: &[Hop],
        path: &[AccountId],
        to: AccountId,
    ) -> Result<(), RouterError> {
        let Chain {
            env,
            tokens,
            factory,
        } = chain;
        let caller = env.caller();
        safe_transfer_from(
            env,
            tokens,
            self.account_id,
            path[0],
            caller,
            hops[0].pair,
            amounts[0],
        )?;
        for (i, hop) in hops.iter().enumerate() {
            let amount_out = amounts[i + 1];
            // If last pair in the path, transfer tokens to the `to` recipient.
            // Otherwise, transfer to the next Pair contract instance.
            let recipient = hops.get(i + 1).map(|next| next.pair).unwrap_or(to);
            let pair = factory
                .pair_mut(hop.pair)
                .ok_or(RouterError::PairNotFound)?;
            let (amount_0_out, amount_1_out) = if path[i] == pair.get_token_0() {
                (0, amount_out)
            } else {
                (amount_out, 0)
            };
            env.with_caller(self.account_id, |env| {
                pair.swap(env, tokens, amount_0_out, amount_1_out, recipient)
            })?;
        }
        Ok(())
    }

    /// Checks if the current block timestamp is not after the deadline.
    #[inline]
    fn check_timestamp(&self, env: &Env, deadline: u64) -> Result<(), RouterError> {
        ensure!(deadline >= env.block_timestamp(), RouterError::Expired);
        Ok(())
    }

    #[inline]
    fn check_to(&self, to: AccountId) -> Result<(), RouterError> {
        ensure!(to != AccountId::from(ZERO_ADDRESS), RouterError::InvalidTo);
        Ok(())
    }
}

impl Router for RouterContract {
    fn factory(&self) -> AccountId {
        self.factory
    }

    fn wnative(&self) -> AccountId {
        self.wnative
    }

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
    ) -> Result<(Balance, Balance, Balance), RouterError> {
        self.check_timestamp(&chain.env, deadline)?;
        self.check_factory(chain)?;
        self.check_to(to)?;
        let (token_0, token_1) = sort_tokens(token_a, token_b)?;

        let fee_to = chain.factory.fee_to();
        let (pair_id, amount_a, amount_b, liquidity) = {
            // A pair that does not exist yet is previewed as the factory would create it.
            let pair = match self.get_pair(chain, token_0, token_1) {
                Ok(pair) => Cow::Borrowed(pair),
                Err(_) => Cow::Owned(chain.factory.instantiate_pair(token_0, token_1)),
            };
            let (amount_a, amount_b) = self.calculate_liquidity(
                &pair,
                token_a,
                amount_a_desired,
                amount_b_desired,
                amount_a_min,
                amount_b_min,
            )?;
            let (amount_0, amount_1) = if token_a == token_0 {
                (amount_a, amount_b)
            } else {
                (amount_b, amount_a)
            };
            let liquidity = pair.preview_mint(&chain.tokens, amount_0, amount_1, fee_to, to)?;
            (pair.account_id(), amount_a, amount_b, liquidity)
        };

        let caller = chain.env.caller();
        chain
            .tokens
            .check_transfer_from(token_a, self.account_id, caller, pair_id, amount_a)?;
        chain
            .tokens
            .check_transfer_from(token_b, self.account_id, caller, pair_id, amount_b)?;

        let Chain {
            env,
            tokens,
            factory,
        } = chain;
        factory.create_pair(env, token_0, token_1)?;
        safe_transfer_from(env, tokens, self.account_id, token_a, caller, pair_id, amount_a)?;
        safe_transfer_from(env, tokens, self.account_id, token_b, caller, pair_id, amount_b)?;
        let pair = factory
            .pair_mut(pair_id)
            .ok_or(RouterError::PairNotFound)?;
        let minted = env.with_caller(self.account_id, |env| {
            pair.mint(env, tokens, fee_to, to)
        })?;

        log::debug!(
            "router: added ({}, {}) to {:?} for {} liquidity",
            amount_a,
            amount_b,
            pair_id,
            liquidity
        );
        Ok((amount_a, amount_b, minted))
    }

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
    ) -> Result<(Balance, Balance), RouterError> {
        self.check_timestamp(&chain.env, deadline)?;
        self.check_factory(chain)?;
        self.check_to(to)?;
        let (token_0, _) = sort_tokens(token_a, token_b)?;
        let pair = self.get_pair(chain, token_a, token_b)?;
        let pair_id = pair.account_id();

        let fee_to = chain.factory.fee_to();
        let (amount_0, amount_1) = pair.preview_burn(&chain.tokens, liquidity, fee_to, to)?;
        let (amount_a, amount_b) = if token_a == token_0 {
            (amount_0, amount_1)
        } else {
            (amount_1, amount_0)
        };
        ensure!(amount_a >= amount_a_min, RouterError::InsufficientAAmount);
        ensure!(amount_b >= amount_b_min, RouterError::InsufficientBAmount);

        let caller = chain.env.caller();
        pair.check_transfer_from(self.account_id, caller, pair_id, liquidity)?;

        let Chain {
            env,
            tokens,
            factory,
        } = chain;
        let pair = factory
            .pair_mut(pair_id)
            .ok_or(RouterError::PairNotFound)?;
        env.with_caller(self.account_id, |env| -> Result<_, PairError> {
            pair.transfer_from(env, caller, pair_id, liquidity)?;
            pair.burn(env, tokens, fee_to, to)
        })?;

        log::debug!(
            "router: removed {} liquidity from {:?} for ({}, {})",
            liquidity,
            pair_id,
            amount_a,
            amount_b
        );
        Ok((amount_a, amount_b))
    }

    fn swap_exact_tokens_for_tokens(
        &self,
        chain: &mut Chain,
        amount_in: Balance,
        amount_out_min: Balance,
        path: Vec<AccountId>,
        to: AccountId,
        deadline: u64,
    ) -> Result<Vec<Balance>, RouterError> {
        self.check_timestamp(&chain.env, deadline)?;
        self.check_to(to)?;
        let (amounts, hops) = self.calculate_amounts_out(chain, amount_in, &path)?;
        ensure!(
            amounts[amounts.len() - 1] >= amount_out_min,
            RouterError::InsufficientOutputAmount
        );
        self.validate_swap(chain, &amounts, &hops, &path, to)?;
        self.swap(chain, &amounts, &hops, &path, to)?;
        log::debug!("router: swapped {:?} along {} hops", amounts, hops.len());
        Ok(amounts)
    }

    fn swap_tokens_for_exact_tokens(
        &self,
        chain: &mut Chain,
        amount_out: Balance,
        amount_in_max: Balance,
        path: Vec<AccountId>,
        to: AccountId,
        deadline: u64,
    ) -> Result<Vec<Balance>, RouterError> {
        self.check_timestamp(&chain.env, deadline)?;
        self.check_to(to)?;
        let (amounts, hops) = self.calculate_amounts_in(chain, amount_out, &path)?;
        ensure!(
            amounts[0] <= amount_in_max,
            RouterError::ExcessiveInputAmount
        );
        self.validate_swap(chain, &amounts, &hops, &path, to)?;
        self.swap(chain, &amounts, &hops, &path, to)?;
        log::debug!("router: swapped {:?} along {} hops", amounts, hops.len());
        Ok(amounts)
    }

    fn quote(
        &self,
        amount_a: Balance,
        reserve_a: Balance,
        reserve_b: Balance,
    ) -> Result<Balance, RouterError> {
        quote(amount_a, reserve_a, reserve_b)
    }

    fn get_amounts_out(
        &self,
        chain: &Chain,
        amount_in: Balance,
        path: &[AccountId],
    ) -> Result<Vec<Balance>, RouterError> {
        self.calculate_amounts_out(chain, amount_in, path)
            .map(|(amounts, _)| amounts)
    }

    fn get_amounts_in(
        &self,
        chain: &Chain,
        amount_out: Balance,
        path: &[AccountId],
    ) -> Result<Vec<Balance>, RouterError> {
        self.calculate_amounts_in(chain, amount_out, path)
            .map(|(amounts, _)| amounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_works() {
        let alice = AccountId::from([1; 32]);
        let factory = AccountId::from([2; 32]);
        let wnative = AccountId::from([3; 32]);
        let mut env = Env::new(alice, 0);
        let router = RouterContract::new(&mut env, factory, wnative);
        assert_eq!(router.factory(), factory);
        assert_eq!(router.wnative(), wnative);
        assert_ne!(router.account_id(), alice);
    }

    #[test]
    fn quote_delegates_to_helper() {
        let alice = AccountId::from([1; 32]);
        let mut env = Env::new(alice, 0);
        let router = RouterContract::new(&mut env, alice, alice);
        assert_eq!(router.quote(10, 100, 300), Ok(30));
    }
}
