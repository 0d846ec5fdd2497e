use std::fmt::Debug;

use amm::{AccountId, Balance, Chain, Pair, PairContract, Router, RouterContract};
use anyhow::{anyhow, Result};

pub const USDT: &str = "USDT";
pub const BUSD: &str = "BUSD";
pub const ICE: &str = "ICE";
pub const WOOD: &str = "WOOD";

pub const BOB: [u8; 32] = [1u8; 32];
pub const CHARLIE: [u8; 32] = [3u8; 32];
pub const DAVE: [u8; 32] = [4u8; 32];
pub const WNATIVE: [u8; 32] = [7u8; 32];
pub const FEE_RECEIVER: [u8; 32] = [42u8; 32];

pub const TOKEN: u128 = 10u128.pow(18);
pub const TOTAL_SUPPLY: Balance = 1_000_000 * TOKEN;
pub const LP_AMOUNT: Balance = 10_000 * TOKEN;

/// Roughly the wall clock when these tests were written, in milliseconds.
pub const GENESIS_TIMESTAMP: u64 = 1_700_000_000_000;

pub fn bob() -> AccountId {
    BOB.into()
}

pub fn charlie() -> AccountId {
    CHARLIE.into()
}

pub fn dave() -> AccountId {
    DAVE.into()
}

pub fn fee_receiver() -> AccountId {
    FEE_RECEIVER.into()
}

pub fn set_up_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Converts the contracts' error enums, which are not `std::error::Error`.
pub trait IntoAnyhow<T> {
    fn into_anyhow(self) -> Result<T>;
}

impl<T, E: Debug> IntoAnyhow<T> for std::result::Result<T, E> {
    fn into_anyhow(self) -> Result<T> {
        self.map_err(|err| anyhow!("{err:?}"))
    }
}

pub struct Setup {
    pub chain: Chain,
    pub router: RouterContract,
}

/// A chain with a factory governed by `bob` and a router, at `GENESIS_TIMESTAMP`.
pub fn setup() -> Setup {
    set_up_logger();
    let mut chain = Chain::new(bob());
    chain.set_block_timestamp(GENESIS_TIMESTAMP);
    let router = chain.deploy_router(WNATIVE.into());
    Setup { chain, router }
}

pub mod psp22_utils {
    use super::*;

    /// Deploys a token with `TOTAL_SUPPLY` owned by `owner`.
    pub fn setup(chain: &mut Chain, name: &str, owner: AccountId) -> AccountId {
        let actor = chain.actor();
        chain.set_actor(owner);
        let token = chain.deploy_token(TOTAL_SUPPLY, name, name, 18);
        chain.set_actor(actor);
        token
    }

    pub fn approve(
        chain: &mut Chain,
        token: AccountId,
        spender: AccountId,
        value: Balance,
        caller: AccountId,
    ) -> Result<()> {
        let actor = chain.actor();
        let result = chain.set_actor(caller).approve(token, spender, value);
        chain.set_actor(actor);
        result.into_anyhow()
    }

    pub fn transfer(
        chain: &mut Chain,
        token: AccountId,
        to: AccountId,
        value: Balance,
        caller: AccountId,
    ) -> Result<()> {
        let actor = chain.actor();
        let result = chain.set_actor(caller).transfer(token, to, value);
        chain.set_actor(actor);
        result.into_anyhow()
    }

    pub fn balance_of(chain: &Chain, token: AccountId, owner: AccountId) -> Balance {
        chain.balance_of(token, owner)
    }
}

pub mod router {
    use super::*;

    pub fn deadline(chain: &Chain) -> u64 {
        chain.block_timestamp() + 3600
    }

    /// Approves the router for both tokens and adds liquidity for `caller`.
    pub fn add_liquidity(
        chain: &mut Chain,
        router: &RouterContract,
        token_a: AccountId,
        token_b: AccountId,
        amount_a: Balance,
        amount_b: Balance,
        caller: AccountId,
    ) -> Result<(Balance, Balance, Balance)> {
        psp22_utils::approve(chain, token_a, router.account_id(), amount_a, caller)?;
        psp22_utils::approve(chain, token_b, router.account_id(), amount_b, caller)?;
        let deadline = deadline(chain);
        chain.set_actor(caller);
        router
            .add_liquidity(
                chain, token_a, token_b, amount_a, amount_b, amount_a, amount_b, caller, deadline,
            )
            .into_anyhow()
    }
}

pub mod pair {
    use super::*;

    pub fn get(chain: &Chain, token_a: AccountId, token_b: AccountId) -> Result<&PairContract> {
        chain
            .get_pair(token_a, token_b)
            .ok_or_else(|| anyhow!("no pair for the tokens"))
    }

    /// Reserves of the pair in the `(token_a, token_b)` order.
    pub fn reserves(chain: &Chain, token_a: AccountId, token_b: AccountId) -> Result<(Balance, Balance)> {
        let pair = get(chain, token_a, token_b)?;
        let (reserve_0, reserve_1, _) = pair.get_reserves();
        if pair.get_token_0() == token_a {
            Ok((reserve_0, reserve_1))
        } else {
            Ok((reserve_1, reserve_0))
        }
    }
}
