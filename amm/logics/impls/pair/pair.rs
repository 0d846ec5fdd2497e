use crate::{
    env::{Env, Event},
    helpers::transfer_helper::safe_transfer,
    impls::psp22::{PSP22Data, PSP22Event, Tokens},
    traits::{MathError, PSP22Error, PSP22Metadata, Pair, PairError, PSP22},
    AccountId, Balance,
};
use amm_helpers::{
    constants::{BURN_ADDRESS, MINIMUM_LIQUIDITY, TRADING_FEE_DENOM, ZERO_ADDRESS},
    ensure,
    math::casted_mul,
};
use primitive_types::U256;

use super::PairData;

// 2^112
const Q112: u128 = 5192296858534827628530496329220096;
// From the UniswapV2 whitepaper. Section 3.7.
// This number is high enough to support 18-decimal-place tokens
// with a totalSupply over 1 quadrillion.
// RESERVES_UPPER_BOUND cannot be u128::MAX because reserve_0*1000*reserve_1*1000
// must fit in U256 for swap to work correctly.
//
// 2^112 - 1
const RESERVES_UPPER_BOUND: u128 = Q112 - 1;

// Whitepaper 2.4, equation (7)
const PROTOCOL_FEE_ADJ_DENOM: u128 = 5;

const TWO_POW_32: u64 = 4294967296;

/// Outcome of depositing the tokens the pair holds on top of its reserves.
struct Deposit {
    amount_0: Balance,
    amount_1: Balance,
    liquidity: Balance,
    protocol_fee: Balance,
}

/// Outcome of burning the liquidity the pair holds.
struct Withdrawal {
    amount_0: Balance,
    amount_1: Balance,
    protocol_fee: Balance,
}

/// Constant-product pair. Its liquidity share is a PSP22 token.
#[derive(Debug, Clone)]
pub struct PairContract {
    account_id: AccountId,
    psp22: PSP22Data,
    pair: PairData,
}

impl PairContract {
    pub fn new(
        account_id: AccountId,
        factory: AccountId,
        token_0: AccountId,
        token_1: AccountId,
        fee: u8,
    ) -> Self {
        Self {
            account_id,
            psp22: PSP22Data::default(),
            pair: PairData::new(token_0, token_1, factory, fee),
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn k_last(&self) -> Option<U256> {
        self.pair.k_last
    }

    /// Balances of both tokens held by the pair, read from the token contracts.
    pub fn token_balances(&self, tokens: &Tokens) -> (Balance, Balance) {
        (
            tokens.balance_of(self.pair.token_0, self.account_id),
            tokens.balance_of(self.pair.token_1, self.account_id),
        )
    }

    /// Liquidity `mint` would issue if `amount_0` and `amount_1` were
    /// transferred to the pair first. Changes nothing.
    pub fn preview_mint(
        &self,
        tokens: &Tokens,
        amount_0: Balance,
        amount_1: Balance,
        fee_to: Option<AccountId>,
        to: AccountId,
    ) -> Result<Balance, PairError> {
        let (balance_0, balance_1) = self.token_balances(tokens);
        let balance_0 = balance_0
            .checked_add(amount_0)
            .ok_or(MathError::AddOverflow(2))?;
        let balance_1 = balance_1
            .checked_add(amount_1)
            .ok_or(MathError::AddOverflow(3))?;
        self.deposit(balance_0, balance_1, fee_to, to)
            .map(|deposit| deposit.liquidity)
    }

    /// Token amounts `burn` would pay out if `liquidity` shares were
    /// transferred to the pair first. Changes nothing.
    pub fn preview_burn(
        &self,
        tokens: &Tokens,
        liquidity: Balance,
        fee_to: Option<AccountId>,
        to: AccountId,
    ) -> Result<(Balance, Balance), PairError> {
        let (balance_0, balance_1) = self.token_balances(tokens);
        let liquidity = self
            .psp22
            .balance_of(self.account_id)
            .checked_add(liquidity)
            .ok_or(MathError::AddOverflow(4))?;
        self.withdrawal(balance_0, balance_1, liquidity, fee_to, to)
            .map(|withdrawal| (withdrawal.amount_0, withdrawal.amount_1))
    }

    /// Runs every check `swap` would run if `amount_0_in` and `amount_1_in`
    /// were transferred to the pair first. Changes nothing.
    pub fn preview_swap(
        &self,
        tokens: &Tokens,
        amount_0_in: Balance,
        amount_1_in: Balance,
        amount_0_out: Balance,
        amount_1_out: Balance,
        to: AccountId,
    ) -> Result<(), PairError> {
        let (balance_0, balance_1) = self.token_balances(tokens);
        let balance_0 = balance_0
            .checked_add(amount_0_in)
            .ok_or(MathError::AddOverflow(5))?;
        let balance_1 = balance_1
            .checked_add(amount_1_in)
            .ok_or(MathError::AddOverflow(6))?;
        self.swap_amounts(balance_0, balance_1, amount_0_out, amount_1_out, to)
            .map(|_| ())
    }

    /// Liquidity minted to `fee_to` before the next mint or burn:
    /// 1/6th of the growth in sqrt(k) since the last liquidity event.
    fn protocol_fee(
        &self,
        fee_to: Option<AccountId>,
        reserve_0: Balance,
        reserve_1: Balance,
    ) -> Result<Balance, PairError> {
        let k_last = match (fee_to, self.pair.k_last) {
            (Some(_), Some(k_last)) => k_last,
            _ => return Ok(0),
        };
        // Section 2.4 Protocol fee in the whitepaper.
        let root_k: U256 = casted_mul(reserve_0, reserve_1).integer_sqrt();
        let root_k_last = k_last.integer_sqrt();
        if root_k <= root_k_last {
            return Ok(0);
        }
        let total_supply: U256 = self.psp22.total_supply().into();
        let numerator = total_supply
            .checked_mul(
                root_k
                    .checked_sub(root_k_last)
                    .ok_or(MathError::SubUnderflow(1))?,
            )
            .ok_or(MathError::MulOverflow(1))?;
        let denominator = root_k
            .checked_mul(PROTOCOL_FEE_ADJ_DENOM.into())
            .ok_or(MathError::MulOverflow(2))?
            .checked_add(root_k_last)
            .ok_or(MathError::AddOverflow(1))?;
        let liquidity: u128 = numerator
            .checked_div(denominator)
            .ok_or(MathError::DivByZero(1))?
            .try_into()
            .map_err(|_| MathError::CastOverflow(1))?;
        Ok(liquidity)
    }

    fn deposit(
        &self,
        balance_0: Balance,
        balance_1: Balance,
        fee_to: Option<AccountId>,
        to: AccountId,
    ) -> Result<Deposit, PairError> {
        ensure!(to != AccountId::from(ZERO_ADDRESS), PairError::InvalidTo);
        ensure!(
            balance_0 <= RESERVES_UPPER_BOUND && balance_1 <= RESERVES_UPPER_BOUND,
            PairError::ReservesOverflow
        );
        let (reserve_0, reserve_1, _) = self.get_reserves();
        let amount_0 = balance_0
            .checked_sub(reserve_0)
            .ok_or(MathError::SubUnderflow(2))?;
        let amount_1 = balance_1
            .checked_sub(reserve_1)
            .ok_or(MathError::SubUnderflow(3))?;

        let protocol_fee = self.protocol_fee(fee_to, reserve_0, reserve_1)?;
        let total_supply = self
            .psp22
            .total_supply()
            .checked_add(protocol_fee)
            .ok_or(MathError::AddOverflow(7))?;

        let liquidity = if total_supply == 0 {
            // First deposit; MINIMUM_LIQUIDITY goes to the burn address.
            u128::try_from(casted_mul(amount_0, amount_1).integer_sqrt())
                .map_err(|_| MathError::CastOverflow(2))?
                .saturating_sub(MINIMUM_LIQUIDITY)
        } else {
            let liquidity_0: u128 = casted_mul(amount_0, total_supply)
                .checked_div(reserve_0.into())
                .ok_or(MathError::DivByZero(2))?
                .try_into()
                .map_err(|_| MathError::CastOverflow(3))?;
            let liquidity_1: u128 = casted_mul(amount_1, total_supply)
                .checked_div(reserve_1.into())
                .ok_or(MathError::DivByZero(3))?
                .try_into()
                .map_err(|_| MathError::CastOverflow(4))?;
            liquidity_0.min(liquidity_1)
        };

        ensure!(liquidity > 0, PairError::InsufficientLiquidityMinted);

        Ok(Deposit {
            amount_0,
            amount_1,
            liquidity,
            protocol_fee,
        })
    }

    fn withdrawal(
        &self,
        balance_0: Balance,
        balance_1: Balance,
        liquidity: Balance,
        fee_to: Option<AccountId>,
        to: AccountId,
    ) -> Result<Withdrawal, PairError> {
        ensure!(to != AccountId::from(ZERO_ADDRESS), PairError::InvalidTo);
        let (reserve_0, reserve_1, _) = self.get_reserves();
        let protocol_fee = self.protocol_fee(fee_to, reserve_0, reserve_1)?;
        let total_supply: U256 = self
            .psp22
            .total_supply()
            .checked_add(protocol_fee)
            .ok_or(MathError::AddOverflow(8))?
            .into();
        let amount_0: u128 = casted_mul(liquidity, balance_0)
            .checked_div(total_supply)
            .ok_or(MathError::DivByZero(4))?
            .try_into()
            .map_err(|_| MathError::CastOverflow(5))?;
        let amount_1: u128 = casted_mul(liquidity, balance_1)
            .checked_div(total_supply)
            .ok_or(MathError::DivByZero(5))?
            .try_into()
            .map_err(|_| MathError::CastOverflow(6))?;

        ensure!(
            amount_0 > 0 && amount_1 > 0,
            PairError::InsufficientLiquidityBurned
        );

        Ok(Withdrawal {
            amount_0,
            amount_1,
            protocol_fee,
        })
    }

    /// Validates a swap against the pair's balances before paying out and
    /// returns the input amounts it deduces.
    fn swap_amounts(
        &self,
        balance_0: Balance,
        balance_1: Balance,
        amount_0_out: Balance,
        amount_1_out: Balance,
        to: AccountId,
    ) -> Result<(Balance, Balance), PairError> {
        ensure!(
            amount_0_out > 0 || amount_1_out > 0,
            PairError::InsufficientOutputAmount
        );
        let (reserve_0, reserve_1, _) = self.get_reserves();
        ensure!(
            amount_0_out < reserve_0 && amount_1_out < reserve_1,
            PairError::InsufficientLiquidity
        );
        ensure!(
            to != self.pair.token_0
                && to != self.pair.token_1
                && to != AccountId::from(ZERO_ADDRESS),
            PairError::InvalidTo
        );

        let balance_0 = balance_0
            .checked_sub(amount_0_out)
            .ok_or(MathError::SubUnderflow(5))?;
        let balance_1 = balance_1
            .checked_sub(amount_1_out)
            .ok_or(MathError::SubUnderflow(6))?;

        // amount_*_out < reserve_* was checked above.
        let amount_0_in = balance_0.saturating_sub(reserve_0 - amount_0_out);
        let amount_1_in = balance_1.saturating_sub(reserve_1 - amount_1_out);
        ensure!(
            amount_0_in > 0 || amount_1_in > 0,
            PairError::InsufficientInputAmount
        );
        ensure!(
            balance_0 <= RESERVES_UPPER_BOUND && balance_1 <= RESERVES_UPPER_BOUND,
            PairError::ReservesOverflow
        );

        let fee: u128 = self.pair.fee.into();
        let balance_0_adjusted = balance_0
            .checked_mul(TRADING_FEE_DENOM)
            .ok_or(MathError::MulOverflow(3))?
            .checked_sub(
                amount_0_in
                    .checked_mul(fee)
                    .ok_or(MathError::MulOverflow(4))?,
            )
            .ok_or(MathError::SubUnderflow(9))?;
        let balance_1_adjusted = balance_1
            .checked_mul(TRADING_FEE_DENOM)
            .ok_or(MathError::MulOverflow(5))?
            .checked_sub(
                amount_1_in
                    .checked_mul(fee)
                    .ok_or(MathError::MulOverflow(6))?,
            )
            .ok_or(MathError::SubUnderflow(10))?;

        // Cast to U256 to prevent Overflow
        ensure!(
            casted_mul(balance_0_adjusted, balance_1_adjusted)
                >= casted_mul(reserve_0, reserve_1)
                    .checked_mul(TRADING_FEE_DENOM.pow(2).into())
                    .ok_or(MathError::MulOverflow(7))?,
            PairError::InvariantViolation
        );

        Ok((amount_0_in, amount_1_in))
    }

    fn mint_protocol_fee(
        &mut self,
        env: &mut Env,
        fee_to: Option<AccountId>,
        protocol_fee: Balance,
    ) -> Result<(), PairError> {
        match fee_to {
            Some(fee_to) => {
                let events = self.psp22.mint(fee_to, protocol_fee)?;
                env.emit_psp22_events(self.account_id, events);
            }
            None => self.pair.k_last = None,
        }
        Ok(())
    }

    fn pay_out(
        &self,
        env: &mut Env,
        tokens: &mut Tokens,
        to: AccountId,
        amount_0: Balance,
        amount_1: Balance,
    ) -> Result<(), PSP22Error> {
        if amount_0 > 0 {
            safe_transfer(env, tokens, self.account_id, self.pair.token_0, to, amount_0)?;
        }
        if amount_1 > 0 {
            safe_transfer(env, tokens, self.account_id, self.pair.token_1, to, amount_1)?;
        }
        Ok(())
    }

    fn update(
        &mut self,
        env: &mut Env,
        balance_0: Balance,
        balance_1: Balance,
        reserve_0: Balance,
        reserve_1: Balance,
    ) -> Result<(), PairError> {
        ensure!(
            balance_0 <= RESERVES_UPPER_BOUND && balance_1 <= RESERVES_UPPER_BOUND,
            PairError::ReservesOverflow
        );

        // The remainder mod 2^32 always fits in u32.
        let now_seconds = (env.block_timestamp() / 1000 % TWO_POW_32) as u32;

        // Wrapping subtraction so that the time_elapsed works correctly over the 2^32 boundary.
        // i.e. (1 - (2^32 - 1) = 2
        let time_elapsed = now_seconds.wrapping_sub(self.pair.block_timestamp_last);
        if time_elapsed > 0 && reserve_0 > 0 && reserve_1 > 0 {
            self.pair.price_0_cumulative_last = price_cumulative(
                reserve_1,
                reserve_0,
                time_elapsed,
                self.pair.price_0_cumulative_last,
            )?;
            self.pair.price_1_cumulative_last = price_cumulative(
                reserve_0,
                reserve_1,
                time_elapsed,
                self.pair.price_1_cumulative_last,
            )?;
        }
        self.pair.reserve_0 = balance_0;
        self.pair.reserve_1 = balance_1;
        self.pair.block_timestamp_last = now_seconds;

        env.emit_event(Event::Sync {
            pair: self.account_id,
            reserve_0: balance_0,
            reserve_1: balance_1,
        });
        Ok(())
    }

    fn emit_psp22(&self, env: &mut Env, events: Vec<PSP22Event>) {
        env.emit_psp22_events(self.account_id, events);
    }
}

impl Pair for PairContract {
    fn get_factory(&self) -> AccountId {
        self.pair.factory
    }

    fn get_minimum_liquidity(&self) -> u128 {
        MINIMUM_LIQUIDITY
    }

    fn get_reserves(&self) -> (Balance, Balance, u32) {
        (
            self.pair.reserve_0,
            self.pair.reserve_1,
            self.pair.block_timestamp_last,
        )
    }

    fn price_0_cumulative_last(&self) -> U256 {
        self.pair.price_0_cumulative_last
    }

    fn price_1_cumulative_last(&self) -> U256 {
        self.pair.price_1_cumulative_last
    }

    fn get_fee(&self) -> u8 {
        self.pair.fee
    }

    fn mint(
        &mut self,
        env: &mut Env,
        tokens: &mut Tokens,
        fee_to: Option<AccountId>,
        to: AccountId,
    ) -> Result<Balance, PairError> {
        let (reserve_0, reserve_1, _) = self.get_reserves();
        let (balance_0, balance_1) = self.token_balances(tokens);
        let deposit = self.deposit(balance_0, balance_1, fee_to, to)?;

        self.mint_protocol_fee(env, fee_to, deposit.protocol_fee)?;
        if self.psp22.total_supply() == 0 {
            let events = self
                .psp22
                .mint(BURN_ADDRESS.into(), MINIMUM_LIQUIDITY)?;
            self.emit_psp22(env, events);
        }
        let events = self.psp22.mint(to, deposit.liquidity)?;
        self.emit_psp22(env, events);

        self.update(env, balance_0, balance_1, reserve_0, reserve_1)?;

        if fee_to.is_some() {
            self.pair.k_last = Some(casted_mul(self.pair.reserve_0, self.pair.reserve_1));
        }

        log::debug!(
            "pair {:?}: minted {} liquidity for ({}, {})",
            self.account_id,
            deposit.liquidity,
            deposit.amount_0,
            deposit.amount_1
        );
        env.emit_event(Event::Mint {
            pair: self.account_id,
            sender: env.caller(),
            amount_0: deposit.amount_0,
            amount_1: deposit.amount_1,
        });

        Ok(deposit.liquidity)
    }

    fn burn(
        &mut self,
        env: &mut Env,
        tokens: &mut Tokens,
        fee_to: Option<AccountId>,
        to: AccountId,
    ) -> Result<(Balance, Balance), PairError> {
        let (reserve_0, reserve_1, _) = self.get_reserves();
        let (balance_0, balance_1) = self.token_balances(tokens);
        let liquidity = self.psp22.balance_of(self.account_id);
        let withdrawal = self.withdrawal(balance_0, balance_1, liquidity, fee_to, to)?;

        self.mint_protocol_fee(env, fee_to, withdrawal.protocol_fee)?;
        let events = self.psp22.burn(self.account_id, liquidity)?;
        self.emit_psp22(env, events);

        self.pay_out(env, tokens, to, withdrawal.amount_0, withdrawal.amount_1)?;

        let (balance_0, balance_1) = self.token_balances(tokens);
        self.update(env, balance_0, balance_1, reserve_0, reserve_1)?;

        if fee_to.is_some() {
            self.pair.k_last = Some(casted_mul(self.pair.reserve_0, self.pair.reserve_1));
        }

        log::debug!(
            "pair {:?}: burned {} liquidity for ({}, {})",
            self.account_id,
            liquidity,
            withdrawal.amount_0,
            withdrawal.amount_1
        );
        env.emit_event(Event::Burn {
            pair: self.account_id,
            sender: env.caller(),
            amount_0: withdrawal.amount_0,
            amount_1: withdrawal.amount_1,
            to,
        });

        Ok((withdrawal.amount_0, withdrawal.amount_1))
    }

    fn swap(
        &mut self,
        env: &mut Env,
        tokens: &mut Tokens,
        amount_0_out: Balance,
        amount_1_out: Balance,
        to: AccountId,
    ) -> Result<(), PairError> {
        let (reserve_0, reserve_1, _) = self.get_reserves();
        let (balance_0, balance_1) = self.token_balances(tokens);
        let (amount_0_in, amount_1_in) =
            self.swap_amounts(balance_0, balance_1, amount_0_out, amount_1_out, to)?;

        self.pay_out(env, tokens, to, amount_0_out, amount_1_out)?;

        // Re-read rather than trust the arithmetic above.
        let (balance_0, balance_1) = self.token_balances(tokens);
        self.update(env, balance_0, balance_1, reserve_0, reserve_1)?;

        log::debug!(
            "pair {:?}: swapped in ({}, {}) out ({}, {})",
            self.account_id,
            amount_0_in,
            amount_1_in,
            amount_0_out,
            amount_1_out
        );
        env.emit_event(Event::Swap {
            pair: self.account_id,
            sender: env.caller(),
            amount_0_in,
            amount_1_in,
            amount_0_out,
            amount_1_out,
            to,
        });

        Ok(())
    }

    fn skim(
        &mut self,
        env: &mut Env,
        tokens: &mut Tokens,
        to: AccountId,
    ) -> Result<(), PairError> {
        let (balance_0, balance_1) = self.token_balances(tokens);
        let amount_0 = balance_0
            .checked_sub(self.pair.reserve_0)
            .ok_or(MathError::SubUnderflow(11))?;
        let amount_1 = balance_1
            .checked_sub(self.pair.reserve_1)
            .ok_or(MathError::SubUnderflow(12))?;
        self.pay_out(env, tokens, to, amount_0, amount_1)?;
        Ok(())
    }

    fn sync(&mut self, env: &mut Env, tokens: &Tokens) -> Result<(), PairError> {
        let (reserve_0, reserve_1, _) = self.get_reserves();
        let (balance_0, balance_1) = self.token_balances(tokens);
        self.update(env, balance_0, balance_1, reserve_0, reserve_1)
    }

    fn get_token_0(&self) -> AccountId {
        self.pair.token_0
    }

    fn get_token_1(&self) -> AccountId {
        self.pair.token_1
    }
}

impl PSP22Metadata for PairContract {
    fn token_name(&self) -> Option<String> {
        Some("AMM-LP".to_string())
    }

    fn token_symbol(&self) -> Option<String> {
        Some("AMMLP".to_string())
    }

    fn token_decimals(&self) -> u8 {
        18
    }
}

impl PSP22 for PairContract {
    fn total_supply(&self) -> Balance {
        self.psp22.total_supply()
    }

    fn balance_of(&self, owner: AccountId) -> Balance {
        self.psp22.balance_of(owner)
    }

    fn allowance(&self, owner: AccountId, spender: AccountId) -> Balance {
        self.psp22.allowance(owner, spender)
    }

    fn transfer(
        &mut self,
        env: &mut Env,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self.psp22.transfer(env.caller(), to, value)?;
        self.emit_psp22(env, events);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        env: &mut Env,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self
            .psp22
            .transfer_from(env.caller(), from, to, value)?;
        self.emit_psp22(env, events);
        Ok(())
    }

    fn check_transfer_from(
        &self,
        spender: AccountId,
        from: AccountId,
        to: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        self.psp22.check_transfer_from(spender, from, to, value)
    }

    fn approve(
        &mut self,
        env: &mut Env,
        spender: AccountId,
        value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self.psp22.approve(env.caller(), spender, value)?;
        self.emit_psp22(env, events);
        Ok(())
    }

    fn increase_allowance(
        &mut self,
        env: &mut Env,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self
            .psp22
            .increase_allowance(env.caller(), spender, delta_value)?;
        self.emit_psp22(env, events);
        Ok(())
    }

    fn decrease_allowance(
        &mut self,
        env: &mut Env,
        spender: AccountId,
        delta_value: Balance,
    ) -> Result<(), PSP22Error> {
        let events = self
            .psp22
            .decrease_allowance(env.caller(), spender, delta_value)?;
        self.emit_psp22(env, events);
        Ok(())
    }
}

// Reserves are at most 2^112 - 1.
// Consumer of the `price_cumulative_last` should use `overflowing_sub` to get the correct value.
#[inline]
fn price_cumulative(
    num: u128,
    denom: u128,
    time_elapsed_seconds: u32,
    last_price: U256,
) -> Result<U256, PairError> {
    // We use overflowing_add below to make the algorithm work correctly across the 2^256 boundary.
    Ok(
        UQ112x112::from_frac(num, denom).ok_or(PairError::ReservesOverflow)? // u224.div(u112) at most 2^224
            .saturating_mul(time_elapsed_seconds.into()) // so 2^224 * 2^32 never overflows 2^256.
            .overflowing_add(last_price)
            .0, // We don't care about the overflow flag, we just want the value.
    )
}

struct UQ112x112;

impl UQ112x112 {
    fn from_frac(num: u128, denom: u128) -> Option<U256> {
        if num >= Q112 || denom == 0 || denom >= Q112 {
            None
        } else {
            // num < 2^112, so num * 2^112 < 2^224.
            Some(U256::from(num) * U256::from(Q112) / U256::from(denom))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts() {
        assert_eq!(Q112, 2u128.pow(112))
    }

    #[test]
    fn u112x112() {
        assert!(
            UQ112x112::from_frac(Q112, 1).is_none(),
            "Should not work with num >= Q112"
        );
        assert!(
            UQ112x112::from_frac(1, Q112).is_none(),
            "Should not work with denom >= Q112"
        );
        assert!(
            UQ112x112::from_frac(1, 0).is_none(),
            "Should not work with denom == 0"
        );

        assert_eq!(
            UQ112x112::from_frac(1u128, 1u128).unwrap(),
            U256::from(Q112)
        );

        assert_eq!(
            UQ112x112::from_frac(1u128, 2u128).unwrap(),
            U256::from(Q112 / 2)
        );

        assert_eq!(
            UQ112x112::from_frac(Q112 - 1, Q112 - 1).unwrap(), // (n * (n-1)) / (n - 1) = n
            U256::from(Q112),
        );

        assert_eq!(
            UQ112x112::from_frac(Q112 - 1, 1).unwrap(),
            U256::from(2).pow(224.into()) - U256::from(Q112),
        );
    }

    #[test]
    fn initialize_works() {
        let token_0 = AccountId::from([0x03; 32]);
        let token_1 = AccountId::from([0x04; 32]);
        let factory = AccountId::from([0x05; 32]);
        let pair = PairContract::new(AccountId::from([0x06; 32]), factory, token_0, token_1, 3);
        assert_eq!(pair.get_token_0(), token_0);
        assert_eq!(pair.get_token_1(), token_1);
        assert_eq!(pair.get_factory(), factory);
        assert_eq!(pair.get_reserves(), (0, 0, 0));
        assert_eq!(pair.total_supply(), 0);
        assert_eq!(pair.k_last(), None);
    }

    #[test]
    fn price_cumulative_from_zero_time_elapsed() {
        let cumulative = price_cumulative(1, 1, 0, 0.into()).unwrap();
        assert_eq!(cumulative, 0.into());
    }

    #[test]
    fn price_cumulative_from_one_time_elapsed() {
        let cumulative = price_cumulative(1, 1, 1, 0.into()).unwrap();
        assert_eq!(cumulative, U256::from(Q112));
    }

    #[test]
    fn price_cumulative_biggies() {
        assert_eq!(
            price_cumulative(
                RESERVES_UPPER_BOUND,
                RESERVES_UPPER_BOUND,
                u32::MAX,
                0.into(),
            )
            .unwrap(),
            U256::from(2).pow(144.into()) - U256::from(2).pow(112.into())
        );
        let max_cumulative_without_overflow =
            U256::MAX - U256::from(2).pow(144.into()) - U256::from(2).pow(224.into())
                + Q112
                + 1; // Add 1 since u256::MAX is 2^256-1
        assert_eq!(
            // max reserve 0, min reserve 1, max time elapsed.
            // [(2^112 - 1) * 2^112] / 1 * (2^32 - 1)
            price_cumulative(RESERVES_UPPER_BOUND, 1, u32::MAX, 0.into()).unwrap(),
            max_cumulative_without_overflow,
        );
        let new_cumulative_overflow = price_cumulative(
            RESERVES_UPPER_BOUND,
            1,
            u32::MAX,
            max_cumulative_without_overflow,
        )
        .unwrap();
        assert!(
            new_cumulative_overflow < max_cumulative_without_overflow,
            "value after overflow should be lower"
        );
        let diff = U256::MAX - max_cumulative_without_overflow + new_cumulative_overflow;
        assert_eq!(diff + 1, max_cumulative_without_overflow); // +1 to account for overflow; u256::MAX = 2^256 - 1
    }

    #[test]
    fn preview_mint_on_empty_pair_locks_minimum_liquidity() {
        let alice = AccountId::from([0x01; 32]);
        let pair = PairContract::new(
            AccountId::from([0x06; 32]),
            AccountId::from([0x05; 32]),
            AccountId::from([0x03; 32]),
            AccountId::from([0x04; 32]),
            3,
        );
        let tokens = Tokens::default();
        assert_eq!(
            pair.preview_mint(&tokens, 4_000, 9_000, None, alice),
            Ok(6_000 - MINIMUM_LIQUIDITY)
        );
        assert_eq!(
            pair.preview_mint(&tokens, 1_000, 1_000, None, alice),
            Err(PairError::InsufficientLiquidityMinted)
        );
        assert_eq!(
            pair.preview_mint(&tokens, 4_000, 9_000, None, AccountId::from(ZERO_ADDRESS)),
            Err(PairError::InvalidTo)
        );
    }

    #[test]
    fn preview_swap_on_empty_pair_fails() {
        let pair = PairContract::new(
            AccountId::from([0x06; 32]),
            AccountId::from([0x05; 32]),
            AccountId::from([0x03; 32]),
            AccountId::from([0x04; 32]),
            3,
        );
        let tokens = Tokens::default();
        assert_eq!(
            pair.preview_swap(&tokens, 10, 0, 0, 1, AccountId::from([0x01; 32])),
            Err(PairError::InsufficientLiquidity)
        );
    }
}
