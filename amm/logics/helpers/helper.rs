use crate::{traits::RouterError, AccountId, Balance};
use amm_helpers::{
    constants::{TRADING_FEE_DENOM, ZERO_ADDRESS},
    ensure,
    math::{casted_mul, MathError},
};

/// Returns the two tokens in the canonical order of a pair.
pub fn sort_tokens(
    token_a: AccountId,
    token_b: AccountId,
) -> Result<(AccountId, AccountId), RouterError> {
    ensure!(token_a != token_b, RouterError::IdenticalAddresses);
    let (token_0, token_1) = if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    };
    ensure!(
        token_0 != AccountId::from(ZERO_ADDRESS),
        RouterError::ZeroAddress
    );
    Ok((token_0, token_1))
}

/// Returns amount of `B` tokens worth `amount_a` of `A` tokens
/// at the current `reserve_a / reserve_b` price.
pub fn quote(
    amount_a: Balance,
    reserve_a: Balance,
    reserve_b: Balance,
) -> Result<Balance, RouterError> {
    ensure!(amount_a > 0, RouterError::InsufficientAmount);
    ensure!(
        reserve_a > 0 && reserve_b > 0,
        RouterError::InsufficientLiquidity
    );

    let amount_b: u128 = casted_mul(amount_a, reserve_b)
        .checked_div(reserve_a.into())
        .ok_or(MathError::DivByZero(11))?
        .try_into()
        .map_err(|_| MathError::CastOverflow(11))?;

    Ok(amount_b)
}

/// Returns amount of `B` tokens received
/// for `amount_in` of `A` tokens that maintains
/// the constant product of `k = reserve_a * reserve_b`.
///
/// `fee` is charged on the input, in per-mille.
pub fn get_amount_out(
    amount_in: Balance,
    reserve_in: Balance,
    reserve_out: Balance,
    fee: u8,
) -> Result<Balance, RouterError> {
    ensure!(amount_in > 0, RouterError::InsufficientAmount);
    ensure!(
        reserve_in > 0 && reserve_out > 0,
        RouterError::InsufficientLiquidity
    );

    // Adjusts for fees paid in the `token_in`.
    let amount_in_with_fee = casted_mul(amount_in, TRADING_FEE_DENOM - u128::from(fee));

    let numerator = amount_in_with_fee
        .checked_mul(reserve_out.into())
        .ok_or(MathError::MulOverflow(11))?;

    let denominator = casted_mul(reserve_in, TRADING_FEE_DENOM)
        .checked_add(amount_in_with_fee)
        .ok_or(MathError::AddOverflow(11))?;

    let amount_out: u128 = numerator
        .checked_div(denominator)
        .ok_or(MathError::DivByZero(12))?
        .try_into()
        .map_err(|_| MathError::CastOverflow(12))?;

    Ok(amount_out)
}

/// Returns amount of `A` tokens user has to supply
/// to get exactly `amount_out` of `B` token while maintaining
/// the constant product of `k = reserve_a * reserve_b`.
///
/// Rounds up, so the pair never receives less than it needs.
pub fn get_amount_in(
    amount_out: Balance,
    reserve_in: Balance,
    reserve_out: Balance,
    fee: u8,
) -> Result<Balance, RouterError> {
    ensure!(amount_out > 0, RouterError::InsufficientAmount);
    ensure!(
        reserve_in > 0 && reserve_out > amount_out,
        RouterError::InsufficientLiquidity
    );

    let numerator = casted_mul(reserve_in, amount_out)
        .checked_mul(TRADING_FEE_DENOM.into())
        .ok_or(MathError::MulOverflow(12))?;

    let denominator = casted_mul(
        reserve_out
            .checked_sub(amount_out)
            .ok_or(MathError::SubUnderflow(11))?,
        TRADING_FEE_DENOM - u128::from(fee),
    );

    let amount_in: u128 = numerator
        .checked_div(denominator)
        .ok_or(MathError::DivByZero(13))?
        .checked_add(1.into())
        .ok_or(MathError::AddOverflow(12))?
        .try_into()
        .map_err(|_| MathError::CastOverflow(13))?;

    Ok(amount_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: u128 = 10u128.pow(18);

    #[test]
    fn sort_tokens_orders_by_address() {
        let low = AccountId::from([1; 32]);
        let high = AccountId::from([2; 32]);
        assert_eq!(sort_tokens(high, low), Ok((low, high)));
        assert_eq!(sort_tokens(low, high), Ok((low, high)));
        assert_eq!(
            sort_tokens(low, low),
            Err(RouterError::IdenticalAddresses)
        );
        assert_eq!(
            sort_tokens(low, AccountId::from(ZERO_ADDRESS)),
            Err(RouterError::ZeroAddress)
        );
    }

    #[test]
    fn quote_keeps_the_ratio() {
        assert_eq!(quote(10, 100, 300), Ok(30));
        assert_eq!(quote(1, 3, 1), Ok(0));
        assert_eq!(quote(0, 100, 300), Err(RouterError::InsufficientAmount));
        assert_eq!(quote(10, 0, 300), Err(RouterError::InsufficientLiquidity));
    }

    #[test]
    fn amount_out_matches_constant_product_with_fee() {
        let reserve = 10_000 * TOKEN;
        assert_eq!(
            get_amount_out(10 * TOKEN, reserve, reserve, 3),
            Ok(9_960_069_810_399_032_164)
        );
        // No fee.
        assert_eq!(get_amount_out(100, 1_000, 1_000, 0), Ok(90));
        assert_eq!(
            get_amount_out(0, reserve, reserve, 3),
            Err(RouterError::InsufficientAmount)
        );
        assert_eq!(
            get_amount_out(1, 0, reserve, 3),
            Err(RouterError::InsufficientLiquidity)
        );
    }

    #[test]
    fn amount_in_rounds_up() {
        let reserve = 10_000 * TOKEN;
        let amount_in = get_amount_in(10 * TOKEN, reserve, reserve, 3).unwrap();
        assert_eq!(amount_in, 10_040_130_401_213_650_963);
        assert!(get_amount_out(amount_in, reserve, reserve, 3).unwrap() >= 10 * TOKEN);
        assert!(get_amount_out(amount_in - 1, reserve, reserve, 3).unwrap() < 10 * TOKEN);
        // 1_000 * 100 * 1_000 / (900 * 1_000) = 111.1
        assert_eq!(get_amount_in(100, 1_000, 1_000, 0), Ok(112));
    }

    #[test]
    fn amount_in_cannot_drain_reserve() {
        assert_eq!(
            get_amount_in(1_000, 1_000, 1_000, 3),
            Err(RouterError::InsufficientLiquidity)
        );
        assert_eq!(
            get_amount_in(0, 1_000, 1_000, 3),
            Err(RouterError::InsufficientAmount)
        );
    }
}
