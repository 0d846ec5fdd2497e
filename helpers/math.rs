use primitive_types::U256;

pub fn casted_mul(a: u128, b: u128) -> U256 {
    U256::from(a) * U256::from(b)
}

/// Checked arithmetic failures. The `u8` tells apart the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
#[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
pub enum MathError {
    AddOverflow(u8),
    CastOverflow(u8),
    DivByZero(u8),
    MulOverflow(u8),
    SubUnderflow(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn casted_mul_does_not_overflow() {
        let product = casted_mul(u128::MAX, u128::MAX);
        assert!(product > U256::from(u128::MAX));
        // (2^128 - 1)^2 = 2^256 - 2^129 + 1
        assert_eq!(product, U256::MAX - (U256::from(1) << 129) + 2);
    }

    #[test]
    fn casted_mul_small() {
        assert_eq!(casted_mul(7, 6), U256::from(42));
        assert_eq!(casted_mul(0, u128::MAX), U256::zero());
    }
}
