/// Address for which the private key is unknown.
/// This is used for sending MINIMUM_LIQUIDITY when minting tokens in Pair contract.
/// Result of sha256 hashing the BURN_ADDRESS_MSG.
pub const BURN_ADDRESS: [u8; 32] = [
    102, 6, 252, 9, 191, 196, 160, 109, 87, 21, 96, 87, 93, 85, 174, 13, 219, 101, 211, 245, 113,
    217, 46, 212, 200, 32, 201, 50, 207, 255, 54, 215,
];

#[allow(unused)]
const BURN_ADDRESS_MSG: &str = "This is the AMM simulator burn address.";

/// The all-zero account. Never a valid token.
pub const ZERO_ADDRESS: [u8; 32] = [0; 32];

/// Minimum liquidity threshold that is subtracted
/// from the minted liquidity and sent to the `BURN_ADDRESS`.
/// Prevents price manipulation and saturation.
/// See UniswapV2 whitepaper for more details.
/// NOTE: This value is taken from UniswapV2 whitepaper and is correct
/// only for liquidity tokens with precision = 18.
pub const MINIMUM_LIQUIDITY: u128 = 1000;

/// Trading fees are expressed in per-mille of the input amount.
pub const TRADING_FEE_DENOM: u128 = 1000;

/// 0.3%, as in UniswapV2.
pub const DEFAULT_TRADING_FEE: u8 = 3;

pub const MAX_TRADING_FEE: u8 = 100;
