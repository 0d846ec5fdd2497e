#[cfg(test)]
mod uniswap_v2_tests;
#[cfg(test)]
mod utils;
