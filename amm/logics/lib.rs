//! A single-threaded simulation of a UniswapV2-style exchange: PSP22 tokens,
//! constant-product pairs, the factory indexing them and a router composing
//! multi-hop operations on top.

pub mod chain;
pub mod env;
pub mod helpers;
pub mod impls;
pub mod traits;

pub use ink_primitives::AccountId;

pub type Balance = u128;
/// Milliseconds, like an ink! block timestamp.
pub type Timestamp = u64;

pub use amm_helpers::{constants, ensure, math::MathError};
pub use chain::Chain;
pub use env::{Env, Event};
pub use impls::{
    factory::FactoryContract,
    pair::PairContract,
    psp22::{PSP22Data, PSP22Event, Token, Tokens},
    router::RouterContract,
};
pub use traits::{
    Factory, FactoryError, PSP22Error, PSP22Metadata, Pair, PairError, Router, RouterError, PSP22,
};
