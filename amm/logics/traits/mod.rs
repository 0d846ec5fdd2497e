mod factory;
mod pair;
mod psp22;
mod router;

pub use amm_helpers::math::MathError;
pub use factory::{Factory, FactoryError};
pub use pair::{Pair, PairError};
pub use psp22::{PSP22Error, PSP22Metadata, PSP22};
pub use router::{Router, RouterError};
