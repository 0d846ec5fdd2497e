mod data;
#[allow(clippy::module_inception)]
mod pair;

pub use data::PairData;
pub use pair::PairContract;
