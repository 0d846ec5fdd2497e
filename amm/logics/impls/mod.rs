pub mod factory;
pub mod pair;
pub mod psp22;
pub mod router;
