mod data;
mod token;

pub use data::{PSP22Data, PSP22Event};
pub(crate) use token::not_deployed;
pub use token::{Token, Tokens};
