pub mod helper;
pub mod transfer_helper;
