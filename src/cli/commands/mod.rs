//! Command implementations

pub mod completions;
pub mod customer;
pub mod device;
pub mod init;
pub mod order;
pub mod unit;
