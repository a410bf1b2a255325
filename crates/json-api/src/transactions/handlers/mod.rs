//! Transaction Handlers

pub(crate) mod all;
pub(crate) mod balance;
pub(crate) mod deposit;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod process;
pub(crate) mod transfer;
pub(crate) mod withdraw;
