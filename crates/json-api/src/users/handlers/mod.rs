//! User Handlers

pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod login;
pub(crate) mod me;
pub(crate) mod register;
pub(crate) mod request_verification;
pub(crate) mod suspension;
pub(crate) mod update_me;
pub(crate) mod verification;
