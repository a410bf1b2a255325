//! Shared fixtures for service integration tests.

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
