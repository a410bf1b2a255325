//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use stylus_app::auth::Principal;

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// The authenticated caller, or 401 when the auth middleware did not run.
    fn principal_or_401(&self) -> Result<Principal, StatusError>;

    fn insert_principal(&mut self, principal: Principal);
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.obtain::<Principal>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }
}
