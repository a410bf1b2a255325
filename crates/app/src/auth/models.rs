//! Auth data models.

use jiff::Timestamp;

use crate::domain::users::records::{Role, UserRecord, UserUuid};

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_uuid: UserUuid,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// A signed session returned from registration and login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub expires_at: Timestamp,
    pub user: UserRecord,
}

/// Self-service registration payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
}
