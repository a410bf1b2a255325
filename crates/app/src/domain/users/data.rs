//! Users Data

use crate::domain::{
    pagination::Page,
    users::records::{Role, UserUuid, VerificationStatus},
};

/// New User Data
///
/// The password must already be hashed; see [`crate::auth::hash_password`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub verification_status: VerificationStatus,
}

/// Profile Update Data
///
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
}

/// Admin user listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub verification_status: Option<VerificationStatus>,
    pub page: Page,
}
