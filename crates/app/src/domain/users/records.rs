//! User Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{domain::columns::UnknownVariant, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// Marketplace role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Customer,
    Partner,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Partner => "partner",
            Self::Admin => "admin",
        }
    }

    /// Whether this role may list inventory.
    #[must_use]
    pub const fn can_list_products(self) -> bool {
        matches!(self, Self::Partner | Self::Admin)
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "customer" => Ok(Self::Customer),
            "partner" => Ok(Self::Partner),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownVariant::new("role", value)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Admin-gated verification state; only verified users may transact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// Whether a user in this state may ask for (re-)verification.
    #[must_use]
    pub const fn can_request_verification(self) -> bool {
        matches!(self, Self::Unverified | Self::Rejected)
    }
}

impl FromStr for VerificationStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "unverified" => Ok(Self::Unverified),
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            _ => Err(UnknownVariant::new("verification status", value)),
        }
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub role: Role,
    pub verification_status: VerificationStatus,
    pub wallet_balance: u64,
    pub suspended_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl UserRecord {
    #[must_use]
    pub const fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }

    /// Verified, active users may move money and place orders. Admins are
    /// implicitly trusted.
    #[must_use]
    pub const fn may_transact(&self) -> bool {
        !self.is_suspended()
            && (matches!(self.role, Role::Admin)
                || matches!(self.verification_status, VerificationStatus::Verified))
    }
}

/// Login lookup result.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub uuid: UserUuid,
    pub role: Role,
    pub password_hash: String,
    pub suspended_at: Option<Timestamp>,
}
