//! Ledger Records

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    domain::{columns::UnknownVariant, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Transaction UUID
pub type TransactionUuid = TypedUuid<LedgerEntryRecord>;

/// What moved money in or out of a wallet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerEntryKind {
    Deposit,
    Withdrawal,
    Payment,
    Refund,
    Payout,
    TransferIn,
    TransferOut,
}

impl LedgerEntryKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdrawal => "withdrawal",
            Self::Payment => "payment",
            Self::Refund => "refund",
            Self::Payout => "payout",
            Self::TransferIn => "transfer_in",
            Self::TransferOut => "transfer_out",
        }
    }

    /// Whether entries of this kind add to the wallet balance.
    #[must_use]
    pub const fn is_credit(self) -> bool {
        matches!(
            self,
            Self::Deposit | Self::Refund | Self::Payout | Self::TransferIn
        )
    }
}

impl FromStr for LedgerEntryKind {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "deposit" => Ok(Self::Deposit),
            "withdrawal" => Ok(Self::Withdrawal),
            "payment" => Ok(Self::Payment),
            "refund" => Ok(Self::Refund),
            "payout" => Ok(Self::Payout),
            "transfer_in" => Ok(Self::TransferIn),
            "transfer_out" => Ok(Self::TransferOut),
            _ => Err(UnknownVariant::new("transaction kind", value)),
        }
    }
}

impl fmt::Display for LedgerEntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerEntryStatus {
    Pending,
    Completed,
    Failed,
}

impl LedgerEntryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl FromStr for LedgerEntryStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(UnknownVariant::new("transaction status", value)),
        }
    }
}

impl fmt::Display for LedgerEntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of a user's wallet ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntryRecord {
    pub uuid: TransactionUuid,
    pub user_uuid: UserUuid,
    pub kind: LedgerEntryKind,
    pub amount: u64,
    pub status: LedgerEntryStatus,

    /// Wallet balance immediately after this entry was posted.
    pub balance_after: u64,

    /// Order, withdrawal or transfer this entry belongs to.
    pub reference_uuid: Option<Uuid>,
    pub counterparty_uuid: Option<UserUuid>,
    pub description: String,
    pub idempotency_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
