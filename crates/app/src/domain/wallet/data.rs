//! Wallet Data

use crate::domain::{
    pagination::Page,
    users::records::UserUuid,
    wallet::records::{LedgerEntryKind, LedgerEntryStatus},
};

/// Longest note accepted on a transfer.
pub const MAX_NOTE_LEN: usize = 500;

/// Wallet-to-wallet transfer request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub recipient: UserUuid,
    pub amount: u64,
    pub note: Option<String>,
    pub idempotency_key: Option<String>,
}

/// Admin listing filter over every ledger entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub user: Option<UserUuid>,
    pub kind: Option<LedgerEntryKind>,
    pub status: Option<LedgerEntryStatus>,
    pub page: Page,
}
