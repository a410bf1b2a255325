//! Wallet service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::wallet::repository::PostingError;

#[derive(Debug, Error)]
pub enum WalletServiceError {
    #[error("transaction not found")]
    NotFound,

    #[error("amount must be greater than zero")]
    InvalidAmount,

    #[error("note is too long")]
    InvalidNote,

    #[error("insufficient wallet balance")]
    InsufficientFunds,

    #[error("account must be verified")]
    NotVerified,

    #[error("transaction has already been processed")]
    InvalidStatus,

    #[error("cannot transfer funds to yourself")]
    SelfTransfer,

    #[error("recipient not found")]
    RecipientNotFound,

    #[error("wallet balance would overflow")]
    BalanceOverflow,

    #[error("idempotency key already used")]
    DuplicateRequest,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for WalletServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::DuplicateRequest,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PostingError> for WalletServiceError {
    fn from(error: PostingError) -> Self {
        match error {
            PostingError::InsufficientFunds => Self::InsufficientFunds,
            PostingError::BalanceOverflow => Self::BalanceOverflow,
            PostingError::Sql(error) => Self::from(error),
        }
    }
}
