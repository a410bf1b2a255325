//! Errors

use salvo::http::StatusError;
use tracing::error;

use stylus_app::domain::wallet::WalletServiceError;

pub(crate) fn into_status_error(error: WalletServiceError) -> StatusError {
    match error {
        WalletServiceError::NotFound => StatusError::not_found().brief("Transaction not found"),
        WalletServiceError::RecipientNotFound => {
            StatusError::not_found().brief("Recipient not found")
        }
        error @ (WalletServiceError::InvalidAmount
        | WalletServiceError::InvalidNote
        | WalletServiceError::InsufficientFunds
        | WalletServiceError::SelfTransfer) => StatusError::bad_request().brief(error.to_string()),
        WalletServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid transaction payload")
        }
        WalletServiceError::NotVerified => {
            StatusError::forbidden().brief("Account must be verified")
        }
        error @ (WalletServiceError::InvalidStatus
        | WalletServiceError::DuplicateRequest
        | WalletServiceError::BalanceOverflow) => StatusError::conflict().brief(error.to_string()),
        WalletServiceError::Sql(source) => {
            error!("wallet storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
