//! Errors

use salvo::http::StatusError;
use tracing::error;

use stylus_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::EmptyCart => StatusError::bad_request().brief("Cart is empty"),
        error @ (OrdersServiceError::InvalidAddress(_)
        | OrdersServiceError::InvalidItem(_)
        | OrdersServiceError::InvalidWindow(_)
        | OrdersServiceError::InsufficientFunds) => {
            StatusError::bad_request().brief(error.to_string())
        }
        OrdersServiceError::InvalidReference | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Unavailable => {
            StatusError::conflict().brief("Product is no longer available")
        }
        error @ OrdersServiceError::InvalidTransition { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::BalanceOverflow => {
            StatusError::conflict().brief("Wallet balance would overflow")
        }
        OrdersServiceError::NotVerified => {
            StatusError::forbidden().brief("Account must be verified")
        }
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Not allowed to perform this action")
        }
        OrdersServiceError::Sql(source) => {
            error!("orders storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
