//! Orders service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    carts::CartsServiceError,
    orders::status::{OrderItemStatus, TransitionError},
    rentals::RentalWindowError,
    wallet::repository::PostingError,
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("cart is empty")]
    EmptyCart,

    #[error("shipping address is missing {0}")]
    InvalidAddress(&'static str),

    #[error("{0}")]
    InvalidItem(&'static str),

    #[error(transparent)]
    InvalidWindow(#[from] RentalWindowError),

    #[error("product is no longer available")]
    Unavailable,

    #[error("insufficient wallet balance")]
    InsufficientFunds,

    #[error("account must be verified")]
    NotVerified,

    #[error("cannot move an item from {from} to {to}")]
    InvalidTransition {
        from: OrderItemStatus,
        to: OrderItemStatus,
    },

    #[error("not allowed to perform this action")]
    Forbidden,

    #[error("wallet balance would overflow")]
    BalanceOverflow,

    #[error("related resource not found")]
    InvalidReference,

    #[error("invalid data")]
    InvalidData,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::ForeignKeyViolation) => Self::InvalidReference,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<PostingError> for OrdersServiceError {
    fn from(error: PostingError) -> Self {
        match error {
            PostingError::InsufficientFunds => Self::InsufficientFunds,
            PostingError::BalanceOverflow => Self::BalanceOverflow,
            PostingError::Sql(error) => Self::from(error),
        }
    }
}

impl From<TransitionError> for OrdersServiceError {
    fn from(error: TransitionError) -> Self {
        match error {
            TransitionError::Illegal { from, to } => Self::InvalidTransition { from, to },
            TransitionError::NotPermitted(_) => Self::Forbidden,
        }
    }
}

/// Re-validation of cart lines at checkout reports in order terms.
impl From<CartsServiceError> for OrdersServiceError {
    fn from(error: CartsServiceError) -> Self {
        match error {
            CartsServiceError::InvalidItem(reason) => Self::InvalidItem(reason),
            CartsServiceError::InvalidWindow(error) => Self::InvalidWindow(error),
            CartsServiceError::OwnProduct => Self::Forbidden,
            CartsServiceError::Sql(error) => Self::Sql(error),
            CartsServiceError::Unavailable
            | CartsServiceError::NotFound
            | CartsServiceError::ProductNotFound
            | CartsServiceError::AlreadyExists
            | CartsServiceError::InvalidReference
            | CartsServiceError::MissingRequiredData
            | CartsServiceError::InvalidData => Self::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_errors_map_to_conflict_or_forbidden() {
        let illegal = OrdersServiceError::from(TransitionError::Illegal {
            from: OrderItemStatus::Completed,
            to: OrderItemStatus::Shipped,
        });

        assert!(matches!(
            illegal,
            OrdersServiceError::InvalidTransition { .. }
        ));

        let denied =
            OrdersServiceError::from(TransitionError::NotPermitted(OrderItemStatus::Accepted));

        assert!(matches!(denied, OrdersServiceError::Forbidden));
    }

    #[test]
    fn insufficient_funds_carries_over() {
        assert!(matches!(
            OrdersServiceError::from(PostingError::InsufficientFunds),
            OrdersServiceError::InsufficientFunds
        ));
    }
}
