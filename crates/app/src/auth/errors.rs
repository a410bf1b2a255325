//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::{PasswordError, TokenError};

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("an account with this email already exists")]
    AlreadyExists,

    #[error("{0}")]
    InvalidRegistration(&'static str),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("missing or invalid session token")]
    Unauthenticated,

    #[error("account is suspended")]
    Suspended,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("token processing error")]
    Token(#[source] TokenError),

    #[error("password processing error")]
    Password(#[source] PasswordError),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        let unique_violation = error
            .as_database_error()
            .is_some_and(|db_error| db_error.is_unique_violation());

        if unique_violation {
            return Self::AlreadyExists;
        }

        Self::Sql(error)
    }
}

impl From<TokenError> for AuthServiceError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Invalid | TokenError::Expired => Self::Unauthenticated,
            other => Self::Token(other),
        }
    }
}

impl From<PasswordError> for AuthServiceError {
    fn from(error: PasswordError) -> Self {
        match error {
            PasswordError::Mismatch => Self::InvalidCredentials,
            PasswordError::Hash => Self::Password(error),
        }
    }
}
