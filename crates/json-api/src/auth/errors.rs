//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use stylus_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::AlreadyExists => {
            StatusError::conflict().brief("An account with this email already exists")
        }
        AuthServiceError::InvalidRegistration(reason) => StatusError::bad_request().brief(reason),
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::Unauthenticated => {
            StatusError::unauthorized().brief("Missing or invalid session token")
        }
        AuthServiceError::Suspended => StatusError::forbidden().brief("Account is suspended"),
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Token(source) => {
            error!("failed to process session token: {source}");

            StatusError::internal_server_error()
        }
        AuthServiceError::Password(source) => {
            error!("failed to process password: {source}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn bad_credentials_are_unauthorized() {
        let error = into_status_error(AuthServiceError::InvalidCredentials);

        assert_eq!(error.code, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn suspended_accounts_are_forbidden() {
        let error = into_status_error(AuthServiceError::Suspended);

        assert_eq!(error.code, StatusCode::FORBIDDEN);
    }

    #[test]
    fn storage_errors_are_opaque() {
        let error = into_status_error(AuthServiceError::Sql(sqlx::Error::PoolTimedOut));

        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.brief.contains("pool"), "storage detail leaked: {}", error.brief);
    }
}
