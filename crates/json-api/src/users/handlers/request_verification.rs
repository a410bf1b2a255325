//! Request Verification Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, me::UserResponse},
};

/// Request Verification Handler
///
/// Moves an unverified or rejected account to `pending` for admin review.
#[endpoint(
    tags("users"),
    summary = "Request Verification",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Verification requested"),
        (status_code = StatusCode::CONFLICT, description = "Already pending or verified"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let user = state
        .app
        .users
        .request_verification(principal.user_uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stylus_app::domain::users::{
        UsersServiceError,
        records::{Role, VerificationStatus},
    };

    use crate::test_helpers::{PARTNER_UUID, TestApp, make_user, partner};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service_as(
            partner(),
            Router::with_path("users/me/verification").post(handler),
        )
    }

    #[tokio::test]
    async fn test_request_verification_returns_pending_account() -> TestResult {
        let mut app = TestApp::new();

        app.users
            .expect_request_verification()
            .once()
            .withf(|user| *user == PARTNER_UUID)
            .return_once(|uuid| {
                let mut user = make_user(uuid, Role::Partner);
                user.verification_status = VerificationStatus::Pending;
                Ok(user)
            });

        let mut res = TestClient::post("http://example.com/users/me/verification")
            .send(&make_service(app))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.verification_status, "pending");

        Ok(())
    }

    #[tokio::test]
    async fn test_already_pending_returns_409() -> TestResult {
        let mut app = TestApp::new();

        app.users
            .expect_request_verification()
            .once()
            .return_once(|_| Err(UsersServiceError::InvalidStatus));

        let res = TestClient::post("http://example.com/users/me/verification")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
