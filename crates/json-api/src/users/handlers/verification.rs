//! Set Verification Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stylus_app::domain::users::records::VerificationStatus;

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, me::UserResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerificationRequest {
    /// `unverified`, `pending`, `verified` or `rejected`
    pub status: String,
}

/// Set Verification Status Handler
#[endpoint(
    tags("admin"),
    summary = "Set Verification Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<VerificationRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let status = json
        .into_inner()
        .status
        .parse::<VerificationStatus>()
        .or_400("unknown verification status")?;

    let user = state
        .app
        .users
        .set_verification_status(user.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stylus_app::domain::users::{UsersServiceError, records::Role};

    use crate::test_helpers::{PARTNER_UUID, TestApp, admin, make_user};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service_as(
            admin(),
            Router::with_path("users/{user}/verification").put(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_verifies_partner() -> TestResult {
        let mut app = TestApp::new();

        app.users
            .expect_set_verification_status()
            .once()
            .withf(|user, status| *user == PARTNER_UUID && *status == VerificationStatus::Verified)
            .return_once(|uuid, _| Ok(make_user(uuid, Role::Partner)));

        let mut res = TestClient::put(format!("http://example.com/users/{PARTNER_UUID}/verification"))
            .json(&json!({ "status": "verified" }))
            .send(&make_service(app))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.verification_status, "verified");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_user_returns_404() -> TestResult {
        let mut app = TestApp::new();

        app.users
            .expect_set_verification_status()
            .once()
            .return_once(|_, _| Err(UsersServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/users/{}/verification", Uuid::now_v7()))
            .json(&json!({ "status": "rejected" }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
