//! Set Suspension Handler

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

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, me::UserResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SuspensionRequest {
    /// `true` to suspend, `false` to reinstate
    pub suspended: bool,
}

/// Set Suspension Handler
///
/// Suspended users cannot log in or use existing sessions.
#[endpoint(
    tags("admin"),
    summary = "Suspend or Reinstate User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Suspension updated"),
        (status_code = StatusCode::FORBIDDEN, description = "Admins cannot be suspended"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<SuspensionRequest>,
    depot: &mut Depot,
) -> Result<Json<UserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let user = state
        .app
        .users
        .set_suspended(user.into_inner().into(), json.into_inner().suspended)
        .await
        .map_err(into_status_error)?;

    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use stylus_app::domain::users::{UsersServiceError, records::Role};

    use crate::test_helpers::{ADMIN_UUID, CUSTOMER_UUID, TestApp, admin, make_user};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service_as(admin(), Router::with_path("users/{user}/suspension").put(handler))
    }

    #[tokio::test]
    async fn test_suspend_customer() -> TestResult {
        let mut app = TestApp::new();

        app.users
            .expect_set_suspended()
            .once()
            .withf(|user, suspended| *user == CUSTOMER_UUID && *suspended)
            .return_once(|uuid, _| {
                let mut user = make_user(uuid, Role::Customer);
                user.suspended_at = Some(Timestamp::UNIX_EPOCH);
                Ok(user)
            });

        let mut res = TestClient::put(format!("http://example.com/users/{CUSTOMER_UUID}/suspension"))
            .json(&json!({ "suspended": true }))
            .send(&make_service(app))
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.suspended_at.is_some(), "expected a suspension timestamp");

        Ok(())
    }

    #[tokio::test]
    async fn test_suspending_an_admin_returns_403() -> TestResult {
        let mut app = TestApp::new();

        app.users
            .expect_set_suspended()
            .once()
            .return_once(|_, _| Err(UsersServiceError::Forbidden));

        let res = TestClient::put(format!("http://example.com/users/{ADMIN_UUID}/suspension"))
            .json(&json!({ "suspended": true }))
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
