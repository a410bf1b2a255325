//! User Index Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use stylus_app::domain::users::{
    data::UserFilter,
    records::{Role, VerificationStatus},
};

use crate::{
    extensions::*,
    state::State,
    users::{errors::into_status_error, me::UserResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UsersResponse {
    pub users: Vec<UserResponse>,
}

/// User Index Handler
///
/// Lists accounts, newest first. Admin only.
#[endpoint(
    tags("admin"),
    summary = "List Users",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    role: QueryParam<String, false>,
    verification_status: QueryParam<String, false>,
    limit: QueryParam<u32, false>,
    offset: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<UsersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = UserFilter {
        role: role
            .into_inner()
            .map(|role| role.parse::<Role>())
            .transpose()
            .or_400("unknown role")?,
        verification_status: verification_status
            .into_inner()
            .map(|status| status.parse::<VerificationStatus>())
            .transpose()
            .or_400("unknown verification status")?,
        page: (limit, offset).into_page(),
    };

    let users = state
        .app
        .users
        .list_users(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use stylus_app::domain::{pagination::Page, users::records::UserUuid};

    use crate::test_helpers::{TestApp, admin, make_user};

    use super::*;

    fn make_service(app: TestApp) -> Service {
        app.service_as(admin(), Router::with_path("users").get(handler))
    }

    #[tokio::test]
    async fn test_filters_and_page_are_forwarded() -> TestResult {
        let mut app = TestApp::new();

        app.users
            .expect_list_users()
            .once()
            .withf(|filter| {
                *filter
                    == UserFilter {
                        role: Some(Role::Partner),
                        verification_status: Some(VerificationStatus::Pending),
                        page: Page::new(Some(10), Some(20)),
                    }
            })
            .return_once(|_| Ok(vec![make_user(UserUuid::new(), Role::Partner)]));

        let mut res = TestClient::get(
            "http://example.com/users?role=partner&verification_status=pending&limit=10&offset=20",
        )
        .send(&make_service(app))
        .await;

        let body: UsersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.users.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_role_filter_returns_400() -> TestResult {
        let mut app = TestApp::new();

        app.users.expect_list_users().never();

        let res = TestClient::get("http://example.com/users?role=owner")
            .send(&make_service(app))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
