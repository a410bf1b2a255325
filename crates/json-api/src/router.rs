//! App Router

use salvo::Router;

use crate::{
    admin, auth, carts, healthcheck, orders, products, reviews, transactions, users, wishlist,
};

/// Every route of the API. Global middleware is attached by the caller.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(
            Router::with_path("api")
                .push(users_router())
                .push(products_router())
                .push(cart_router())
                .push(wishlist_router())
                .push(orders_router())
                .push(transactions_router())
                .push(reviews_router())
                .push(
                    Router::with_path("admin/stats")
                        .hoop(auth::middleware::handler)
                        .hoop(auth::middleware::require_admin)
                        .get(admin::stats::handler),
                ),
        )
}

fn authed() -> Router {
    Router::new().hoop(auth::middleware::handler)
}

fn admin_only() -> Router {
    Router::new().hoop(auth::middleware::require_admin)
}

fn users_router() -> Router {
    Router::with_path("users")
        .push(Router::with_path("register").post(users::register::handler))
        .push(Router::with_path("login").post(users::login::handler))
        .push(
            authed()
                .push(
                    Router::with_path("me")
                        .get(users::me::handler)
                        .put(users::update_me::handler)
                        .push(
                            Router::with_path("verification")
                                .post(users::request_verification::handler),
                        ),
                )
                .push(admin_only().get(users::index::handler))
                .push(
                    Router::with_path("{user}")
                        .get(users::get::handler)
                        .push(
                            admin_only()
                                .path("verification")
                                .put(users::verification::handler),
                        )
                        .push(
                            admin_only()
                                .path("suspension")
                                .put(users::suspension::handler),
                        ),
                ),
        )
}

fn products_router() -> Router {
    Router::with_path("products")
        .get(products::index::handler)
        .push(
            authed()
                .post(products::create::handler)
                .push(Router::with_path("mine").get(products::mine::handler))
                .push(
                    Router::with_path("{product}")
                        .put(products::update::handler)
                        .delete(products::delete::handler),
                ),
        )
        .push(Router::with_path("{product}").get(products::get::handler))
}

fn cart_router() -> Router {
    authed()
        .path("cart")
        .get(carts::get::handler)
        .delete(carts::clear::handler)
        .push(
            Router::with_path("items")
                .post(carts::items::create::handler)
                .push(
                    Router::with_path("{item}")
                        .put(carts::items::update::handler)
                        .delete(carts::items::delete::handler),
                ),
        )
}

fn wishlist_router() -> Router {
    authed()
        .path("wishlist")
        .get(wishlist::index::handler)
        .post(wishlist::create::handler)
        .push(Router::with_path("{product}").delete(wishlist::delete::handler))
}

fn orders_router() -> Router {
    authed()
        .path("orders")
        .get(orders::index::handler)
        .post(orders::create::handler)
        .push(admin_only().path("all").get(orders::all::handler))
        .push(Router::with_path("partner/items").get(orders::partner_items::handler))
        .push(Router::with_path("items/{item}/status").put(orders::update_status::handler))
        .push(Router::with_path("{order}").get(orders::get::handler))
}

fn transactions_router() -> Router {
    authed()
        .path("transactions")
        .get(transactions::index::handler)
        .push(admin_only().path("all").get(transactions::all::handler))
        .push(Router::with_path("balance").get(transactions::balance::handler))
        .push(Router::with_path("deposit").post(transactions::deposit::handler))
        .push(Router::with_path("withdraw").post(transactions::withdraw::handler))
        .push(Router::with_path("transfer").post(transactions::transfer::handler))
        .push(
            Router::with_path("{transaction}")
                .get(transactions::get::handler)
                .push(
                    admin_only()
                        .path("process")
                        .put(transactions::process::handler),
                ),
        )
}

fn reviews_router() -> Router {
    Router::with_path("reviews")
        .push(Router::with_path("product/{product}").get(reviews::product::handler))
        .push(
            authed()
                .post(reviews::create::handler)
                .push(Router::with_path("{review}").delete(reviews::delete::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::AUTHORIZATION,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use stylus_app::auth::AuthServiceError;

    use crate::test_helpers::{TestApp, admin, customer};

    use super::*;

    fn signed_in_as(app: &mut TestApp, principal: stylus_app::auth::Principal) {
        app.auth
            .expect_authenticate_bearer()
            .withf(|token| token == "valid")
            .returning(move |_| Ok(principal));
    }

    #[tokio::test]
    async fn test_catalog_is_public() -> TestResult {
        let mut app = TestApp::new();

        app.products
            .expect_list_products()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/api/products")
            .send(&app.public_service(app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_cart_requires_a_token() -> TestResult {
        let mut app = TestApp::new();

        app.carts.expect_get_cart().never();

        let res = TestClient::get("http://example.com/api/cart")
            .send(&app.public_service(app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() -> TestResult {
        let mut app = TestApp::new();

        app.auth
            .expect_authenticate_bearer()
            .once()
            .return_once(|_| Err(AuthServiceError::Unauthenticated));

        let res = TestClient::get("http://example.com/api/orders")
            .add_header(AUTHORIZATION, "Bearer stale", true)
            .send(&app.public_service(app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_routes_reject_customers() -> TestResult {
        let mut app = TestApp::new();

        signed_in_as(&mut app, customer());
        app.orders.expect_list_all_orders().never();
        app.wallet.expect_list_all_transactions().never();
        app.admin.expect_stats().never();

        let service = app.public_service(app_router());

        for url in [
            "http://example.com/api/orders/all",
            "http://example.com/api/transactions/all",
            "http://example.com/api/admin/stats",
            "http://example.com/api/users",
        ] {
            let res = TestClient::get(url)
                .add_header(AUTHORIZATION, "Bearer valid", true)
                .send(&service)
                .await;

            assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN), "{url}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_reaches_stats() -> TestResult {
        let mut app = TestApp::new();

        signed_in_as(&mut app, admin());
        app.admin
            .expect_stats()
            .once()
            .return_once(|| Ok(Default::default()));

        let res = TestClient::get("http://example.com/api/admin/stats")
            .add_header(AUTHORIZATION, "Bearer valid", true)
            .send(&app.public_service(app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_mine_is_not_captured_by_product_lookup() -> TestResult {
        let mut app = TestApp::new();

        signed_in_as(&mut app, customer());
        app.products.expect_get_product().never();
        app.products
            .expect_list_owned_products()
            .once()
            .return_once(|_| Ok(Vec::new()));

        let mut res = TestClient::get("http://example.com/api/products/mine")
            .add_header(AUTHORIZATION, "Bearer valid", true)
            .send(&app.public_service(app_router()))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.get("products"), Some(&serde_json::json!([])));

        Ok(())
    }
}
