//! Test helpers.

use std::sync::Arc;

use jiff::{Timestamp, civil::date};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use stylus_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        admin::MockAdminService,
        carts::{
            MockCartsService,
            records::{CartItemRecord, CartItemUuid},
        },
        orders::MockOrdersService,
        products::{
            MockProductsService,
            records::{ItemKind, ProductRecord, ProductStatus, ProductUuid},
        },
        rentals::RentalWindow,
        reviews::MockReviewsService,
        users::{
            MockUsersService,
            records::{Role, UserRecord, UserUuid, VerificationStatus},
        },
        wallet::MockWalletService,
        wishlist::MockWishlistService,
    },
};

use crate::state::State;

pub(crate) const CUSTOMER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));
pub(crate) const PARTNER_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(2));
pub(crate) const ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(3));

pub(crate) fn customer() -> Principal {
    Principal {
        user_uuid: CUSTOMER_UUID,
        role: Role::Customer,
    }
}

pub(crate) fn partner() -> Principal {
    Principal {
        user_uuid: PARTNER_UUID,
        role: Role::Partner,
    }
}

pub(crate) fn admin() -> Principal {
    Principal {
        user_uuid: ADMIN_UUID,
        role: Role::Admin,
    }
}

/// One mock per service. Calls without a matching expectation fail the test.
pub(crate) struct TestApp {
    pub(crate) auth: MockAuthService,
    pub(crate) users: MockUsersService,
    pub(crate) products: MockProductsService,
    pub(crate) carts: MockCartsService,
    pub(crate) wishlist: MockWishlistService,
    pub(crate) orders: MockOrdersService,
    pub(crate) wallet: MockWalletService,
    pub(crate) reviews: MockReviewsService,
    pub(crate) admin: MockAdminService,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        Self {
            auth: MockAuthService::new(),
            users: MockUsersService::new(),
            products: MockProductsService::new(),
            carts: MockCartsService::new(),
            wishlist: MockWishlistService::new(),
            orders: MockOrdersService::new(),
            wallet: MockWalletService::new(),
            reviews: MockReviewsService::new(),
            admin: MockAdminService::new(),
        }
    }

    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            users: Arc::new(self.users),
            products: Arc::new(self.products),
            carts: Arc::new(self.carts),
            wishlist: Arc::new(self.wishlist),
            orders: Arc::new(self.orders),
            wallet: Arc::new(self.wallet),
            reviews: Arc::new(self.reviews),
            admin: Arc::new(self.admin),
        })
    }

    /// Serve `route` without an authenticated caller.
    pub(crate) fn public_service(self, route: Router) -> Service {
        Service::new(Router::new().hoop(inject(self.into_state())).push(route))
    }

    /// Serve `route` as if the auth middleware had resolved `principal`.
    pub(crate) fn service_as(self, principal: Principal, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject(principal))
                .push(route),
        )
    }
}

pub(crate) fn make_user(uuid: UserUuid, role: Role) -> UserRecord {
    UserRecord {
        uuid,
        email: format!("{role}@example.com"),
        name: format!("Test {role}"),
        phone: None,
        address: None,
        bio: None,
        role,
        verification_status: VerificationStatus::Verified,
        wallet_balance: 10_000,
        suspended_at: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// A rental listing owned by [`PARTNER_UUID`].
pub(crate) fn make_product(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        owner_uuid: PARTNER_UUID,
        name: "Silk Gown".to_string(),
        description: "Floor length".to_string(),
        brand: "Maison Test".to_string(),
        category: "dresses".to_string(),
        sizes: vec!["S".to_string(), "M".to_string()],
        images: Vec::new(),
        rental_price_per_day: Some(1_500),
        sale_price: 60_000,
        is_for_rent: true,
        is_for_sale: false,
        rental_count: 0,
        status: ProductStatus::Active,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

/// A three day rental of `product` in the customer's cart.
pub(crate) fn make_cart_item(uuid: CartItemUuid, product: ProductUuid) -> CartItemRecord {
    CartItemRecord {
        uuid,
        user_uuid: CUSTOMER_UUID,
        product_uuid: product,
        kind: ItemKind::Rental,
        size: Some("M".to_string()),
        rental_window: RentalWindow::new(date(2030, 6, 1), date(2030, 6, 3)).ok(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
