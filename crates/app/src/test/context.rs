//! Test context for service-level integration tests.

use std::time::Duration;

use crate::{
    auth::{JwtKeys, PgAuthService, Principal},
    database::Db,
    domain::{
        admin::PgAdminService,
        carts::PgCartsService,
        orders::PgOrdersService,
        products::{PgProductsService, ProductsService, data::NewProduct, records::ProductRecord},
        reviews::PgReviewsService,
        users::{
            PgUsersService, UsersService,
            records::{Role, UserRecord, VerificationStatus},
        },
        wallet::{PgWalletService, WalletService},
        wishlist::PgWishlistService,
    },
    settings::MarketplaceSettings,
};

use super::{
    db::TestDb,
    helpers::{new_product, new_user},
};

const TEST_JWT_SECRET: &[u8] = b"stylus-test-secret";

pub struct TestContext {
    pub db: TestDb,
    pub auth: PgAuthService,
    pub users: PgUsersService,
    pub products: PgProductsService,
    pub carts: PgCartsService,
    pub wishlist: PgWishlistService,
    pub orders: PgOrdersService,
    pub wallet: PgWalletService,
    pub reviews: PgReviewsService,
    pub admin: PgAdminService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        let keys = JwtKeys::new(TEST_JWT_SECRET, Duration::from_secs(3600))
            .expect("Failed to build test JWT keys");

        Self {
            auth: PgAuthService::new(db.clone(), keys),
            users: PgUsersService::new(db.clone()),
            products: PgProductsService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            wishlist: PgWishlistService::new(db.clone()),
            orders: PgOrdersService::new(db.clone(), MarketplaceSettings::default()),
            wallet: PgWalletService::new(db.clone()),
            reviews: PgReviewsService::new(db.clone()),
            admin: PgAdminService::new(db),
            db: test_db,
        }
    }

    pub async fn create_user(&self, role: Role, status: VerificationStatus) -> UserRecord {
        self.users
            .create_user(new_user(role, status))
            .await
            .expect("Failed to create test user")
    }

    /// Verified customer.
    pub async fn create_customer(&self) -> UserRecord {
        self.create_user(Role::Customer, VerificationStatus::Verified)
            .await
    }

    /// Verified partner.
    pub async fn create_partner(&self) -> UserRecord {
        self.create_user(Role::Partner, VerificationStatus::Verified)
            .await
    }

    pub async fn create_admin(&self) -> UserRecord {
        self.create_user(Role::Admin, VerificationStatus::Verified)
            .await
    }

    pub fn principal(&self, user: &UserRecord) -> Principal {
        Principal {
            user_uuid: user.uuid,
            role: user.role,
        }
    }

    /// Rental-only listing owned by `owner`.
    pub async fn create_listing(&self, owner: &UserRecord, name: &str) -> ProductRecord {
        self.products
            .create_product(self.principal(owner), new_product(name))
            .await
            .expect("Failed to create test listing")
    }

    /// Sale-only listing owned by `owner`.
    pub async fn create_sale_listing(&self, owner: &UserRecord, name: &str) -> ProductRecord {
        let product = NewProduct {
            rental_price_per_day: None,
            is_for_rent: false,
            is_for_sale: true,
            ..new_product(name)
        };

        self.products
            .create_product(self.principal(owner), product)
            .await
            .expect("Failed to create test sale listing")
    }

    /// Deposit `amount` into `user`'s wallet.
    pub async fn fund(&self, user: &UserRecord, amount: u64) {
        self.wallet
            .deposit(user.uuid, amount, None)
            .await
            .expect("Failed to fund test wallet");
    }
}
