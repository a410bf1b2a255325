//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    auth::{AuthService, JwtKeys, PgAuthService, TokenError},
    database::{self, Db},
    domain::{
        admin::{AdminService, PgAdminService},
        carts::{CartsService, PgCartsService},
        orders::{OrdersService, PgOrdersService},
        products::{PgProductsService, ProductsService},
        reviews::{PgReviewsService, ReviewsService},
        users::{PgUsersService, UsersService},
        wallet::{PgWalletService, WalletService},
        wishlist::{PgWishlistService, WishlistService},
    },
    settings::{AuthSettings, MarketplaceSettings},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("invalid auth settings")]
    Auth(#[source] TokenError),
}

#[derive(Clone)]
pub struct AppContext {
    pub auth: Arc<dyn AuthService>,
    pub users: Arc<dyn UsersService>,
    pub products: Arc<dyn ProductsService>,
    pub carts: Arc<dyn CartsService>,
    pub wishlist: Arc<dyn WishlistService>,
    pub orders: Arc<dyn OrdersService>,
    pub wallet: Arc<dyn WalletService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub admin: Arc<dyn AdminService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the
    /// auth settings cannot produce signing keys.
    pub async fn from_database_url(
        url: &str,
        auth: &AuthSettings,
        marketplace: MarketplaceSettings,
    ) -> Result<Self, AppInitError> {
        let keys = JwtKeys::from_settings(auth).map_err(AppInitError::Auth)?;

        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool), keys, marketplace))
    }

    #[must_use]
    pub fn from_db(db: Db, keys: JwtKeys, marketplace: MarketplaceSettings) -> Self {
        Self {
            auth: Arc::new(PgAuthService::new(db.clone(), keys)),
            users: Arc::new(PgUsersService::new(db.clone())),
            products: Arc::new(PgProductsService::new(db.clone())),
            carts: Arc::new(PgCartsService::new(db.clone())),
            wishlist: Arc::new(PgWishlistService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone(), marketplace)),
            wallet: Arc::new(PgWalletService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            admin: Arc::new(PgAdminService::new(db)),
        }
    }
}
