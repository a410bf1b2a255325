//! Wishlist service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;

use crate::{
    database::Db,
    domain::{
        products::{
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::records::UserUuid,
        wishlist::{
            errors::WishlistServiceError,
            records::{WishlistEntry, WishlistItemRecord},
            repository::PgWishlistRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgWishlistService {
    db: Db,
    repository: PgWishlistRepository,
    products: PgProductsRepository,
}

impl PgWishlistService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgWishlistRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl WishlistService for PgWishlistService {
    async fn list(&self, user: UserUuid) -> Result<Vec<WishlistEntry>, WishlistServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self.repository.list_items(&mut tx, user).await?;

        let product_uuids: Vec<ProductUuid> = items.iter().map(|item| item.product_uuid).collect();

        let mut products: FxHashMap<ProductUuid, ProductRecord> = self
            .products
            .list_products_by_uuid(&mut tx, &product_uuids)
            .await?
            .into_iter()
            .map(|product| (product.uuid, product))
            .collect();

        tx.commit().await?;

        Ok(items
            .into_iter()
            .filter_map(|item| {
                let product = products.remove(&item.product_uuid)?;

                Some(WishlistEntry { item, product })
            })
            .collect())
    }

    async fn add(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistItemRecord, WishlistServiceError> {
        let mut tx = self.db.begin().await?;

        self.products
            .get_product(&mut tx, product)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => WishlistServiceError::InvalidReference,
                other => WishlistServiceError::from(other),
            })?;

        let item = self.repository.create_item(&mut tx, user, product).await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn remove(&self, user: UserUuid, product: ProductUuid) -> Result<(), WishlistServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_item(&mut tx, user, product).await?;

        if rows_affected == 0 {
            return Err(WishlistServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait WishlistService: Send + Sync {
    /// Saved products, most recent first.
    async fn list(&self, user: UserUuid) -> Result<Vec<WishlistEntry>, WishlistServiceError>;

    async fn add(
        &self,
        user: UserUuid,
        product: ProductUuid,
    ) -> Result<WishlistItemRecord, WishlistServiceError>;

    async fn remove(&self, user: UserUuid, product: ProductUuid) -> Result<(), WishlistServiceError>;
}
