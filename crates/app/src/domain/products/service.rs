//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        products::{
            data::{NewProduct, ProductFilter, ProductUpdate, validate_listing},
            errors::ProductsServiceError,
            records::{ProductRecord, ProductUuid},
            repository::PgProductsRepository,
        },
        users::{records::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
    users: PgUsersRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
            users: PgUsersRepository::new(),
        }
    }
}

fn ensure_may_manage(actor: Principal, product: &ProductRecord) -> Result<(), ProductsServiceError> {
    if actor.is_admin() || product.owner_uuid == actor.user_uuid {
        Ok(())
    } else {
        Err(ProductsServiceError::Forbidden)
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx, &filter).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    async fn list_owned_products(
        &self,
        owner: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_owned_products(&mut tx, owner).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn create_product(
        &self,
        actor: Principal,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError> {
        validate_listing(
            &product.name,
            &product.brand,
            &product.category,
            product.rental_price_per_day,
            product.sale_price,
            product.is_for_rent,
            product.is_for_sale,
        )
        .map_err(ProductsServiceError::InvalidListing)?;

        let mut tx = self.db.begin().await?;

        let owner = self.users.get_user(&mut tx, actor.user_uuid).await?;

        if !owner.role.can_list_products() {
            return Err(ProductsServiceError::Forbidden);
        }

        if !owner.may_transact() {
            return Err(ProductsServiceError::NotVerified);
        }

        let created = self
            .repository
            .create_product(&mut tx, owner.uuid, &product)
            .await?;

        tx.commit().await?;

        info!(product = %created.uuid, owner = %created.owner_uuid, "product listed");

        Ok(created)
    }

    async fn update_product(
        &self,
        actor: Principal,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_product(&mut tx, product).await?;

        ensure_may_manage(actor, &current)?;

        let merged = update.apply(&current);

        validate_listing(
            &merged.name,
            &merged.brand,
            &merged.category,
            merged.rental_price_per_day,
            merged.sale_price,
            merged.is_for_rent,
            merged.is_for_sale,
        )
        .map_err(ProductsServiceError::InvalidListing)?;

        let updated = self.repository.update_product(&mut tx, &merged).await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_product(
        &self,
        actor: Principal,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.repository.lock_product(&mut tx, product).await?;

        ensure_may_manage(actor, &current)?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(product = %product, "product delisted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Search the active catalog.
    async fn list_products(
        &self,
        filter: ProductFilter,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<ProductRecord, ProductsServiceError>;

    /// All undeleted products listed by `owner`, including sold ones.
    async fn list_owned_products(
        &self,
        owner: UserUuid,
    ) -> Result<Vec<ProductRecord>, ProductsServiceError>;

    /// List a new product owned by the actor.
    async fn create_product(
        &self,
        actor: Principal,
        product: NewProduct,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Edit a product. Only its owner or an admin may do so.
    async fn update_product(
        &self,
        actor: Principal,
        product: ProductUuid,
        update: ProductUpdate,
    ) -> Result<ProductRecord, ProductsServiceError>;

    /// Soft-delete a product. Only its owner or an admin may do so.
    async fn delete_product(
        &self,
        actor: Principal,
        product: ProductUuid,
    ) -> Result<(), ProductsServiceError>;
}
