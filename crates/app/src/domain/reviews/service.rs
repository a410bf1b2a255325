//! Reviews service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    auth::Principal,
    database::Db,
    domain::{
        products::{records::ProductUuid, repository::PgProductsRepository},
        reviews::{
            data::NewReview,
            errors::ReviewsServiceError,
            records::{ProductReviews, ReviewRecord, ReviewSummary, ReviewUuid},
            repository::PgReviewsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgReviewsService {
    db: Db,
    repository: PgReviewsRepository,
    products: PgProductsRepository,
}

impl PgReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgReviewsRepository::new(),
            products: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for PgReviewsService {
    async fn list_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductReviews, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_product_reviews(&mut tx, product).await?;

        tx.commit().await?;

        let summary = ReviewSummary::of(&reviews);

        Ok(ProductReviews { reviews, summary })
    }

    async fn create_review(
        &self,
        author: Principal,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError> {
        review.validate().map_err(ReviewsServiceError::InvalidReview)?;

        let mut tx = self.db.begin().await?;

        let product = self
            .products
            .get_product(&mut tx, review.product_uuid)
            .await
            .map_err(|error| match error {
                sqlx::Error::RowNotFound => ReviewsServiceError::ProductNotFound,
                other => ReviewsServiceError::from(other),
            })?;

        if product.owner_uuid == author.user_uuid {
            return Err(ReviewsServiceError::Forbidden);
        }

        let created = self
            .repository
            .create_review(&mut tx, author.user_uuid, &review)
            .await?;

        tx.commit().await?;

        info!(review = %created.uuid, product = %created.product_uuid, "review posted");

        Ok(created)
    }

    async fn delete_review(
        &self,
        actor: Principal,
        review: ReviewUuid,
    ) -> Result<(), ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let existing = self.repository.get_review(&mut tx, review).await?;

        if !actor.is_admin() && existing.user_uuid != actor.user_uuid {
            return Err(ReviewsServiceError::Forbidden);
        }

        self.repository.delete_review(&mut tx, review).await?;

        tx.commit().await?;

        info!(review = %review, "review deleted");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Reviews of a product, newest first, with their summary.
    async fn list_for_product(
        &self,
        product: ProductUuid,
    ) -> Result<ProductReviews, ReviewsServiceError>;

    /// One review per author per product. Owners cannot review their own
    /// products.
    async fn create_review(
        &self,
        author: Principal,
        review: NewReview,
    ) -> Result<ReviewRecord, ReviewsServiceError>;

    /// Authors may delete their own reviews; admins may delete any.
    async fn delete_review(
        &self,
        actor: Principal,
        review: ReviewUuid,
    ) -> Result<(), ReviewsServiceError>;
}
