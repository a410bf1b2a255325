//! Review Records

use jiff::Timestamp;

use crate::{
    domain::{products::records::ProductUuid, users::records::UserUuid},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<ReviewRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    pub uuid: ReviewUuid,
    pub product_uuid: ProductUuid,
    pub user_uuid: UserUuid,
    pub author_name: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Aggregate rating of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReviewSummary {
    pub count: u32,

    /// Mean rating, `0.0` when there are no reviews.
    pub average_rating: f64,
}

impl ReviewSummary {
    #[must_use]
    pub fn of(reviews: &[ReviewRecord]) -> Self {
        let count = u32::try_from(reviews.len()).unwrap_or(u32::MAX);

        if count == 0 {
            return Self::default();
        }

        let total: u32 = reviews.iter().map(|review| u32::from(review.rating)).sum();

        Self {
            count,
            average_rating: f64::from(total) / f64::from(count),
        }
    }
}

/// A product's reviews, newest first, with their summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductReviews {
    pub reviews: Vec<ReviewRecord>,
    pub summary: ReviewSummary,
}
