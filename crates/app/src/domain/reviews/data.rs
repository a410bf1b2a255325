//! Review Data

use crate::domain::{products::records::ProductUuid, reviews::records::ReviewUuid};

/// Longest comment accepted on a review, in characters.
pub const MAX_COMMENT_LEN: usize = 2_000;

/// New Review Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub product_uuid: ProductUuid,
    pub rating: u8,
    pub comment: String,
}

impl NewReview {
    /// # Errors
    ///
    /// Returns a reason when the rating is outside 1 to 5 or the comment is
    /// too long.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(1..=5).contains(&self.rating) {
            return Err("rating must be between 1 and 5");
        }

        if self.comment.chars().count() > MAX_COMMENT_LEN {
            return Err("comment is too long");
        }

        Ok(())
    }
}
