//! Product review types.

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId, UserId};
use serde::{Deserialize, Serialize};

/// A customer review. One review per (product, user); resubmitting
/// replaces the earlier one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    /// Unique review identifier.
    pub id: ReviewId,
    /// Reviewed product.
    pub product_id: ProductId,
    /// Reviewing user.
    pub user_id: UserId,
    /// Rating, 1 to 5.
    pub rating: i32,
    /// Optional comment text.
    pub comment: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Review {
    /// Create a new review, validating the rating range.
    pub fn new(
        product_id: ProductId,
        user_id: UserId,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Self, CommerceError> {
        if !(1..=5).contains(&rating) {
            return Err(CommerceError::InvalidRating(rating));
        }
        Ok(Self {
            id: ReviewId::generate(),
            product_id,
            user_id,
            rating,
            comment,
            created_at: current_timestamp(),
        })
    }
}

/// Aggregate rating for a product. Display-only, so a float mean is fine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingSummary {
    /// Mean rating, 0.0 when there are no reviews.
    pub average: f64,
    /// Number of reviews.
    pub count: usize,
}

impl RatingSummary {
    /// Summarize a list of ratings.
    pub fn from_ratings(ratings: &[i32]) -> Self {
        if ratings.is_empty() {
            return Self::default();
        }
        let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
        Self {
            average: sum as f64 / ratings.len() as f64,
            count: ratings.len(),
        }
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
