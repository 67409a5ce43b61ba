//! Review repository over the data collaborator.

use crate::collections;
use crate::error::StoreError;
use luxe_commerce::catalog::{RatingSummary, Review};
use luxe_commerce::ids::{ProductId, UserId};
use luxe_commerce::order::{Order, OrderItem, OrderStatus};
use luxe_data::{DataClient, DataClientExt, Select};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

/// Access to product reviews.
#[derive(Clone)]
pub struct ReviewRepo {
    client: Arc<dyn DataClient>,
}

impl ReviewRepo {
    /// Create a repository over a data client.
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// Reviews for a product, newest first.
    pub async fn for_product(&self, product_id: &ProductId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .client
            .select_as(
                collections::REVIEWS,
                Select::new()
                    .eq("product_id", product_id.as_str())
                    .order_desc("created_at"),
            )
            .await?)
    }

    /// Mean rating and count for a product.
    pub async fn average_rating(
        &self,
        product_id: &ProductId,
    ) -> Result<RatingSummary, StoreError> {
        let reviews = self.for_product(product_id).await?;
        let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();
        Ok(RatingSummary::from_ratings(&ratings))
    }

    /// Whether the user has a purchase containing this product.
    ///
    /// A purchase is any order in a status from payment_submitted
    /// onward (excluding cancelled).
    pub async fn user_can_review(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
    ) -> Result<bool, StoreError> {
        let purchased: Vec<Value> = [
            OrderStatus::PaymentSubmitted,
            OrderStatus::Confirmed,
            OrderStatus::Shipped,
            OrderStatus::Completed,
        ]
        .iter()
        .map(|s| Value::from(s.as_str()))
        .collect();

        let orders: Vec<Order> = self
            .client
            .select_as(
                collections::ORDERS,
                Select::new()
                    .eq("user_id", user_id.as_str())
                    .is_in("status", purchased),
            )
            .await?;
        if orders.is_empty() {
            return Ok(false);
        }

        let order_ids: Vec<Value> = orders
            .iter()
            .map(|o| Value::from(o.id.as_str()))
            .collect();
        let items: Vec<OrderItem> = self
            .client
            .select_as(
                collections::ORDER_ITEMS,
                Select::new()
                    .eq("product_id", product_id.as_str())
                    .is_in("order_id", order_ids),
            )
            .await?;
        Ok(!items.is_empty())
    }

    /// Submit a review. One review per (product, user): resubmitting
    /// replaces the earlier rating and comment.
    pub async fn submit(&self, review: &Review) -> Result<Review, StoreError> {
        let stored = self
            .client
            .upsert_as(collections::REVIEWS, review, &["product_id", "user_id"])
            .await?;
        info!(product_id = %review.product_id, rating = review.rating, "review submitted");
        Ok(stored)
    }
}
