//! Product types.

use crate::catalog::{resolve_selection, VariantAxis, VariantSelection};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Unit price.
    pub price: Money,
    /// Category name used for shop filtering.
    pub category: String,
    /// Image references, first one is the listing image.
    pub images: Vec<String>,
    /// Stock on hand. Informational only; the cart performs no local
    /// stock check.
    pub stock_quantity: i64,
    /// Whether the product is visible in the shop.
    pub is_active: bool,
    /// Whether the product appears on the homepage.
    pub featured: bool,
    /// Variant axes this product offers (e.g., Size, Color).
    pub axes: Vec<VariantAxis>,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Product {
    /// Create a new active product.
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: String::new(),
            price,
            category: String::new(),
            images: Vec::new(),
            stock_quantity: 0,
            is_active: true,
            featured: false,
            axes: Vec::new(),
            created_at: current_timestamp(),
        }
    }

    /// Check if the product is available for purchase.
    pub fn is_available(&self) -> bool {
        self.is_active
    }

    /// Add a variant axis.
    pub fn add_axis(&mut self, axis: VariantAxis) {
        self.axes.push(axis);
    }

    /// The image shown in listings and the cart.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Resolve a requested variant selection against this product's axes.
    ///
    /// See [`resolve_selection`] for the rules.
    pub fn resolve_selection(
        &self,
        requested: &VariantSelection,
    ) -> Result<VariantSelection, CommerceError> {
        resolve_selection(&self.axes, requested)
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
