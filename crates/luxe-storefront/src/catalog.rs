//! Product repository over the data collaborator.

use crate::collections;
use crate::error::StoreError;
use luxe_commerce::catalog::Product;
use luxe_commerce::ids::ProductId;
use luxe_data::{DataClient, DataClientExt, Select};
use std::sync::Arc;
use tracing::{debug, info};

/// Read and admin-CRUD access to the product catalog.
#[derive(Clone)]
pub struct ProductRepo {
    client: Arc<dyn DataClient>,
}

impl ProductRepo {
    /// Create a repository over a data client.
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// All active products, newest first.
    pub async fn fetch_active(&self) -> Result<Vec<Product>, StoreError> {
        let products = self
            .client
            .select_as(
                collections::PRODUCTS,
                Select::new().eq("is_active", true).order_desc("created_at"),
            )
            .await?;
        debug!(count = products.len(), "fetched active products");
        Ok(products)
    }

    /// A single active product; absence renders the not-found view.
    pub async fn fetch_by_id(&self, id: &ProductId) -> Result<Product, StoreError> {
        self.client
            .select_one_as(
                collections::PRODUCTS,
                Select::new().eq("id", id.as_str()).eq("is_active", true),
            )
            .await?
            .ok_or_else(|| StoreError::not_found("product", id.as_str()))
    }

    /// Featured products for the homepage, newest first, at most six.
    pub async fn fetch_featured(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .client
            .select_as(
                collections::PRODUCTS,
                Select::new()
                    .eq("is_active", true)
                    .eq("featured", true)
                    .order_desc("created_at")
                    .limit(6),
            )
            .await?)
    }

    /// Admin: add a product to the catalog.
    pub async fn create(&self, product: &Product) -> Result<Product, StoreError> {
        let stored = self.client.insert_as(collections::PRODUCTS, product).await?;
        info!(product_id = %stored.id, "created product");
        Ok(stored)
    }

    /// Admin: replace a product's fields.
    pub async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let changed = self
            .client
            .update(
                collections::PRODUCTS,
                Select::new().eq("id", product.id.as_str()),
                serde_json::to_value(product).map_err(luxe_data::DataError::from)?,
            )
            .await?;
        if changed == 0 {
            return Err(StoreError::not_found("product", product.id.as_str()));
        }
        info!(product_id = %product.id, "updated product");
        Ok(())
    }

    /// Admin: hide a product from the shop without deleting its history.
    pub async fn deactivate(&self, id: &ProductId) -> Result<(), StoreError> {
        let changed = self
            .client
            .update(
                collections::PRODUCTS,
                Select::new().eq("id", id.as_str()),
                serde_json::json!({ "is_active": false }),
            )
            .await?;
        if changed == 0 {
            return Err(StoreError::not_found("product", id.as_str()));
        }
        info!(product_id = %id, "deactivated product");
        Ok(())
    }
}
