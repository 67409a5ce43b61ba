//! The session cart store.
//!
//! An explicitly owned handle the views receive by injection, rather
//! than an implicit global. Lifecycle: created empty at session start,
//! cleared on explicit clear or after a successful receipt submission.
//! Mutation is synchronous and single-threaded, so there is no locking.

use crate::error::StoreError;
use luxe_commerce::cart::{Cart, CartItem, CartTotals, LineKey, PricingRules};
use luxe_commerce::catalog::{Product, VariantSelection};
use luxe_commerce::money::Money;

/// The authoritative in-session cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    cart: Cart,
}

impl CartStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product to the cart.
    ///
    /// The requested variant selection is validated against the product's
    /// declared axes first; a validation failure blocks the add and
    /// leaves the cart untouched. Merging with an existing line follows
    /// the identity key (product, resolved selection).
    pub fn add(
        &mut self,
        product: &Product,
        selection: VariantSelection,
        quantity: i64,
    ) -> Result<(), StoreError> {
        let resolved = product.resolve_selection(&selection)?;
        let item = CartItem::new(
            product.id.clone(),
            product.name.clone(),
            product.price,
            product.primary_image().map(String::from),
            resolved,
            quantity,
        )?;
        self.cart.add_item(item)?;
        Ok(())
    }

    /// Set a line's quantity; <= 0 removes the line. No-op when the key
    /// is absent.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        self.cart.update_quantity(key, quantity)
    }

    /// Remove a line. No-op when the key is absent.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        self.cart.remove_item(key)
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.cart.clear();
    }

    /// The underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        self.cart.items()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Total item count shown on the cart badge.
    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    /// Subtotal over all lines, computed fresh.
    pub fn subtotal(&self) -> Result<Money, StoreError> {
        Ok(self.cart.subtotal()?)
    }

    /// Full order-total breakdown under the given pricing rules.
    pub fn totals(&self, rules: &PricingRules) -> Result<CartTotals, StoreError> {
        Ok(rules.totals(self.cart.subtotal()?)?)
    }

    /// Serialize for the host's session storage.
    pub fn snapshot(&self) -> Result<String, StoreError> {
        serde_json::to_string(&self.cart)
            .map_err(|e| StoreError::External(luxe_data::DataError::from(e)))
    }

    /// Restore from a session-storage snapshot.
    pub fn restore(snapshot: &str) -> Result<Self, StoreError> {
        let cart: Cart = serde_json::from_str(snapshot)
            .map_err(|e| StoreError::External(luxe_data::DataError::from(e)))?;
        Ok(Self { cart })
    }
}
