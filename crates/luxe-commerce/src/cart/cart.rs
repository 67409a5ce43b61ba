//! Cart and line item types.
//!
//! Lines are identified by (product, variant selection): the same product
//! in two sizes is two lines. Mutation is synchronous and single-threaded;
//! derived totals are recomputed on every read.

use crate::catalog::VariantSelection;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The identity key of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineKey {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Variant choices for that product.
    pub selection: VariantSelection,
}

/// A line in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub name: String,
    /// Unit price captured when the line was added.
    pub unit_price: Money,
    /// Listing image reference.
    pub image: Option<String>,
    /// Variant choices.
    pub selection: VariantSelection,
    /// Quantity, always >= 1.
    pub quantity: i64,
}

impl CartItem {
    /// Create a new line. Quantity must be positive.
    pub fn new(
        product_id: ProductId,
        name: impl Into<String>,
        unit_price: Money,
        image: Option<String>,
        selection: VariantSelection,
        quantity: i64,
    ) -> Result<Self, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        Ok(Self {
            product_id,
            name: name.into(),
            unit_price,
            image,
            selection,
            quantity,
        })
    }

    /// The identity key of this line.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            selection: self.selection.clone(),
        }
    }

    /// Line total (unit price x quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.selection == key.selection
    }
}

/// A shopping cart.
///
/// Insertion order is preserved for display. Created empty at session
/// start; cleared explicitly or after a successful receipt submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            items: Vec::new(),
            currency,
        }
    }

    /// Cart currency.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by key.
    pub fn get(&self, key: &LineKey) -> Option<&CartItem> {
        self.items.iter().find(|i| i.matches(key))
    }

    /// Add a line to the cart.
    ///
    /// If a line with the same identity key exists, its quantity grows by
    /// the candidate's quantity; otherwise the candidate is appended. No
    /// stock check happens here; stock is validated, if at all, when the
    /// order is created.
    pub fn add_item(&mut self, candidate: CartItem) -> Result<(), CommerceError> {
        if let Some(existing) = self.items.iter_mut().find(|i| i.matches(&candidate.key())) {
            existing.quantity = existing
                .quantity
                .checked_add(candidate.quantity)
                .ok_or(CommerceError::Overflow)?;
            return Ok(());
        }
        self.items.push(candidate);
        Ok(())
    }

    /// Set a line's quantity.
    ///
    /// A quantity <= 0 removes the line. Returns false (no-op) if no line
    /// matches the key.
    pub fn update_quantity(&mut self, key: &LineKey, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(key);
        }
        match self.items.iter_mut().find(|i| i.matches(key)) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns false (no-op) if no line matches the key.
    pub fn remove_item(&mut self, key: &LineKey) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| !i.matches(key));
        self.items.len() < len_before
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total item count (sum of quantities).
    pub fn total_items(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_items(&self) -> usize {
        self.items.len()
    }

    /// Subtotal: sum of line totals, computed fresh on each read.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let mut total = Money::zero(self.currency);
        for item in &self.items {
            total = total
                .try_add(&item.line_total()?)
                .ok_or_else(|| CommerceError::CurrencyMismatch {
                    expected: self.currency.code().to_string(),
                    got: item.unit_price.currency.code().to_string(),
                })?;
        }
        Ok(total)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new(Currency::USD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product: &str, size: &str, cents: i64, quantity: i64) -> CartItem {
        CartItem::new(
            ProductId::new(product),
            "Test Product",
            Money::new(cents, Currency::USD),
            None,
            VariantSelection::new().with("Size", size),
            quantity,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.subtotal().unwrap().amount_cents, 0);
    }

    #[test]
    fn test_add_same_key_accumulates_quantity() {
        // add 2 then 1 of the same (product, selection): one entry, qty 3,
        // subtotal 150.00
        let mut cart = Cart::default();
        cart.add_item(item("p1", "M", 5000, 2)).unwrap();
        cart.add_item(item("p1", "M", 5000, 1)).unwrap();

        assert_eq!(cart.unique_items(), 1);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.subtotal().unwrap().amount_cents, 15000);
    }

    #[test]
    fn test_differing_selection_is_distinct_entry() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", "M", 5000, 1)).unwrap();
        cart.add_item(item("p1", "L", 5000, 1)).unwrap();
        assert_eq!(cart.unique_items(), 2);
    }

    #[test]
    fn test_accumulation_across_many_adds() {
        let mut cart = Cart::default();
        for quantity in [1, 4, 2] {
            cart.add_item(item("p1", "M", 1000, quantity)).unwrap();
        }
        assert_eq!(cart.total_items(), 7);
    }

    #[test]
    fn test_subtotal_invariant_under_reordering() {
        let mut forward = Cart::default();
        forward.add_item(item("p1", "M", 5000, 2)).unwrap();
        forward.add_item(item("p2", "S", 3000, 1)).unwrap();
        forward.add_item(item("p3", "L", 700, 4)).unwrap();

        let mut reversed = Cart::default();
        reversed.add_item(item("p3", "L", 700, 4)).unwrap();
        reversed.add_item(item("p2", "S", 3000, 1)).unwrap();
        reversed.add_item(item("p1", "M", 5000, 2)).unwrap();

        assert_eq!(forward.subtotal().unwrap(), reversed.subtotal().unwrap());
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::default();
        let line = item("p1", "M", 1000, 1);
        let key = line.key();
        cart.add_item(line).unwrap();

        assert!(cart.update_quantity(&key, 5));
        assert_eq!(cart.total_items(), 5);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        for quantity in [0, -3] {
            let mut cart = Cart::default();
            let line = item("p1", "M", 1000, 2);
            let key = line.key();
            cart.add_item(line).unwrap();

            assert!(cart.update_quantity(&key, quantity));
            assert!(cart.is_empty());
        }
    }

    #[test]
    fn test_update_unknown_key_is_noop() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", "M", 1000, 2)).unwrap();
        let before = cart.clone();

        let absent = item("p2", "M", 1000, 1).key();
        assert!(!cart.update_quantity(&absent, 5));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_absent_key_is_noop() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", "M", 1000, 2)).unwrap();
        let before = cart.clone();

        let absent = item("p1", "L", 1000, 1).key();
        assert!(!cart.remove_item(&absent));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", "M", 1000, 2)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_zero_quantity_line_rejected() {
        assert!(CartItem::new(
            ProductId::new("p1"),
            "Test",
            Money::new(1000, Currency::USD),
            None,
            VariantSelection::new(),
            0,
        )
        .is_err());
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut cart = Cart::default();
        cart.add_item(item("p1", "M", 5000, 2)).unwrap();

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, cart);
    }
}
