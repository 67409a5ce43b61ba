//! E-commerce domain types and logic for the LUXE storefront.
//!
//! This crate holds the self-contained, deterministic core:
//!
//! - **Catalog**: products, variant axes, reviews
//! - **Cart**: line items keyed by (product, variant selection)
//! - **Pricing**: shipping, tax, and grand-total calculation
//! - **Orders**: orders, order items, bank-transfer payments
//!
//! All persistence, auth, and file storage live behind the collaborator
//! traits in `luxe-data`; nothing here performs I/O.
//!
//! # Example
//!
//! ```rust
//! use luxe_commerce::prelude::*;
//!
//! let mut cart = Cart::default();
//! cart.add_item(CartItem::new(
//!     ProductId::new("prod-1"),
//!     "Silk Scarf",
//!     Money::new(5000, Currency::USD),
//!     None,
//!     VariantSelection::new().with("Color", "Black"),
//!     2,
//! )?)?;
//!
//! let totals = PricingRules::default().totals(cart.subtotal()?)?;
//! assert_eq!(totals.grand_total.display(), "$123.00");
//! # Ok::<(), luxe_commerce::CommerceError>(())
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod order;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, RatingSummary, Review, VariantAxis, VariantSelection};

    // Cart
    pub use crate::cart::{Cart, CartItem, CartTotals, LineKey, PricingRules};

    // Orders
    pub use crate::order::{Order, OrderItem, OrderStatus, Payment, PaymentStatus};
}
