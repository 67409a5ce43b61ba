//! Cart state and order-total calculation.

mod cart;
mod pricing;

pub use cart::{Cart, CartItem, LineKey};
pub use pricing::{CartTotals, PricingRules};
