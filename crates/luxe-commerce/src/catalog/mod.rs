//! Catalog types: products, variant axes, reviews.

mod product;
mod review;
mod variant;

pub use product::Product;
pub use review::{RatingSummary, Review};
pub use variant::{resolve_selection, VariantAxis, VariantChoice, VariantSelection};
