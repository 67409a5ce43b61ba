//! Order-total calculation: shipping, tax, grand total.
//!
//! Pure functions of the subtotal, parameterized by [`PricingRules`].

use crate::error::CommerceError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// The storefront's pricing rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricingRules {
    /// Orders strictly above this subtotal ship free. The boundary is
    /// exclusive: a subtotal of exactly the threshold still pays the
    /// flat rate.
    pub free_shipping_threshold: Money,
    /// Flat shipping rate below the threshold.
    pub flat_shipping_rate: Money,
    /// Tax rate in basis points (800 = 8%).
    pub tax_rate_bp: u32,
}

impl Default for PricingRules {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::new(20000, Currency::USD),
            flat_shipping_rate: Money::new(1500, Currency::USD),
            tax_rate_bp: 800,
        }
    }
}

impl PricingRules {
    /// Shipping cost for a subtotal.
    pub fn shipping(&self, subtotal: Money) -> Money {
        if subtotal.amount_cents > self.free_shipping_threshold.amount_cents {
            Money::zero(subtotal.currency)
        } else {
            self.flat_shipping_rate
        }
    }

    /// Tax on a subtotal.
    pub fn tax(&self, subtotal: Money) -> Result<Money, CommerceError> {
        subtotal
            .percent_bp(self.tax_rate_bp)
            .ok_or(CommerceError::Overflow)
    }

    /// Full breakdown for a subtotal.
    pub fn totals(&self, subtotal: Money) -> Result<CartTotals, CommerceError> {
        let shipping = self.shipping(subtotal);
        let tax = self.tax(subtotal)?;
        let grand_total = subtotal
            .try_add(&shipping)
            .and_then(|t| t.try_add(&tax))
            .ok_or_else(|| CommerceError::CurrencyMismatch {
                expected: subtotal.currency.code().to_string(),
                got: shipping.currency.code().to_string(),
            })?;
        Ok(CartTotals {
            subtotal,
            shipping,
            tax,
            grand_total,
        })
    }

    /// How much more the subtotal needs before shipping is free. Zero when
    /// free shipping already applies.
    pub fn amount_to_free_shipping(&self, subtotal: Money) -> Money {
        let missing = self.free_shipping_threshold.amount_cents - subtotal.amount_cents;
        Money::new(missing.max(0), subtotal.currency)
    }
}

/// The order-total breakdown shown in the cart and checkout summaries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Shipping cost.
    pub shipping: Money,
    /// Tax amount.
    pub tax: Money,
    /// Amount charged to the buyer.
    pub grand_total: Money,
}

impl CartTotals {
    /// Whether the order ships free.
    pub fn free_shipping(&self) -> bool {
        self.shipping.is_zero()
    }
}
