//! The checkout flow.
//!
//! Sequences the cart into persisted order, item, and payment records
//! against the data collaborator:
//!
//! 1. Place the order (status pending_payment) with its items.
//! 2. Show the bank-transfer instructions and wait for a receipt.
//! 3. On receipt upload, record the payment (status pending), move the
//!    order to payment_submitted, and only then clear the cart.
//!
//! Failures surface to the user and the flow stays where it was: an
//! order that fails to place leaves the cart at the cart stage; a failed
//! receipt submission leaves the order pending_payment with the cart
//! intact, and the call may be retried with a new file.

use crate::cart_store::CartStore;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::orders::OrderRepo;
use crate::receipts::ReceiptStore;
use luxe_commerce::cart::PricingRules;
use luxe_commerce::ids::{OrderId, UserId};
use luxe_commerce::money::Money;
use luxe_commerce::order::{OrderStatus, Payment};
use tracing::info;

/// Where the buyer is in the checkout.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutStage {
    /// Reviewing the cart; no order exists yet.
    Cart,
    /// Order placed, awaiting the bank transfer and receipt.
    Payment {
        /// The placed order.
        order_id: OrderId,
        /// Amount the buyer must transfer.
        amount: Money,
    },
    /// Receipt submitted; the order is out of the buyer's hands.
    Submitted {
        /// The paid order.
        order_id: OrderId,
    },
}

/// One buyer's progress through checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
}

impl CheckoutFlow {
    /// Start at the cart stage.
    pub fn new() -> Self {
        Self {
            stage: CheckoutStage::Cart,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> &CheckoutStage {
        &self.stage
    }

    /// Bank-transfer instructions, shown only while awaiting payment.
    pub fn payment_instructions(&self, config: &StoreConfig) -> Option<String> {
        match &self.stage {
            CheckoutStage::Payment { .. } => Some(config.bank.instructions()),
            _ => None,
        }
    }

    /// Step 1: persist the order and its items from the cart snapshot.
    ///
    /// The grand total is computed from the cart under the given rules
    /// and captured on the order. The cart is NOT cleared; it stays
    /// intact until the receipt submission succeeds.
    pub async fn place_order(
        &mut self,
        orders: &OrderRepo,
        rules: &PricingRules,
        user_id: &UserId,
        cart: &CartStore,
    ) -> Result<OrderId, StoreError> {
        match &self.stage {
            CheckoutStage::Cart => {}
            CheckoutStage::Payment { order_id, .. } => {
                return Err(StoreError::Validation(format!(
                    "Order {} is already awaiting payment",
                    order_id
                )));
            }
            CheckoutStage::Submitted { .. } => {
                return Err(StoreError::Validation(
                    "This checkout is already complete".to_string(),
                ));
            }
        }
        if cart.is_empty() {
            return Err(StoreError::Validation("Your cart is empty".to_string()));
        }

        let totals = cart.totals(rules)?;
        let order_id = orders
            .create_order(user_id, cart.items(), totals.grand_total)
            .await?;

        self.stage = CheckoutStage::Payment {
            order_id: order_id.clone(),
            amount: totals.grand_total,
        };
        Ok(order_id)
    }

    /// Steps 2-3: upload the receipt, record the payment, move the order
    /// to payment_submitted, then clear the cart.
    ///
    /// Each attempt uploads to a fresh path, so a retry after a partial
    /// failure is safe; the flow stays at the payment stage until the
    /// whole sequence succeeds.
    pub async fn submit_receipt(
        &mut self,
        orders: &OrderRepo,
        receipts: &ReceiptStore,
        user_id: &UserId,
        cart: &mut CartStore,
        bank_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StoreError> {
        let (order_id, amount) = match &self.stage {
            CheckoutStage::Payment { order_id, amount } => (order_id.clone(), *amount),
            _ => {
                return Err(StoreError::Validation(
                    "No order is awaiting payment".to_string(),
                ));
            }
        };

        let path = receipts.upload(user_id, &order_id, file_name, bytes).await?;

        let payment = Payment::new(
            order_id.clone(),
            user_id.clone(),
            amount,
            bank_name,
            Some(path),
        );
        orders.create_payment(&payment).await?;
        orders
            .update_status(&order_id, OrderStatus::PaymentSubmitted)
            .await?;

        cart.clear();
        self.stage = CheckoutStage::Submitted { order_id };
        info!("checkout complete, cart cleared");
        Ok(())
    }
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use luxe_commerce::money::Currency;
    use luxe_data::MemoryBackend;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_place_order_rejects_empty_cart() {
        let backend = Arc::new(MemoryBackend::new());
        let orders = OrderRepo::new(backend);
        let mut flow = CheckoutFlow::new();

        let err = flow
            .place_order(
                &orders,
                &PricingRules::default(),
                &UserId::new("u1"),
                &CartStore::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(flow.stage(), &CheckoutStage::Cart);
    }

    #[tokio::test]
    async fn test_submit_receipt_requires_placed_order() {
        let backend = Arc::new(MemoryBackend::new());
        let orders = OrderRepo::new(backend.clone());
        let receipts = ReceiptStore::new(backend, &StoreConfig::default());
        let mut flow = CheckoutFlow::new();
        let mut cart = CartStore::new();

        let err = flow
            .submit_receipt(
                &orders,
                &receipts,
                &UserId::new("u1"),
                &mut cart,
                "First National",
                "receipt.jpg",
                vec![1],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_instructions_only_at_payment_stage() {
        let config = StoreConfig::default();
        let flow = CheckoutFlow::new();
        assert!(flow.payment_instructions(&config).is_none());

        let flow = CheckoutFlow {
            stage: CheckoutStage::Payment {
                order_id: OrderId::new("o1"),
                amount: Money::new(12300, Currency::USD),
            },
        };
        let text = flow.payment_instructions(&config).unwrap();
        assert!(text.contains("LUXE Commerce Bank"));
    }
}
