//! Order and payment repository over the data collaborator.

use crate::collections;
use crate::error::StoreError;
use luxe_commerce::cart::CartItem;
use luxe_commerce::ids::{OrderId, PaymentId, UserId};
use luxe_commerce::money::Money;
use luxe_commerce::order::{Order, OrderItem, OrderStatus, Payment, PaymentStatus};
use luxe_data::{DataClient, DataClientExt, Select};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

/// An order joined with its payments, for admin views.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderWithPayments {
    pub order: Order,
    pub payments: Vec<Payment>,
}

/// Access to orders, order items, and payments.
#[derive(Clone)]
pub struct OrderRepo {
    client: Arc<dyn DataClient>,
}

impl OrderRepo {
    /// Create a repository over a data client.
    pub fn new(client: Arc<dyn DataClient>) -> Self {
        Self { client }
    }

    /// Persist an order and its lines from a cart snapshot.
    ///
    /// Inserts the order record (status pending_payment) first, then the
    /// order items with the unit price captured at this moment. There is
    /// no transaction spanning the two inserts: if the items insert
    /// fails, the error is surfaced and the partial order record is left
    /// for the backend to reconcile.
    pub async fn create_order(
        &self,
        user_id: &UserId,
        items: &[CartItem],
        total: Money,
    ) -> Result<OrderId, StoreError> {
        let order = Order::new(user_id.clone(), total);
        let stored: Order = self.client.insert_as(collections::ORDERS, &order).await?;

        let lines: Vec<Value> = items
            .iter()
            .map(|item| {
                serde_json::to_value(OrderItem::from_cart_item(stored.id.clone(), item))
                    .map_err(luxe_data::DataError::from)
            })
            .collect::<Result<_, _>>()?;

        if let Err(e) = self.client.insert_many(collections::ORDER_ITEMS, lines).await {
            warn!(order_id = %stored.id, error = %e, "order items insert failed after order insert");
            return Err(e.into());
        }

        info!(order_id = %stored.id, total = %total, "order placed");
        Ok(stored.id)
    }

    /// A user's orders, newest first.
    pub async fn orders_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .client
            .select_as(
                collections::ORDERS,
                Select::new()
                    .eq("user_id", user_id.as_str())
                    .order_desc("created_at"),
            )
            .await?)
    }

    /// Fetch one order.
    pub async fn fetch(&self, id: &OrderId) -> Result<Order, StoreError> {
        self.client
            .select_one_as(collections::ORDERS, Select::new().eq("id", id.as_str()))
            .await?
            .ok_or_else(|| StoreError::not_found("order", id.as_str()))
    }

    /// The order lines of one order.
    pub async fn items_for_order(&self, id: &OrderId) -> Result<Vec<OrderItem>, StoreError> {
        Ok(self
            .client
            .select_as(
                collections::ORDER_ITEMS,
                Select::new().eq("order_id", id.as_str()),
            )
            .await?)
    }

    /// Set an order's status (admin action or the payment-submission
    /// step).
    pub async fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), StoreError> {
        let changed = self
            .client
            .update(
                collections::ORDERS,
                Select::new().eq("id", id.as_str()),
                serde_json::json!({ "status": status }),
            )
            .await?;
        if changed == 0 {
            return Err(StoreError::not_found("order", id.as_str()));
        }
        info!(order_id = %id, status = status.as_str(), "order status updated");
        Ok(())
    }

    /// Record a submitted bank-transfer payment.
    pub async fn create_payment(&self, payment: &Payment) -> Result<Payment, StoreError> {
        let stored = self
            .client
            .insert_as(collections::PAYMENTS, payment)
            .await?;
        info!(order_id = %payment.order_id, "payment recorded");
        Ok(stored)
    }

    /// Payments submitted for one order.
    pub async fn payments_for_order(&self, id: &OrderId) -> Result<Vec<Payment>, StoreError> {
        Ok(self
            .client
            .select_as(
                collections::PAYMENTS,
                Select::new().eq("order_id", id.as_str()),
            )
            .await?)
    }

    /// Admin: set a payment's verification status.
    pub async fn update_payment_status(
        &self,
        id: &PaymentId,
        status: PaymentStatus,
    ) -> Result<(), StoreError> {
        let changed = self
            .client
            .update(
                collections::PAYMENTS,
                Select::new().eq("id", id.as_str()),
                serde_json::json!({ "status": status }),
            )
            .await?;
        if changed == 0 {
            return Err(StoreError::not_found("payment", id.as_str()));
        }
        info!(payment_id = %id, status = status.as_str(), "payment status updated");
        Ok(())
    }

    /// Admin: every order, newest first, each with its payments. The
    /// join happens client-side; the collaborator only supports flat
    /// selects.
    pub async fn list_with_payments(&self) -> Result<Vec<OrderWithPayments>, StoreError> {
        let orders: Vec<Order> = self
            .client
            .select_as(
                collections::ORDERS,
                Select::new().order_desc("created_at"),
            )
            .await?;
        let payments: Vec<Payment> = self
            .client
            .select_as(collections::PAYMENTS, Select::new())
            .await?;

        let mut by_order: std::collections::HashMap<String, Vec<Payment>> =
            std::collections::HashMap::new();
        for payment in payments {
            by_order
                .entry(payment.order_id.as_str().to_string())
                .or_default()
                .push(payment);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let payments = by_order.remove(order.id.as_str()).unwrap_or_default();
                OrderWithPayments { order, payments }
            })
            .collect())
    }
}
