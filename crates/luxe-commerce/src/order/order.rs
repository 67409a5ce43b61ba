//! Order types.

use crate::cart::CartItem;
use crate::error::CommerceError;
use crate::ids::{OrderId, OrderItemId, ProductId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Order status. Transitions are driven externally (admin action or the
/// payment-submission step), never by the cart core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order placed, awaiting bank transfer.
    #[default]
    PendingPayment,
    /// Receipt uploaded, awaiting verification.
    PaymentSubmitted,
    /// Payment verified.
    Confirmed,
    /// Order shipped.
    Shipped,
    /// Order delivered and closed.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "pending_payment",
            OrderStatus::PaymentSubmitted => "payment_submitted",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::PendingPayment => "Pending Payment",
            OrderStatus::PaymentSubmitted => "Payment Submitted",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Parse a status string.
    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        match s {
            "pending_payment" => Ok(OrderStatus::PendingPayment),
            "payment_submitted" => Ok(OrderStatus::PaymentSubmitted),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(CommerceError::InvalidStatus(s.to_string())),
        }
    }

    /// Check if the order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Whether an order in this status counts as a purchase for review
    /// eligibility.
    pub fn counts_as_purchased(&self) -> bool {
        matches!(
            self,
            OrderStatus::PaymentSubmitted
                | OrderStatus::Confirmed
                | OrderStatus::Shipped
                | OrderStatus::Completed
        )
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Buying user.
    pub user_id: UserId,
    /// Current status.
    pub status: OrderStatus,
    /// Grand total charged to the buyer.
    pub total_amount: Money,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Order {
    /// Create a new order awaiting payment.
    pub fn new(user_id: UserId, total_amount: Money) -> Self {
        Self {
            id: OrderId::generate(),
            user_id,
            status: OrderStatus::PendingPayment,
            total_amount,
            created_at: current_timestamp(),
        }
    }

    /// Update the status.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }
}

/// A line of a placed order. The unit price is captured at submission
/// time; later catalog price changes do not affect placed orders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Unique line identifier.
    pub id: OrderItemId,
    /// Owning order.
    pub order_id: OrderId,
    /// Purchased product.
    pub product_id: ProductId,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price at time of purchase.
    pub price_at_purchase: Money,
}

impl OrderItem {
    /// Build an order line from a cart line.
    pub fn from_cart_item(order_id: OrderId, item: &CartItem) -> Self {
        Self {
            id: OrderItemId::generate(),
            order_id,
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            price_at_purchase: item.unit_price,
        }
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
