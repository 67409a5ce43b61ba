//! Orders and payments.

mod order;
mod payment;

pub use order::{Order, OrderItem, OrderStatus};
pub use payment::{Payment, PaymentStatus};
