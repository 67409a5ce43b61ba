//! Payment record types for the bank-transfer flow.

use crate::error::CommerceError;
use crate::ids::{OrderId, PaymentId, UserId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Payment verification status, driven by admin review of the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Receipt uploaded, not yet reviewed.
    #[default]
    Pending,
    /// Receipt accepted.
    Approved,
    /// Receipt rejected.
    Rejected,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Approved => "approved",
            PaymentStatus::Rejected => "rejected",
        }
    }

    /// Parse a status string.
    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "approved" => Ok(PaymentStatus::Approved),
            "rejected" => Ok(PaymentStatus::Rejected),
            _ => Err(CommerceError::InvalidStatus(s.to_string())),
        }
    }
}

/// A submitted bank-transfer payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    /// Unique payment identifier.
    pub id: PaymentId,
    /// Order being paid.
    pub order_id: OrderId,
    /// Paying user.
    pub user_id: UserId,
    /// Bank the transfer was sent from, as entered by the buyer.
    pub bank_name: String,
    /// Transferred amount.
    pub amount: Money,
    /// Storage path of the uploaded receipt, if any.
    pub receipt_path: Option<String>,
    /// Verification status.
    pub status: PaymentStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Payment {
    /// Create a pending payment record.
    pub fn new(
        order_id: OrderId,
        user_id: UserId,
        amount: Money,
        bank_name: impl Into<String>,
        receipt_path: Option<String>,
    ) -> Self {
        Self {
            id: PaymentId::generate(),
            order_id,
            user_id,
            bank_name: bank_name.into(),
            amount,
            receipt_path,
            status: PaymentStatus::Pending,
            created_at: current_timestamp(),
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
