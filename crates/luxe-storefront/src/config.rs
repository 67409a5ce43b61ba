//! Storefront configuration.

use luxe_commerce::cart::PricingRules;
use serde::{Deserialize, Serialize};

/// Bank-transfer details shown at the payment step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BankTransferDetails {
    /// Receiving bank.
    pub bank_name: String,
    /// Masked account number.
    pub account: String,
    /// Routing number.
    pub routing: String,
}

impl BankTransferDetails {
    /// The instruction text shown to the buyer after placing an order.
    pub fn instructions(&self) -> String {
        format!(
            "Please transfer the order total to:\n\nBank: {}\nAccount: {}\nRouting: {}\n\nReference: Your order ID (shown after placing order).",
            self.bank_name, self.account, self.routing
        )
    }
}

impl Default for BankTransferDetails {
    fn default() -> Self {
        Self {
            bank_name: "LUXE Commerce Bank".to_string(),
            account: "XXXX XXXX 1234 5678".to_string(),
            routing: "021000021".to_string(),
        }
    }
}

/// Configuration for the storefront flows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Pricing rules (free-shipping threshold, flat rate, tax rate).
    pub pricing: PricingRules,
    /// Private bucket holding payment receipts.
    pub receipts_bucket: String,
    /// Validity of signed receipt URLs, in seconds.
    pub receipt_url_ttl_secs: u64,
    /// Bank-transfer details.
    pub bank: BankTransferDetails,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            pricing: PricingRules::default(),
            receipts_bucket: "payment-receipts".to_string(),
            receipt_url_ttl_secs: 3600,
            bank: BankTransferDetails::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_store_constants() {
        let config = StoreConfig::default();
        assert_eq!(config.pricing.free_shipping_threshold.amount_cents, 20000);
        assert_eq!(config.pricing.flat_shipping_rate.amount_cents, 1500);
        assert_eq!(config.pricing.tax_rate_bp, 800);
        assert_eq!(config.receipts_bucket, "payment-receipts");
        assert_eq!(config.receipt_url_ttl_secs, 3600);
    }

    #[test]
    fn test_instructions_mention_bank() {
        let text = BankTransferDetails::default().instructions();
        assert!(text.contains("LUXE Commerce Bank"));
        assert!(text.contains("021000021"));
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"receipts_bucket": "other-bucket"}"#).unwrap();
        assert_eq!(config.receipts_bucket, "other-bucket");
        assert_eq!(config.receipt_url_ttl_secs, 3600);
    }
}
