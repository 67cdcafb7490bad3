//! Checkout hand-off and its outcomes
//!
//! The hosted checkout UI is external and user-driven. The hand-off data
//! carries the order id, amount, and guest contact prefill; the UI reports
//! back exactly one of a closed set of outcomes, consumed by exhaustive
//! matching.

use serde::{Deserialize, Serialize};

use core_kernel::BookingId;

/// Guest contact fields prefilled into the hosted checkout form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// Everything the presentation layer needs to open the hosted checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub booking_id: BookingId,
    pub order_id: String,
    /// Amount in minor currency units
    pub amount_minor: i64,
    pub currency: String,
    pub prefill: CheckoutPrefill,
}

/// The result of a checkout attempt, as reported by the hosted UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckoutOutcome {
    /// Payment collected; must be verified before it is believed
    Success {
        order_id: String,
        payment_id: String,
        signature: String,
    },
    /// Guest closed the checkout; the booking stays pending
    Dismissed,
    /// The gateway reported a failed attempt
    Failed { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serde_tagging() {
        let outcome = CheckoutOutcome::Success {
            order_id: "order_1".to_string(),
            payment_id: "pay_1".to_string(),
            signature: "sig".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "success");

        let dismissed: CheckoutOutcome =
            serde_json::from_str(r#"{"outcome":"dismissed"}"#).unwrap();
        assert_eq!(dismissed, CheckoutOutcome::Dismissed);
    }
}
