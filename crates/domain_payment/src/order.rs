//! Payment orders
//!
//! A payment order is a short-lived record the processor uses to correlate
//! a checkout session with an amount and a merchant reference. One order is
//! opened per booking-payment attempt; amounts are integers in minor
//! currency units (paise).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::BookingId;

/// Gateway-side order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Opened, awaiting payment
    Created,
    /// Checkout was started at least once
    Attempted,
    /// Captured
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Attempted => "attempted",
            OrderStatus::Paid => "paid",
        }
    }

    /// Returns true if the order can still accept a payment
    pub fn is_open(&self) -> bool {
        !matches!(self, OrderStatus::Paid)
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(OrderStatus::Created),
            "attempted" => Ok(OrderStatus::Attempted),
            "paid" => Ok(OrderStatus::Paid),
            other => Err(format!("Unknown order status: {}", other)),
        }
    }
}

/// A payment order bridging a booking and the external gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrder {
    /// Gateway-issued order identifier
    pub id: String,
    /// Booking this order pays for
    pub booking_id: BookingId,
    /// Amount in minor currency units (paise)
    pub amount_minor: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Merchant receipt reference, derived from the booking number
    pub receipt: String,
    /// Gateway-side status
    pub status: OrderStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// Request body for opening an order with the gateway
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    /// Amount in minor currency units
    pub amount: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Merchant receipt reference
    pub receipt: String,
}

/// The gateway's response to order creation
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub status: String,
}

/// Builds the merchant receipt reference for a booking
pub fn receipt_for(booking_number: i64) -> String {
    format!("bkg-{}", booking_number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_format() {
        assert_eq!(receipt_for(42), "bkg-42");
    }

    #[test]
    fn test_order_status_open() {
        assert!(OrderStatus::Created.is_open());
        assert!(OrderStatus::Attempted.is_open());
        assert!(!OrderStatus::Paid.is_open());
    }

    #[test]
    fn test_order_status_round_trip() {
        for s in [OrderStatus::Created, OrderStatus::Attempted, OrderStatus::Paid] {
            assert_eq!(s.as_str().parse::<OrderStatus>().unwrap(), s);
        }
    }
}
