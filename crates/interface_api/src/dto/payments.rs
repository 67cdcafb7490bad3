//! Payment DTOs

use serde::Serialize;
use uuid::Uuid;

use domain_payment::{CheckoutSession, Settlement};

use crate::dto::bookings::BookingResponse;

/// Everything the frontend needs to open the hosted checkout
#[derive(Debug, Serialize)]
pub struct CheckoutSessionResponse {
    pub booking_id: Uuid,
    pub order_id: String,
    pub amount_minor: i64,
    pub currency: String,
    /// Merchant key id the checkout widget is initialized with
    pub key_id: String,
    pub prefill_name: String,
    pub prefill_email: String,
    pub prefill_contact: String,
}

impl CheckoutSessionResponse {
    pub fn from_session(session: CheckoutSession, key_id: &str) -> Self {
        Self {
            booking_id: session.booking_id.into(),
            order_id: session.order_id,
            amount_minor: session.amount_minor,
            currency: session.currency,
            key_id: key_id.to_string(),
            prefill_name: session.prefill.name,
            prefill_email: session.prefill.email,
            prefill_contact: session.prefill.contact,
        }
    }
}

/// Settlement result reported back to the frontend
#[derive(Debug, Serialize)]
pub struct SettlementResponse {
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<BookingResponse>,
}

impl From<Settlement> for SettlementResponse {
    fn from(settlement: Settlement) -> Self {
        match settlement {
            Settlement::Paid(booking) => Self {
                result: "paid".to_string(),
                booking: Some(booking.into()),
            },
            Settlement::AlreadyPaid(booking) => Self {
                result: "already_paid".to_string(),
                booking: Some(booking.into()),
            },
            Settlement::LeftPending => Self {
                result: "pending".to_string(),
                booking: None,
            },
            Settlement::MarkedFailed(booking) => Self {
                result: "failed".to_string(),
                booking: Some(booking.into()),
            },
        }
    }
}
