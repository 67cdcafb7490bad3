//! Invoice document model

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{BookingId, InvoiceId, Money, StayPeriod};
use domain_booking::GuestDetails;

/// Hotel letterhead details printed on every invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// GST registration number
    pub gstin: Option<String>,
}

impl Default for HotelDetails {
    fn default() -> Self {
        Self {
            name: "Hotel Kalsubai Gate Point".to_string(),
            address: "Bari, Akole, Ahmednagar, Maharashtra".to_string(),
            phone: "+91 9876543210".to_string(),
            email: "stay@kalsubaigatepoint.com".to_string(),
            gstin: None,
        }
    }
}

/// A line item on an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Description, e.g. "Deluxe Valley View (per night)"
    pub description: String,
    /// Quantity (nights)
    pub quantity: Decimal,
    /// Per-unit rate
    pub unit_price: Money,
    /// `quantity × unit_price`
    pub amount: Money,
}

/// A numbered invoice document for a paid booking
///
/// Never mutated once produced for a given payment; regeneration from the
/// same inputs yields identical computed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Stable identifier derived from the (booking, payment) pair
    pub id: InvoiceId,
    /// Deterministic number: `INV-{year}{month}-{booking number:04}`
    pub number: String,
    /// Date the invoice was generated
    pub issue_date: NaiveDate,
    /// Booking being invoiced
    pub booking_id: BookingId,
    /// Human-facing booking number
    pub booking_number: i64,
    /// Guest billed
    pub guest: GuestDetails,
    /// Room name at generation time
    pub room_name: String,
    /// Invoiced stay
    pub stay: StayPeriod,
    /// Gateway payment id that settled the booking
    pub payment_id: String,
    /// Charge lines
    pub items: Vec<InvoiceItem>,
    /// Sum of line amounts
    pub subtotal: Money,
    /// GST at 18%
    pub tax: Money,
    /// `subtotal + tax`
    pub total: Money,
    /// Letterhead
    pub hotel: HotelDetails,
}

/// Derives the invoice identifier for a (booking, payment) pair
///
/// UUIDv5 in the booking's namespace, so regeneration yields the same id
/// and a different settling payment yields a different one.
pub fn invoice_id(booking_id: BookingId, payment_id: &str) -> InvoiceId {
    InvoiceId::from(Uuid::new_v5(booking_id.as_uuid(), payment_id.as_bytes()))
}

/// Builds the deterministic invoice number
///
/// Derived from the issue date (not the booking creation date) and the
/// booking's sequential number zero-padded to four digits.
pub fn invoice_number(issue_date: NaiveDate, booking_number: i64) -> String {
    format!(
        "INV-{}{:02}-{:04}",
        issue_date.year(),
        issue_date.month(),
        booking_number
    )
}
