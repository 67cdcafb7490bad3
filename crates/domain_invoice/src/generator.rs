//! Invoice generation
//!
//! Pure derivation from a paid booking and its room. No record is created
//! and nothing is mutated, so generating twice for the same (booking,
//! payment) pair is idempotent by construction: the computed fields are
//! identical, and the number differs only if the issue date moved.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;

use domain_booking::{pricing, Booking, PaymentStatus};
use domain_catalog::Room;

use crate::error::InvoiceError;
use crate::invoice::{invoice_id, invoice_number, HotelDetails, Invoice, InvoiceItem};

/// Generates invoice documents for paid bookings
#[derive(Debug, Clone)]
pub struct InvoiceGenerator {
    hotel: HotelDetails,
}

impl InvoiceGenerator {
    /// Creates a generator with the given letterhead
    pub fn new(hotel: HotelDetails) -> Self {
        Self { hotel }
    }

    /// Generates an invoice dated today
    pub fn generate(
        &self,
        booking: &Booking,
        room: &Room,
        payment_id: &str,
    ) -> Result<Invoice, InvoiceError> {
        self.generate_on(booking, room, payment_id, Utc::now().date_naive())
    }

    /// Generates an invoice with an explicit issue date
    ///
    /// Recomputes every figure through the pricing engine from the stored
    /// dates and the room's current rate; the cached booking total is
    /// deliberately not trusted.
    ///
    /// # Errors
    ///
    /// `BookingNotPaid` unless the booking's payment status is paid;
    /// `PaymentMismatch` if `payment_id` is not the payment that settled
    /// it; `RoomMismatch` if the supplied room is not the booked one.
    pub fn generate_on(
        &self,
        booking: &Booking,
        room: &Room,
        payment_id: &str,
        issue_date: NaiveDate,
    ) -> Result<Invoice, InvoiceError> {
        if booking.payment_status != PaymentStatus::Paid {
            return Err(InvoiceError::BookingNotPaid(booking.id));
        }
        if booking.payment_ref.as_deref() != Some(payment_id) {
            return Err(InvoiceError::PaymentMismatch {
                booking_id: booking.id,
                payment_id: payment_id.to_string(),
            });
        }
        if booking.room_id != room.id {
            return Err(InvoiceError::RoomMismatch(booking.id));
        }

        let quote = pricing::price(room, &booking.stay);
        let item = InvoiceItem {
            description: format!("{} (per night)", room.name),
            quantity: Decimal::from(quote.nights),
            unit_price: quote.rate,
            amount: quote.subtotal,
        };

        let invoice = Invoice {
            id: invoice_id(booking.id, payment_id),
            number: invoice_number(issue_date, booking.booking_number),
            issue_date,
            booking_id: booking.id,
            booking_number: booking.booking_number,
            guest: booking.guest.clone(),
            room_name: room.name.clone(),
            stay: booking.stay,
            payment_id: payment_id.to_string(),
            items: vec![item],
            subtotal: quote.subtotal,
            tax: quote.tax,
            total: quote.total,
            hotel: self.hotel.clone(),
        };

        info!(
            booking_id = %booking.id,
            number = %invoice.number,
            total = %invoice.total,
            "invoice generated"
        );
        Ok(invoice)
    }
}

impl Default for InvoiceGenerator {
    fn default() -> Self {
        Self::new(HotelDetails::default())
    }
}
