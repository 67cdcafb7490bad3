//! Invoice domain errors

use core_kernel::BookingId;
use thiserror::Error;

/// Errors that can occur generating an invoice
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// Only paid bookings can be invoiced
    #[error("Booking {0} is not paid")]
    BookingNotPaid(BookingId),

    /// The payment id does not match the booking's settled payment
    #[error("Payment {payment_id} did not settle booking {booking_id}")]
    PaymentMismatch {
        booking_id: BookingId,
        payment_id: String,
    },

    /// The booking references a different room than the one supplied
    #[error("Room mismatch for booking {0}")]
    RoomMismatch(BookingId),
}
