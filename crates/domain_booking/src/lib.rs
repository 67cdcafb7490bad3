//! Booking domain
//!
//! The source of truth for what is reserved. Contains the booking ledger,
//! the availability checker, and the pricing engine.
//!
//! # Invariant
//!
//! For a given room, no two bookings whose status is not cancelled may have
//! overlapping `[check_in, check_out)` stay periods. The advisory
//! availability check is never trusted at commit time: `BookingStore::
//! create_if_available` re-checks and inserts atomically.

pub mod booking;
pub mod availability;
pub mod pricing;
pub mod ledger;
pub mod ports;
pub mod error;

pub use booking::{Booking, BookingStatus, PaymentStatus, GuestDetails, BookingRequest};
pub use availability::is_available;
pub use pricing::{PriceQuote, price, GST_RATE};
pub use ledger::{BookingLedger, BookingFilter};
pub use ports::{BookingStore, Notifier, BookingEvent, LogNotifier};
pub use error::BookingError;
