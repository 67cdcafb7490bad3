//! Booking domain ports

use async_trait::async_trait;

use core_kernel::{BookingId, DomainPort, PortError, RoomId, StayPeriod};
use crate::booking::{Booking, BookingStatus};
use crate::ledger::BookingFilter;

/// Persistence port for bookings
///
/// Mutation of a given booking goes through the store's own serialized
/// per-record update; callers never edit rows concurrently in place.
#[async_trait]
pub trait BookingStore: DomainPort {
    /// Atomically re-checks availability and inserts the booking
    ///
    /// The overlap check against non-cancelled bookings for the same room
    /// and the insert must happen under a single transaction or lock, so
    /// that two concurrent creates for overlapping stays cannot both
    /// succeed. On conflict, returns `PortError::Conflict`.
    ///
    /// Assigns and returns the booking with its sequential booking number.
    async fn create_if_available(&self, booking: Booking) -> Result<Booking, PortError>;

    /// Fetches a booking by id
    async fn get(&self, id: BookingId) -> Result<Booking, PortError>;

    /// Lists bookings matching the filter
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, PortError>;

    /// Returns true if any booking holding its dates overlaps the stay
    async fn has_conflict(&self, room_id: RoomId, stay: &StayPeriod) -> Result<bool, PortError>;

    /// Persists a status/payment-status change made by the domain
    async fn update(&self, booking: &Booking) -> Result<(), PortError>;
}

/// Events published to the notification dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingEvent {
    Created {
        booking_id: BookingId,
        guest_email: String,
    },
    PaymentSucceeded {
        booking_id: BookingId,
        payment_ref: String,
    },
    PaymentFailed {
        booking_id: BookingId,
        reason: String,
    },
    StatusChanged {
        booking_id: BookingId,
        status: BookingStatus,
    },
}

/// Fire-and-forget notification port
///
/// Delivery failure must never fail the booking or payment operation;
/// implementations log and swallow their own errors.
#[async_trait]
pub trait Notifier: DomainPort {
    async fn notify(&self, event: BookingEvent);
}

/// Notifier that only traces events; the default wiring
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, event: BookingEvent) {
        tracing::info!(?event, "booking notification");
    }
}

impl DomainPort for LogNotifier {}
