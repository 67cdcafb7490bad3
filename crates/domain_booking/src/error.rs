//! Booking domain errors

use core_kernel::{BookingId, PortError, RoomId, StayError};
use thiserror::Error;

/// Errors that can occur in the booking domain
#[derive(Debug, Error)]
pub enum BookingError {
    /// Room does not exist
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    /// Booking does not exist
    #[error("Booking not found: {0}")]
    BookingNotFound(BookingId),

    /// Check-out is not strictly after check-in
    #[error("Invalid date range: {0}")]
    InvalidDateRange(#[from] StayError),

    /// The room already has a booking overlapping the requested dates
    #[error("Room {room_id} is not available for the requested dates")]
    RoomUnavailable { room_id: RoomId },

    /// Room exists but is withdrawn from sale
    #[error("Room {0} is not offered for booking")]
    RoomNotOffered(RoomId),

    /// Illegal lifecycle transition
    #[error("Invalid status transition from {from} to {to}")]
    InvalidStatusTransition {
        from: &'static str,
        to: &'static str,
    },

    /// Illegal payment status transition
    #[error("Invalid payment status transition from {from} to {to}")]
    InvalidPaymentTransition {
        from: &'static str,
        to: &'static str,
    },

    /// Missing or malformed guest fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// Underlying store failure
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl BookingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BookingError::Validation(message.into())
    }
}
