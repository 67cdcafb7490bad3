//! Payment domain errors
//!
//! Transient gateway failures are safe to retry with backoff; a signature
//! mismatch is terminal and leaves the booking unpaid.

use core_kernel::PortError;
use domain_booking::BookingError;
use thiserror::Error;

/// Errors that can occur in the payment domain
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Network or service failure opening the order; retryable
    #[error("Payment gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// The gateway rejected the order request; not retryable
    #[error("Payment gateway rejected the request: {0}")]
    GatewayRejected(String),

    /// Signature or order/booking correlation check failed; not retryable
    #[error("Payment verification failed: {0}")]
    VerificationFailed(String),

    /// The booking is already settled
    #[error("Booking is already paid")]
    AlreadyPaid,

    /// No order is known for the callback's order id
    #[error("Unknown payment order: {0}")]
    UnknownOrder(String),

    /// Booking-side failure (not found, illegal transition)
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Underlying store failure
    #[error("Store error: {0}")]
    Store(#[from] PortError),
}

impl PaymentError {
    /// Returns true if the operation may succeed on retry
    pub fn is_retryable(&self) -> bool {
        match self {
            PaymentError::GatewayUnavailable(_) => true,
            PaymentError::Store(e) => e.is_transient(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_unavailable_is_retryable() {
        assert!(PaymentError::GatewayUnavailable("timeout".to_string()).is_retryable());
    }

    #[test]
    fn test_verification_failure_is_terminal() {
        assert!(!PaymentError::VerificationFailed("bad signature".to_string()).is_retryable());
        assert!(!PaymentError::GatewayRejected("bad amount".to_string()).is_retryable());
    }
}
