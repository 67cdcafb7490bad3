//! Booking aggregate and status state machines

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BookingId, Money, RoomId, StayPeriod};
use crate::error::BookingError;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created, awaiting payment
    Pending,
    /// Payment received, dates held
    Confirmed,
    /// Guest has stayed and checked out
    Completed,
    /// Released; no longer counts toward availability
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Returns true if a booking in this status still holds its dates
    pub fn holds_dates(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled)
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}

/// Payment settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentStatus::Pending),
            "paid" => Ok(PaymentStatus::Paid),
            "failed" => Ok(PaymentStatus::Failed),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(format!("Unknown payment status: {}", other)),
        }
    }
}

/// Guest contact details, passed through verbatim from the caller and
/// validated here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestDetails {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl GuestDetails {
    /// Validates that all guest fields are present
    pub fn validate(&self) -> Result<(), BookingError> {
        if self.name.trim().is_empty() {
            return Err(BookingError::validation("Guest name is required"));
        }
        if self.phone.trim().is_empty() {
            return Err(BookingError::validation("Guest phone is required"));
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(BookingError::validation("A valid guest email is required"));
        }
        Ok(())
    }
}

/// A guest-initiated request to reserve a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub room_id: RoomId,
    pub guest: GuestDetails,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub special_requests: Option<String>,
}

/// A reservation record
///
/// Never deleted, only cancelled. Status and payment status are mutated
/// only through the ledger and the payment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: BookingId,
    /// Human-facing sequential number, assigned by the store; used in
    /// gateway receipts and invoice numbers
    pub booking_number: i64,
    /// Reserved room
    pub room_id: RoomId,
    /// Guest contact details
    pub guest: GuestDetails,
    /// Stay dates, half-open `[check_in, check_out)`
    pub stay: StayPeriod,
    /// Derived tax-inclusive total; never guest-supplied
    pub total_amount: Money,
    /// Lifecycle status
    pub status: BookingStatus,
    /// Settlement status
    pub payment_status: PaymentStatus,
    /// Gateway payment id once paid
    pub payment_ref: Option<String>,
    /// Free-text special requests
    pub special_requests: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Creates a new pending booking
    ///
    /// The booking number is a placeholder until the store assigns one.
    pub fn new(
        room_id: RoomId,
        guest: GuestDetails,
        stay: StayPeriod,
        total_amount: Money,
        special_requests: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: BookingId::new_v7(),
            booking_number: 0,
            room_id,
            guest,
            stay,
            total_amount,
            status: BookingStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_ref: None,
            special_requests,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transitions the lifecycle status
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatusTransition` for any pair outside the allow-list.
    pub fn update_status(&mut self, status: BookingStatus) -> Result<(), BookingError> {
        if !self.can_transition_to(status) {
            return Err(BookingError::InvalidStatusTransition {
                from: self.status.as_str(),
                to: status.as_str(),
            });
        }
        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Transitions the payment status, recording the gateway reference
    pub fn update_payment_status(
        &mut self,
        payment_status: PaymentStatus,
        payment_ref: Option<String>,
    ) -> Result<(), BookingError> {
        if !self.can_transition_payment_to(payment_status) {
            return Err(BookingError::InvalidPaymentTransition {
                from: self.payment_status.as_str(),
                to: payment_status.as_str(),
            });
        }
        self.payment_status = payment_status;
        if payment_ref.is_some() {
            self.payment_ref = payment_ref;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Checks if a lifecycle transition is valid
    ///
    /// Pending -> Confirmed (payment), Confirmed -> Completed (post-stay),
    /// any state -> Cancelled.
    fn can_transition_to(&self, target: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self.status, target),
            (Pending, Confirmed)
                | (Confirmed, Completed)
                | (Pending, Cancelled)
                | (Confirmed, Cancelled)
                | (Completed, Cancelled)
        )
    }

    /// Checks if a payment transition is valid
    ///
    /// Failed -> Pending covers a guest re-entering the payment flow.
    fn can_transition_payment_to(&self, target: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self.payment_status, target),
            (Pending, Paid) | (Pending, Failed) | (Failed, Pending) | (Paid, Refunded)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn booking() -> Booking {
        let stay = StayPeriod::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 4).unwrap(),
        )
        .unwrap();
        Booking::new(
            RoomId::new(),
            GuestDetails {
                name: "John Doe".to_string(),
                phone: "+91 9876543210".to_string(),
                email: "john@example.com".to_string(),
            },
            stay,
            Money::new(dec!(7080), Currency::INR),
            None,
        )
    }

    #[test]
    fn test_new_booking_is_pending() {
        let b = booking();
        assert_eq!(b.status, BookingStatus::Pending);
        assert_eq!(b.payment_status, PaymentStatus::Pending);
        assert!(b.payment_ref.is_none());
    }

    #[test]
    fn test_confirm_then_complete() {
        let mut b = booking();
        b.update_status(BookingStatus::Confirmed).unwrap();
        b.update_status(BookingStatus::Completed).unwrap();
        assert_eq!(b.status, BookingStatus::Completed);
    }

    #[test]
    fn test_completed_cannot_go_back_to_pending() {
        let mut b = booking();
        b.update_status(BookingStatus::Confirmed).unwrap();
        b.update_status(BookingStatus::Completed).unwrap();

        let err = b.update_status(BookingStatus::Confirmed).unwrap_err();
        assert!(matches!(err, BookingError::InvalidStatusTransition { .. }));
    }

    #[test]
    fn test_any_state_can_cancel() {
        let mut pending = booking();
        pending.update_status(BookingStatus::Cancelled).unwrap();

        let mut confirmed = booking();
        confirmed.update_status(BookingStatus::Confirmed).unwrap();
        confirmed.update_status(BookingStatus::Cancelled).unwrap();

        assert!(!pending.status.holds_dates());
        assert!(!confirmed.status.holds_dates());
    }

    #[test]
    fn test_payment_paid_records_reference() {
        let mut b = booking();
        b.update_payment_status(PaymentStatus::Paid, Some("pay_123".to_string()))
            .unwrap();
        assert_eq!(b.payment_status, PaymentStatus::Paid);
        assert_eq!(b.payment_ref.as_deref(), Some("pay_123"));
    }

    #[test]
    fn test_failed_payment_can_retry() {
        let mut b = booking();
        b.update_payment_status(PaymentStatus::Failed, None).unwrap();
        b.update_payment_status(PaymentStatus::Pending, None).unwrap();
        b.update_payment_status(PaymentStatus::Paid, Some("pay_456".to_string()))
            .unwrap();
        assert_eq!(b.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_paid_cannot_become_failed() {
        let mut b = booking();
        b.update_payment_status(PaymentStatus::Paid, Some("pay_123".to_string()))
            .unwrap();
        let err = b.update_payment_status(PaymentStatus::Failed, None).unwrap_err();
        assert!(matches!(err, BookingError::InvalidPaymentTransition { .. }));
    }

    #[test]
    fn test_guest_validation() {
        let guest = GuestDetails {
            name: "".to_string(),
            phone: "123".to_string(),
            email: "a@b.c".to_string(),
        };
        assert!(guest.validate().is_err());

        let guest = GuestDetails {
            name: "Jane".to_string(),
            phone: "123".to_string(),
            email: "not-an-email".to_string(),
        };
        assert!(guest.validate().is_err());
    }
}
