//! Booking ledger
//!
//! Creates, stores, and transitions booking records. All status mutation
//! funnels through here (or through the payment service, which calls
//! `update_payment_status`).

use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{BookingId, RoomId, StayPeriod};
use domain_catalog::RoomStore;

use crate::booking::{Booking, BookingRequest, BookingStatus, PaymentStatus};
use crate::error::BookingError;
use crate::ports::{BookingEvent, BookingStore, Notifier};
use crate::pricing;

/// Filter for listing bookings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub room_id: Option<RoomId>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub guest_email: Option<String>,
}

/// The booking ledger service
#[derive(Clone)]
pub struct BookingLedger {
    bookings: Arc<dyn BookingStore>,
    rooms: Arc<dyn RoomStore>,
    notifier: Arc<dyn Notifier>,
}

impl BookingLedger {
    /// Creates a ledger over the given stores
    pub fn new(
        bookings: Arc<dyn BookingStore>,
        rooms: Arc<dyn RoomStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            bookings,
            rooms,
            notifier,
        }
    }

    /// Advisory availability check
    ///
    /// The answer is not trusted across a time gap: `create` re-checks
    /// atomically at commit time.
    pub async fn is_available(
        &self,
        room_id: RoomId,
        stay: &StayPeriod,
    ) -> Result<bool, BookingError> {
        // Confirm the room exists so an unknown id reports RoomNotFound
        self.room(room_id).await?;
        Ok(!self.bookings.has_conflict(room_id, stay).await?)
    }

    /// Creates a booking from a guest-initiated request
    ///
    /// Validates guest fields and date order, confirms the room exists and
    /// is offered, prices the stay, then inserts via the store's atomic
    /// check-and-create. The persisted total is the tax-inclusive amount.
    ///
    /// # Errors
    ///
    /// `InvalidDateRange`, `Validation`, `RoomNotFound`, `RoomNotOffered`,
    /// or `RoomUnavailable`.
    pub async fn create(&self, request: BookingRequest) -> Result<Booking, BookingError> {
        request.guest.validate()?;
        let stay = StayPeriod::new(request.check_in, request.check_out)?;

        let room = self.room(request.room_id).await?;
        if !room.is_available {
            return Err(BookingError::RoomNotOffered(room.id));
        }

        let quote = pricing::price(&room, &stay);
        let booking = Booking::new(
            room.id,
            request.guest,
            stay,
            quote.total,
            request.special_requests,
        );

        let booking = self
            .bookings
            .create_if_available(booking)
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    BookingError::RoomUnavailable { room_id: room.id }
                } else {
                    BookingError::Store(e)
                }
            })?;

        info!(
            booking_id = %booking.id,
            booking_number = booking.booking_number,
            room_id = %room.id,
            nights = quote.nights,
            total = %quote.total,
            "booking created"
        );
        self.notifier
            .notify(BookingEvent::Created {
                booking_id: booking.id,
                guest_email: booking.guest.email.clone(),
            })
            .await;

        Ok(booking)
    }

    /// Fetches a booking by id
    pub async fn get(&self, id: BookingId) -> Result<Booking, BookingError> {
        self.bookings.get(id).await.map_err(|e| {
            if e.is_not_found() {
                BookingError::BookingNotFound(id)
            } else {
                BookingError::Store(e)
            }
        })
    }

    /// Lists bookings matching the filter
    pub async fn list(&self, filter: BookingFilter) -> Result<Vec<Booking>, BookingError> {
        Ok(self.bookings.list(&filter).await?)
    }

    /// Transitions a booking's lifecycle status (admin override or
    /// payment-driven confirmation)
    pub async fn update_status(
        &self,
        id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let mut booking = self.get(id).await?;
        booking.update_status(status)?;
        self.bookings.update(&booking).await?;

        info!(booking_id = %id, status = status.as_str(), "booking status updated");
        self.notifier
            .notify(BookingEvent::StatusChanged {
                booking_id: id,
                status,
            })
            .await;
        Ok(booking)
    }

    /// Transitions a booking's payment status
    ///
    /// Called exclusively by the payment service after verification. A
    /// successful payment also confirms a pending booking.
    pub async fn update_payment_status(
        &self,
        id: BookingId,
        payment_status: PaymentStatus,
        payment_ref: Option<String>,
    ) -> Result<Booking, BookingError> {
        let mut booking = self.get(id).await?;
        booking.update_payment_status(payment_status, payment_ref.clone())?;

        if payment_status == PaymentStatus::Paid && booking.status == BookingStatus::Pending {
            booking.update_status(BookingStatus::Confirmed)?;
        }

        self.bookings.update(&booking).await?;
        info!(
            booking_id = %id,
            payment_status = payment_status.as_str(),
            "payment status updated"
        );

        match payment_status {
            PaymentStatus::Paid => {
                self.notifier
                    .notify(BookingEvent::PaymentSucceeded {
                        booking_id: id,
                        payment_ref: payment_ref.unwrap_or_default(),
                    })
                    .await;
            }
            PaymentStatus::Failed => {
                self.notifier
                    .notify(BookingEvent::PaymentFailed {
                        booking_id: id,
                        reason: "payment failed".to_string(),
                    })
                    .await;
            }
            _ => {}
        }

        Ok(booking)
    }

    async fn room(&self, id: RoomId) -> Result<domain_catalog::Room, BookingError> {
        self.rooms.get(id).await.map_err(|e| {
            if e.is_not_found() {
                BookingError::RoomNotFound(id)
            } else {
                warn!(room_id = %id, error = %e, "room lookup failed");
                BookingError::Store(e)
            }
        })
    }
}
