//! Booking DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::RoomId;
use domain_booking::{Booking, BookingRequest, BookingStatus, GuestDetails, PaymentStatus};

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub room_id: Uuid,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub special_requests: Option<String>,
}

impl From<CreateBookingRequest> for BookingRequest {
    fn from(req: CreateBookingRequest) -> Self {
        BookingRequest {
            room_id: RoomId::from(req.room_id),
            guest: GuestDetails {
                name: req.guest_name,
                phone: req.guest_phone,
                email: req.guest_email,
            },
            check_in: req.check_in,
            check_out: req.check_out,
            special_requests: req.special_requests,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct BookingListQuery {
    pub room_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub guest_email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub booking_number: i64,
    pub room_id: Uuid,
    pub guest_name: String,
    pub guest_phone: String,
    pub guest_email: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub total_amount: Decimal,
    pub currency: String,
    pub status: String,
    pub payment_status: String,
    pub payment_ref: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id.into(),
            booking_number: booking.booking_number,
            room_id: booking.room_id.into(),
            guest_name: booking.guest.name,
            guest_phone: booking.guest.phone,
            guest_email: booking.guest.email,
            check_in: booking.stay.check_in(),
            check_out: booking.stay.check_out(),
            nights: booking.stay.nights(),
            total_amount: booking.total_amount.amount(),
            currency: booking.total_amount.currency().code().to_string(),
            status: booking.status.as_str().to_string(),
            payment_status: booking.payment_status.as_str().to_string(),
            payment_ref: booking.payment_ref,
            special_requests: booking.special_requests,
            created_at: booking.created_at,
        }
    }
}
