//! Booking handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use core_kernel::{BookingId, RoomId};
use domain_booking::BookingFilter;

use crate::dto::bookings::{
    BookingListQuery, BookingResponse, CreateBookingRequest, UpdateBookingStatusRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Creates a booking
///
/// Availability is re-checked atomically at insert time; a lost race
/// surfaces as a conflict, never a double booking.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.ledger.create(request.into()).await?;
    Ok(Json(booking.into()))
}

/// Gets a booking by ID
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.ledger.get(BookingId::from(id)).await?;
    Ok(Json(booking.into()))
}

/// Lists bookings with optional filters (admin)
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let filter = BookingFilter {
        room_id: query.room_id.map(RoomId::from),
        status: query.status,
        payment_status: query.payment_status,
        guest_email: query.guest_email,
    };
    let bookings = state.ledger.list(filter).await?;
    Ok(Json(bookings.into_iter().map(BookingResponse::from).collect()))
}

/// Transitions a booking's lifecycle status (admin)
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state
        .ledger
        .update_status(BookingId::from(id), request.status)
        .await?;
    Ok(Json(booking.into()))
}
