//! Invoice handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use core_kernel::BookingId;
use domain_invoice::Invoice;

use crate::error::ApiError;
use crate::AppState;

/// Generates the invoice for a paid booking
///
/// Pure derivation: calling this twice yields the same document, and
/// nothing is stored. Unpaid bookings get a conflict.
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, ApiError> {
    let booking = state.ledger.get(BookingId::from(id)).await?;
    let room = state.catalog.get(booking.room_id).await?;

    let payment_id = booking
        .payment_ref
        .clone()
        .ok_or_else(|| ApiError::Conflict(format!("Booking {} is not paid", booking.id)))?;

    let invoice = state.invoices.generate(&booking, &room, &payment_id)?;
    Ok(Json(invoice))
}
