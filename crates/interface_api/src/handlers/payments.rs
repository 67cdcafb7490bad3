//! Payment handlers
//!
//! Two-step handshake: open an order and hand back the checkout session,
//! then verify the outcome the hosted UI reports.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use core_kernel::BookingId;
use domain_payment::CheckoutOutcome;

use crate::dto::payments::{CheckoutSessionResponse, SettlementResponse};
use crate::error::ApiError;
use crate::AppState;

/// Opens (or reuses) a payment order for a booking
///
/// Idempotent per booking: retries return the same open order.
pub async fn create_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckoutSessionResponse>, ApiError> {
    let booking = state.ledger.get(BookingId::from(id)).await?;
    let order = state.payments.create_order(&booking).await?;
    let session = state.payments.checkout_session(&booking, &order);

    Ok(Json(CheckoutSessionResponse::from_session(
        session,
        &state.config.gateway_key_id,
    )))
}

/// Settles a checkout outcome onto the booking
///
/// Success callbacks are signature-verified before anything is believed;
/// replays of an applied success are accepted without effect.
pub async fn settle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(outcome): Json<CheckoutOutcome>,
) -> Result<Json<SettlementResponse>, ApiError> {
    let settlement = state
        .payments
        .settle_for_booking(BookingId::from(id), outcome)
        .await?;
    Ok(Json(settlement.into()))
}
